use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single message produced during a conversation round.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseMessage {
    pub id: Uuid,
    /// "user" or "assistant".
    pub role: String,
    /// Message text content. The only field terminators inspect.
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl ResponseMessage {
    /// Create a new message with a fresh id and the current timestamp.
    pub fn new(role: &str, content: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            role: role.to_string(),
            content: content.to_string(),
            timestamp: Utc::now(),
        }
    }

    /// Shorthand for an assistant message, the usual terminator input.
    pub fn assistant(content: &str) -> Self {
        Self::new("assistant", content)
    }
}
