use crate::message::ResponseMessage;
use serde::{Deserialize, Serialize};

/// How reached conditions aggregate into a termination decision.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TerminationMode {
    /// Terminate once any single watched condition is reached (default).
    #[default]
    Any,
    /// Terminate only once every watched condition is reached.
    All,
}

impl TerminationMode {
    /// Human-readable name for display (e.g. in logs).
    pub fn display_name(&self) -> &str {
        match self {
            Self::Any => "any",
            Self::All => "all",
        }
    }
}

/// Latch state owned by every terminator strategy.
///
/// Starts clear. A strategy sets it exactly once, on its ACTIVE to TERMINATED
/// transition, and only `clear()` (via the strategy's `reset()`) reopens it.
#[derive(Debug, Clone, Default)]
pub struct TerminationState {
    pub terminated: bool,
    pub reason: Option<String>,
}

impl TerminationState {
    /// Set the terminated flag with the given reason.
    pub fn latch(&mut self, reason: String) {
        self.terminated = true;
        self.reason = Some(reason);
    }

    /// Clear the latch back to the active state.
    pub fn clear(&mut self) {
        self.terminated = false;
        self.reason = None;
    }

    /// Current `(terminated, reason)` verdict.
    pub fn verdict(&self) -> (bool, Option<String>) {
        (self.terminated, self.reason.clone())
    }
}

/// Terminator strategy trait — decides when a conversation should stop.
///
/// Implementations accumulate state across rounds. The hosting loop calls
/// `is_terminated` once per round, in turn order, with that round's batch of
/// messages, and may call `reset` to reuse the instance for a fresh
/// conversation. Calls are synchronous; a strategy holds no locks, so
/// concurrent use needs external synchronization (enforced by `&mut self`).
pub trait ResponseTerminator: Send {
    /// Human-readable strategy name.
    fn name(&self) -> &str;

    /// Inspect the newest batch of messages and decide whether to stop.
    fn is_terminated(&mut self, messages: &[ResponseMessage]) -> (bool, Option<String>);

    /// Clear all accumulated state for reuse on a new conversation.
    fn reset(&mut self);

    /// Read access to the latch.
    fn state(&self) -> &TerminationState;
}

/// Check strategies in order, returning the first terminated reason.
///
/// Every strategy sees the batch (so all counters stay current), but the
/// first terminated verdict wins.
pub fn first_terminated(
    terminators: &mut [Box<dyn ResponseTerminator>],
    messages: &[ResponseMessage],
) -> Option<String> {
    let mut verdict = None;
    for terminator in terminators.iter_mut() {
        let (terminated, reason) = terminator.is_terminated(messages);
        if terminated && verdict.is_none() {
            verdict = Some(reason.unwrap_or_else(|| terminator.name().to_string()));
        }
    }
    verdict
}
