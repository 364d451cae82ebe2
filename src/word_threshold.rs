//! Word-threshold termination strategy.
//!
//! Watches a set of words across every round of a conversation and latches
//! once their cumulative recurrence reaches configured thresholds.

use std::collections::BTreeMap;

use tracing::debug;

use crate::error::TerminatorError;
use crate::message::ResponseMessage;
use crate::traits::{ResponseTerminator, TerminationMode, TerminationState};

/// Terminates a conversation once watched words have recurred often enough.
///
/// Running counters accumulate across calls: each call scans the newest batch
/// of messages and bumps a word's counter once per message containing it. A
/// word whose counter reaches its threshold counts as reached;
/// [`TerminationMode`] decides whether one reached word suffices (`Any`) or
/// every watched word must be reached (`All`).
pub struct WordThresholdTerminator {
    words: BTreeMap<String, u32>,
    case_sensitive: bool,
    mode: TerminationMode,
    counts: BTreeMap<String, u32>,
    state: TerminationState,
}

impl WordThresholdTerminator {
    /// Create a terminator from a watch specification.
    ///
    /// Fails if `words` is empty or any threshold is zero.
    pub fn new(
        words: BTreeMap<String, u32>,
        case_sensitive: bool,
        mode: TerminationMode,
    ) -> Result<Self, TerminatorError> {
        if words.is_empty() {
            return Err(TerminatorError::Config(
                "word threshold spec cannot be empty".to_string(),
            ));
        }
        for (word, threshold) in &words {
            if *threshold == 0 {
                return Err(TerminatorError::Config(format!(
                    "threshold for word `{word}` must be larger than 0, got `{threshold}`"
                )));
            }
        }
        Ok(Self {
            words,
            case_sensitive,
            mode,
            counts: BTreeMap::new(),
            state: TerminationState::default(),
        })
    }

    /// Case-insensitive terminator with `Any` aggregation — the usual setup.
    pub fn with_words(words: BTreeMap<String, u32>) -> Result<Self, TerminatorError> {
        Self::new(words, false, TerminationMode::Any)
    }

    /// Update running counters from the batch.
    ///
    /// A counter increments once per message containing the word, no matter
    /// how many times the word occurs inside that message.
    fn scan(&mut self, messages: &[ResponseMessage]) {
        for word in self.words.keys() {
            let needle = if self.case_sensitive {
                word.to_string()
            } else {
                word.to_lowercase()
            };
            for message in messages {
                let contains = if self.case_sensitive {
                    message.content.contains(&needle)
                } else {
                    message.content.to_lowercase().contains(&needle)
                };
                if contains {
                    *self.counts.entry(word.clone()).or_insert(0) += 1;
                }
            }
        }
    }

    /// One reason line per word whose running count has reached its threshold.
    fn reached_reasons(&self) -> Vec<String> {
        self.counts
            .iter()
            .filter(|(word, count)| **count >= self.words[*word])
            .map(|(word, count)| {
                format!(
                    "word `{word}` appeared in {count} messages, reaching termination threshold {}",
                    self.words[word]
                )
            })
            .collect()
    }
}

impl ResponseTerminator for WordThresholdTerminator {
    fn name(&self) -> &str {
        "word_threshold"
    }

    fn is_terminated(&mut self, messages: &[ResponseMessage]) -> (bool, Option<String>) {
        if self.state.terminated {
            return self.state.verdict();
        }

        self.scan(messages);
        let reasons = self.reached_reasons();

        let should_latch = match self.mode {
            TerminationMode::Any => !reasons.is_empty(),
            TerminationMode::All => reasons.len() == self.words.len(),
        };
        if should_latch {
            debug!(
                mode = self.mode.display_name(),
                reached = reasons.len(),
                "word threshold terminator latched"
            );
            self.state.latch(reasons.join("\n"));
        }
        self.state.verdict()
    }

    fn reset(&mut self) {
        self.counts.clear();
        self.state.clear();
    }

    fn state(&self) -> &TerminationState {
        &self.state
    }
}
