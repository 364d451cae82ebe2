//! Round-limit termination strategy.

use tracing::debug;

use crate::error::TerminatorError;
use crate::message::ResponseMessage;
use crate::traits::{ResponseTerminator, TerminationState};

/// Terminates a conversation after a fixed number of rounds.
///
/// Every non-latched `is_terminated` call counts one round, whatever the
/// batch size.
pub struct RoundLimitTerminator {
    max_rounds: u32,
    rounds: u32,
    state: TerminationState,
}

impl RoundLimitTerminator {
    /// Create a terminator that stops after `max_rounds` rounds.
    ///
    /// Fails if `max_rounds` is zero.
    pub fn new(max_rounds: u32) -> Result<Self, TerminatorError> {
        if max_rounds == 0 {
            return Err(TerminatorError::Config(
                "max_rounds must be larger than 0".to_string(),
            ));
        }
        Ok(Self {
            max_rounds,
            rounds: 0,
            state: TerminationState::default(),
        })
    }
}

impl ResponseTerminator for RoundLimitTerminator {
    fn name(&self) -> &str {
        "round_limit"
    }

    fn is_terminated(&mut self, _messages: &[ResponseMessage]) -> (bool, Option<String>) {
        if self.state.terminated {
            return self.state.verdict();
        }
        self.rounds += 1;
        if self.rounds >= self.max_rounds {
            debug!(rounds = self.rounds, "round limit terminator latched");
            self.state.latch(format!(
                "conversation ran {} rounds, reaching round limit {}",
                self.rounds, self.max_rounds
            ));
        }
        self.state.verdict()
    }

    fn reset(&mut self) {
        self.rounds = 0;
        self.state.clear();
    }

    fn state(&self) -> &TerminationState {
        &self.state
    }
}
