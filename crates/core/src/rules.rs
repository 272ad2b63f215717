use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_ROUND_COUNT: usize = 10;
pub const DEFAULT_ROUND_BUDGET: Duration = Duration::from_secs(30);
pub const DEFAULT_PENALTY: Duration = Duration::from_secs(5);
pub const DEFAULT_TICK: Duration = Duration::from_millis(100);
pub const DEFAULT_CORRECT_ACK: Duration = Duration::from_millis(1000);
pub const DEFAULT_WRONG_FLASH: Duration = Duration::from_millis(500);

const MAX_ROUND_BUDGET: Duration = Duration::from_secs(3600);

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GameRulesError {
    #[error("round count must be > 0")]
    InvalidRoundCount,

    #[error("round budget must be between 1ms and 1 hour")]
    InvalidRoundBudget,

    #[error("tick must be > 0 and no longer than the round budget")]
    InvalidTick,

    #[error("penalty must be no longer than the round budget")]
    InvalidPenalty,
}

/// Timing and sizing rules for a play session.
///
/// Defaults: 10 rounds, 30 s per round, 5 s wrong-guess penalty, 100 ms tick,
/// 1 s "correct" acknowledgment and a 0.5 s "wrong" flash.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameRules {
    round_count: usize,
    round_budget: Duration,
    penalty: Duration,
    tick: Duration,
    correct_ack: Duration,
    wrong_flash: Duration,
}

impl GameRules {
    /// # Errors
    ///
    /// Returns `GameRulesError` when any value is out of range.
    pub fn new(
        round_count: usize,
        round_budget: Duration,
        penalty: Duration,
        tick: Duration,
    ) -> Result<Self, GameRulesError> {
        if round_count == 0 {
            return Err(GameRulesError::InvalidRoundCount);
        }
        if round_budget < Duration::from_millis(1) || round_budget > MAX_ROUND_BUDGET {
            return Err(GameRulesError::InvalidRoundBudget);
        }
        if tick.is_zero() || tick > round_budget {
            return Err(GameRulesError::InvalidTick);
        }
        if penalty > round_budget {
            return Err(GameRulesError::InvalidPenalty);
        }

        Ok(Self {
            round_count,
            round_budget,
            penalty,
            tick,
            correct_ack: DEFAULT_CORRECT_ACK,
            wrong_flash: DEFAULT_WRONG_FLASH,
        })
    }

    #[must_use]
    pub fn with_feedback_delays(mut self, correct_ack: Duration, wrong_flash: Duration) -> Self {
        self.correct_ack = correct_ack;
        self.wrong_flash = wrong_flash;
        self
    }

    /// Maximum number of rounds per session.
    #[must_use]
    pub fn round_count(&self) -> usize {
        self.round_count
    }

    #[must_use]
    pub fn round_budget(&self) -> Duration {
        self.round_budget
    }

    #[must_use]
    pub fn penalty(&self) -> Duration {
        self.penalty
    }

    #[must_use]
    pub fn tick(&self) -> Duration {
        self.tick
    }

    /// Delay between a correct guess and the answer reveal.
    #[must_use]
    pub fn correct_ack(&self) -> Duration {
        self.correct_ack
    }

    /// How long the "wrong" flash stays up.
    #[must_use]
    pub fn wrong_flash(&self) -> Duration {
        self.wrong_flash
    }
}

impl Default for GameRules {
    fn default() -> Self {
        Self {
            round_count: DEFAULT_ROUND_COUNT,
            round_budget: DEFAULT_ROUND_BUDGET,
            penalty: DEFAULT_PENALTY,
            tick: DEFAULT_TICK,
            correct_ack: DEFAULT_CORRECT_ACK,
            wrong_flash: DEFAULT_WRONG_FLASH,
        }
    }
}
