use std::time::Duration;

use crate::rules::GameRules;
use crate::time::{millis, secs_from_millis};

/// Remaining time budget for the active round.
///
/// Kept in whole milliseconds so repeated 100 ms steps land exactly on zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundClock {
    ceiling_ms: u32,
    remaining_ms: u32,
    frozen: bool,
}

impl RoundClock {
    #[must_use]
    pub fn new(ceiling: Duration) -> Self {
        let ceiling_ms = millis(ceiling);
        Self {
            ceiling_ms,
            remaining_ms: ceiling_ms,
            frozen: false,
        }
    }

    #[must_use]
    pub fn from_rules(rules: &GameRules) -> Self {
        Self::new(rules.round_budget())
    }

    /// Sets the remaining time, clamped to the ceiling.
    #[must_use]
    pub fn with_remaining(mut self, remaining: Duration) -> Self {
        self.remaining_ms = millis(remaining).min(self.ceiling_ms);
        self
    }

    /// Back to the ceiling, unfrozen.
    pub fn reset(&mut self) {
        self.remaining_ms = self.ceiling_ms;
        self.frozen = false;
    }

    /// Decrements by `step`, floored at zero. Returns false when frozen.
    pub fn tick(&mut self, step: Duration) -> bool {
        if self.frozen {
            return false;
        }
        self.remaining_ms = self.remaining_ms.saturating_sub(millis(step));
        true
    }

    /// Subtracts a wrong-guess penalty, floored at zero.
    pub fn penalize(&mut self, penalty: Duration) {
        if !self.frozen {
            self.remaining_ms = self.remaining_ms.saturating_sub(millis(penalty));
        }
    }

    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    #[must_use]
    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.remaining_ms == 0
    }

    #[must_use]
    pub fn ceiling_ms(&self) -> u32 {
        self.ceiling_ms
    }

    #[must_use]
    pub fn remaining_ms(&self) -> u32 {
        self.remaining_ms
    }

    #[must_use]
    pub fn remaining_secs(&self) -> f64 {
        secs_from_millis(self.remaining_ms)
    }

    #[must_use]
    pub fn elapsed_ms(&self) -> u32 {
        self.ceiling_ms - self.remaining_ms
    }

    #[must_use]
    pub fn elapsed_secs(&self) -> f64 {
        secs_from_millis(self.elapsed_ms())
    }

    /// Remaining time rounded up to whole seconds; the points for a correct guess.
    #[must_use]
    pub fn whole_secs_remaining(&self) -> u32 {
        self.remaining_ms.div_ceil(1000)
    }
}
