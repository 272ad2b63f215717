use crate::model::item::Item;
use crate::time::secs_from_millis;

/// How a round ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoundOutcome {
    Win,
    Lose,
}

impl RoundOutcome {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            RoundOutcome::Win => "WIN",
            RoundOutcome::Lose => "LOSE",
        }
    }
}

/// Immutable outcome of one round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundRecord {
    item: Item,
    elapsed_ms: u32,
    outcome: RoundOutcome,
    score: u32,
}

impl RoundRecord {
    #[must_use]
    pub fn win(item: Item, elapsed_ms: u32, score: u32) -> Self {
        Self {
            item,
            elapsed_ms,
            outcome: RoundOutcome::Win,
            score,
        }
    }

    #[must_use]
    pub fn lose(item: Item, elapsed_ms: u32) -> Self {
        Self {
            item,
            elapsed_ms,
            outcome: RoundOutcome::Lose,
            score: 0,
        }
    }

    #[must_use]
    pub fn item(&self) -> &Item {
        &self.item
    }

    #[must_use]
    pub fn elapsed_ms(&self) -> u32 {
        self.elapsed_ms
    }

    /// Time to answer in seconds.
    #[must_use]
    pub fn elapsed_secs(&self) -> f64 {
        secs_from_millis(self.elapsed_ms)
    }

    #[must_use]
    pub fn outcome(&self) -> RoundOutcome {
        self.outcome
    }

    #[must_use]
    pub fn is_win(&self) -> bool {
        self.outcome == RoundOutcome::Win
    }

    /// Points credited for the round.
    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }
}
