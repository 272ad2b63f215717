use crate::game::event::{Feedback, GamePhase};
use crate::game::summary::SessionSummary;
use crate::model::{Item, Locale, RoundRecord};
use crate::reveal::{FULL_CLARITY, reveal_progress};
use crate::time::secs_from_millis;

/// Read-only copy of the game state for rendering.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GameSnapshot {
    pub phase: GamePhase,
    pub catalog_size: usize,
    pub locale: Option<Locale>,
    /// Zero-based.
    pub round_index: usize,
    pub round_total: usize,
    pub score: u32,
    pub round_budget_ms: u32,
    pub remaining_ms: u32,
    pub elapsed_ms: u32,
    pub current_item: Option<Item>,
    pub feedback: Option<Feedback>,
    pub last_record: Option<RoundRecord>,
    pub records: Vec<RoundRecord>,
    pub summary: Option<SessionSummary>,
}

impl GameSnapshot {
    #[must_use]
    pub fn remaining_secs(&self) -> f64 {
        secs_from_millis(self.remaining_ms)
    }

    #[must_use]
    pub fn elapsed_secs(&self) -> f64 {
        secs_from_millis(self.elapsed_ms)
    }

    /// Mosaic clarity for the current screen: the time curve while playing,
    /// fully clear once the answer is shown.
    #[must_use]
    pub fn reveal_progress(&self) -> f64 {
        match self.phase {
            GamePhase::Playing => reveal_progress(self.elapsed_secs()),
            GamePhase::RoundResult => FULL_CLARITY,
            GamePhase::Start | GamePhase::Result => 0.0,
        }
    }

    /// One-based round number for display.
    #[must_use]
    pub fn round_number(&self) -> usize {
        self.round_index + 1
    }

    #[must_use]
    pub fn is_frozen(&self) -> bool {
        matches!(self.feedback, Some(Feedback::Correct))
    }
}
