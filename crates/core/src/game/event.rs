use std::time::Duration;

use crate::model::{ItemId, Locale};

/// Where the game currently is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum GamePhase {
    /// Catalog loaded, no session.
    #[default]
    Start,
    /// Round active, clock running, guesses accepted.
    Playing,
    /// Answer revealed, clock frozen, waiting for `Advance`.
    RoundResult,
    /// Session summary; terminal until `Restart`.
    Result,
}

impl GamePhase {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            GamePhase::Start => "START",
            GamePhase::Playing => "PLAYING",
            GamePhase::RoundResult => "ROUND_RESULT",
            GamePhase::Result => "RESULT",
        }
    }
}

/// Transient acknowledgment shown while playing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feedback {
    Correct,
    /// `flash` identifies this particular flash so an older expiry cannot clear it.
    Wrong { flash: u64 },
}

/// Identifies one round of one session.
///
/// Delayed events carry it so they can be dropped once the round they were
/// scheduled for is gone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RoundToken {
    pub(crate) session: u64,
    pub(crate) round: usize,
}

/// Inputs to the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    SelectLanguage(Locale),
    Tick,
    GuessSubmitted(ItemId),
    FeedbackExpired { flash: u64 },
    RevealAnswer { token: RoundToken },
    Advance,
    Restart,
}

impl GameEvent {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            GameEvent::SelectLanguage(_) => "select_language",
            GameEvent::Tick => "tick",
            GameEvent::GuessSubmitted(_) => "guess_submitted",
            GameEvent::FeedbackExpired { .. } => "feedback_expired",
            GameEvent::RevealAnswer { .. } => "reveal_answer",
            GameEvent::Advance => "advance",
            GameEvent::Restart => "restart",
        }
    }
}

/// Work the effect layer must perform after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Start the repeating round tick.
    StartTicker,
    /// Cancel the repeating round tick.
    StopTicker,
    /// Deliver `event` back to the machine after `after`.
    Schedule { after: Duration, event: GameEvent },
}
