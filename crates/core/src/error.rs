use thiserror::Error;

/// Conditions reported by the round state machine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GameError {
    /// The catalog has no items, so no session can start.
    #[error("catalog has no items to play")]
    EmptyCatalog,

    /// A guess arrived while no round was accepting guesses.
    #[error("guess submitted with no active round")]
    InvalidGuessTarget,
}
