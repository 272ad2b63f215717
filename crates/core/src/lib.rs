#![forbid(unsafe_code)]

pub mod clock;
pub mod error;
pub mod game;
pub mod model;
pub mod reveal;
pub mod rules;
pub mod time;

pub use clock::RoundClock;
pub use error::GameError;
pub use game::{Effect, Game, GameEvent, GamePhase, GameSnapshot};
pub use rules::{GameRules, GameRulesError};
pub use time::Clock;
