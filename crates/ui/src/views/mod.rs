mod game;
mod state;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use game::{GameView, PlayingScreen, PredictionInput, ResultScreen, RoundResultScreen, StartScreen};
pub use state::{ViewError, ViewState, view_state_from_resource};
