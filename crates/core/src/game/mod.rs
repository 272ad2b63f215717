//! Round state machine.
//!
//! `Game::apply` is a pure transition: it updates the owned state and returns
//! the effects (ticker start/stop, delayed events) for the caller to run.
//! Nothing here sleeps or spawns.

mod event;
mod session;
mod snapshot;
mod summary;

use std::collections::HashSet;

use rand::Rng;

pub use event::{Effect, Feedback, GameEvent, GamePhase, RoundToken};
pub use session::Session;
pub use snapshot::GameSnapshot;
pub use summary::SessionSummary;

use crate::error::GameError;
use crate::model::{Item, ItemId, Locale, RoundRecord};
use crate::rules::GameRules;

#[derive(Debug, Clone)]
pub struct Game {
    catalog: Vec<Item>,
    rules: GameRules,
    phase: GamePhase,
    session: Option<Session>,
    sessions_started: u64,
    flashes: u64,
}

impl Game {
    /// Builds a game in `Start` over `catalog`. Items repeating an earlier id
    /// are dropped.
    ///
    /// # Errors
    ///
    /// Returns `GameError::EmptyCatalog` when `catalog` has no items.
    pub fn new(catalog: Vec<Item>, rules: GameRules) -> Result<Self, GameError> {
        if catalog.is_empty() {
            return Err(GameError::EmptyCatalog);
        }
        let mut seen = HashSet::new();
        let catalog = catalog
            .into_iter()
            .filter(|item| seen.insert(item.id().clone()))
            .collect();

        Ok(Self {
            catalog,
            rules,
            phase: GamePhase::Start,
            session: None,
            sessions_started: 0,
            flashes: 0,
        })
    }

    #[must_use]
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    #[must_use]
    pub fn rules(&self) -> &GameRules {
        &self.rules
    }

    #[must_use]
    pub fn catalog(&self) -> &[Item] {
        &self.catalog
    }

    #[must_use]
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Applies one event and returns the effects to execute, in order.
    ///
    /// Events that make no sense in the current phase are ignored and yield no
    /// effects. `rng` is only consulted when a session is drawn.
    ///
    /// # Errors
    ///
    /// Returns `GameError::InvalidGuessTarget` for a guess submitted while no
    /// round is in play. The state is left unchanged.
    pub fn apply<R: Rng + ?Sized>(
        &mut self,
        event: GameEvent,
        rng: &mut R,
    ) -> Result<Vec<Effect>, GameError> {
        let effects = match event {
            GameEvent::SelectLanguage(locale) => self.start_session(locale, rng),
            GameEvent::Tick => self.tick(),
            GameEvent::GuessSubmitted(id) => return self.guess(&id),
            GameEvent::FeedbackExpired { flash } => self.clear_flash(flash),
            GameEvent::RevealAnswer { token } => self.reveal_answer(token),
            GameEvent::Advance => self.advance(),
            GameEvent::Restart => self.restart(),
        };
        Ok(effects)
    }

    /// Result-screen data; `None` outside `Result`.
    #[must_use]
    pub fn summary(&self) -> Option<SessionSummary> {
        match (self.phase, &self.session) {
            (GamePhase::Result, Some(session)) => {
                Some(SessionSummary::from_records(session.records()))
            }
            _ => None,
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        let mut snap = GameSnapshot {
            phase: self.phase,
            catalog_size: self.catalog.len(),
            round_budget_ms: crate::time::millis(self.rules.round_budget()),
            summary: self.summary(),
            ..GameSnapshot::default()
        };
        if let Some(session) = &self.session {
            snap.locale = Some(session.locale());
            snap.round_index = session.round_index();
            snap.round_total = session.round_total();
            snap.score = session.score();
            snap.remaining_ms = session.clock().remaining_ms();
            snap.elapsed_ms = session.clock().elapsed_ms();
            snap.current_item = session.current_item().cloned();
            snap.feedback = session.feedback();
            snap.last_record = session.records().last().cloned();
            snap.records = session.records().to_vec();
        } else {
            snap.remaining_ms = snap.round_budget_ms;
        }
        snap
    }

    //
    // ─── TRANSITIONS ───────────────────────────────────────────────────────────
    //

    fn start_session<R: Rng + ?Sized>(&mut self, locale: Locale, rng: &mut R) -> Vec<Effect> {
        if self.phase != GamePhase::Start {
            return Vec::new();
        }
        self.sessions_started += 1;
        self.session = Some(Session::draw(
            self.sessions_started,
            &self.catalog,
            locale,
            &self.rules,
            rng,
        ));
        self.phase = GamePhase::Playing;
        vec![Effect::StartTicker]
    }

    fn tick(&mut self) -> Vec<Effect> {
        if self.phase != GamePhase::Playing {
            return Vec::new();
        }
        let step = self.rules.tick();
        let Some(session) = self.session.as_mut() else {
            return Vec::new();
        };
        if session.clock_mut().tick(step) && session.clock().is_expired() {
            return self.expire();
        }
        Vec::new()
    }

    fn guess(&mut self, guess: &ItemId) -> Result<Vec<Effect>, GameError> {
        if self.phase != GamePhase::Playing {
            return Err(GameError::InvalidGuessTarget);
        }
        let rules = self.rules;
        let Some(session) = self.session.as_mut() else {
            return Err(GameError::InvalidGuessTarget);
        };
        if session.clock().is_frozen() {
            return Ok(Vec::new());
        }
        // Expiry is settled before the guess is looked at.
        if session.clock().is_expired() {
            return Ok(self.expire());
        }
        let Some(item) = session.current_item().cloned() else {
            return Err(GameError::InvalidGuessTarget);
        };

        if item.id() == guess {
            let clock = session.clock_mut();
            clock.freeze();
            let score = clock.whole_secs_remaining();
            let elapsed = clock.elapsed_ms();
            session.settle(RoundRecord::win(item, elapsed, score));
            session.set_feedback(Some(Feedback::Correct));
            Ok(vec![
                Effect::StopTicker,
                Effect::Schedule {
                    after: rules.correct_ack(),
                    event: GameEvent::RevealAnswer {
                        token: session.token(),
                    },
                },
            ])
        } else {
            session.clock_mut().penalize(rules.penalty());
            self.flashes += 1;
            let flash = self.flashes;
            session.set_feedback(Some(Feedback::Wrong { flash }));
            Ok(vec![Effect::Schedule {
                after: rules.wrong_flash(),
                event: GameEvent::FeedbackExpired { flash },
            }])
        }
    }

    fn expire(&mut self) -> Vec<Effect> {
        if let Some(session) = self.session.as_mut() {
            let unsettled = if session.is_settled() {
                None
            } else {
                session.current_item().cloned()
            };
            if let Some(item) = unsettled {
                let elapsed = session.clock().ceiling_ms();
                session.clock_mut().freeze();
                session.set_feedback(None);
                session.settle(RoundRecord::lose(item, elapsed));
            }
        }
        self.phase = GamePhase::RoundResult;
        vec![Effect::StopTicker]
    }

    fn clear_flash(&mut self, flash: u64) -> Vec<Effect> {
        if let Some(session) = self.session.as_mut() {
            if session.feedback() == Some(Feedback::Wrong { flash }) {
                session.set_feedback(None);
            }
        }
        Vec::new()
    }

    fn reveal_answer(&mut self, token: RoundToken) -> Vec<Effect> {
        let current = self
            .session
            .as_ref()
            .is_some_and(|s| s.token() == token && s.clock().is_frozen());
        if self.phase == GamePhase::Playing && current {
            self.phase = GamePhase::RoundResult;
        }
        Vec::new()
    }

    fn advance(&mut self) -> Vec<Effect> {
        if self.phase != GamePhase::RoundResult {
            return Vec::new();
        }
        let Some(session) = self.session.as_mut() else {
            return Vec::new();
        };
        if session.is_last_round() {
            self.phase = GamePhase::Result;
            return Vec::new();
        }
        session.next_round();
        self.phase = GamePhase::Playing;
        vec![Effect::StartTicker]
    }

    fn restart(&mut self) -> Vec<Effect> {
        let was_playing = self.phase == GamePhase::Playing;
        self.session = None;
        self.phase = GamePhase::Start;
        if was_playing {
            vec![Effect::StopTicker]
        } else {
            Vec::new()
        }
    }
}
