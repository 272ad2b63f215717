//! Effect layer around the round state machine.
//!
//! A `GameRunner` task owns the `Game` and is the only thing that mutates it.
//! Player input, ticks and delayed events all arrive on one channel and are
//! applied in order; snapshots go out through a `watch` channel.

use std::sync::Arc;
use std::time::Duration;

use guess_core::game::{Effect, Game, GameEvent, GamePhase, GameSnapshot};
use guess_core::model::{Item, ItemId, Locale};
use guess_core::{GameError, GameRules};
use rand::SeedableRng;
use rand::rngs::StdRng;
use storage::repository::ItemRepository;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::error::GameLoopError;

#[derive(Debug)]
enum Command {
    Event(GameEvent),
    Tick { generation: u64 },
}

/// Loads the catalog and starts game runners.
#[derive(Clone)]
pub struct GameLoopService {
    items: Arc<dyn ItemRepository>,
    rules: GameRules,
    seed: Option<u64>,
}

impl GameLoopService {
    #[must_use]
    pub fn new(items: Arc<dyn ItemRepository>) -> Self {
        Self {
            items,
            rules: GameRules::default(),
            seed: None,
        }
    }

    #[must_use]
    pub fn with_rules(mut self, rules: GameRules) -> Self {
        self.rules = rules;
        self
    }

    /// Fixes the round draw for reproducible sessions.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    #[must_use]
    pub fn rules(&self) -> &GameRules {
        &self.rules
    }

    /// Load the catalog and spawn a runner in the `Start` phase.
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns `GameLoopError::CatalogLoad` if the catalog cannot be read and
    /// `GameLoopError::EmptyCatalog` if it has no items.
    pub async fn start(&self) -> Result<GameHandle, GameLoopError> {
        let catalog = self.items.list_items().await.map_err(|err| {
            warn!(error = %err, "catalog load failed");
            GameLoopError::CatalogLoad(err)
        })?;
        info!(items = catalog.len(), "catalog loaded");

        let game = Game::new(catalog, self.rules).map_err(|_| GameLoopError::EmptyCatalog)?;
        let rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Ok(GameRunner::spawn(game, rng))
    }
}

/// Cloneable front door to a running game.
///
/// The runner stops once every handle is dropped, taking its ticker with it.
#[derive(Clone, Debug)]
pub struct GameHandle {
    tx: mpsc::UnboundedSender<Command>,
    snapshots: watch::Receiver<GameSnapshot>,
    catalog: Arc<[Item]>,
}

/// Two handles are equal when they drive the same runner.
impl PartialEq for GameHandle {
    fn eq(&self, other: &Self) -> bool {
        self.tx.same_channel(&other.tx)
    }
}

impl GameHandle {
    /// The deduplicated catalog the game draws from, for guess matching.
    #[must_use]
    pub fn catalog(&self) -> Arc<[Item]> {
        Arc::clone(&self.catalog)
    }

    /// # Errors
    ///
    /// Returns `GameLoopError::Closed` if the runner has stopped.
    pub fn select_language(&self, locale: Locale) -> Result<(), GameLoopError> {
        self.send(GameEvent::SelectLanguage(locale))
    }

    /// Submit the item confirmed in the prediction input.
    ///
    /// # Errors
    ///
    /// Returns `GameLoopError::Closed` if the runner has stopped.
    pub fn submit_guess(&self, id: ItemId) -> Result<(), GameLoopError> {
        self.send(GameEvent::GuessSubmitted(id))
    }

    /// # Errors
    ///
    /// Returns `GameLoopError::Closed` if the runner has stopped.
    pub fn advance(&self) -> Result<(), GameLoopError> {
        self.send(GameEvent::Advance)
    }

    /// # Errors
    ///
    /// Returns `GameLoopError::Closed` if the runner has stopped.
    pub fn restart(&self) -> Result<(), GameLoopError> {
        self.send(GameEvent::Restart)
    }

    /// Latest published state.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        self.snapshots.borrow().clone()
    }

    /// A fresh receiver for snapshot updates.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<GameSnapshot> {
        self.snapshots.clone()
    }

    /// Waits for the next published snapshot.
    ///
    /// # Errors
    ///
    /// Returns `GameLoopError::Closed` if the runner has stopped.
    pub async fn changed(&mut self) -> Result<GameSnapshot, GameLoopError> {
        self.snapshots
            .changed()
            .await
            .map_err(|_| GameLoopError::Closed)?;
        Ok(self.snapshots.borrow_and_update().clone())
    }

    fn send(&self, event: GameEvent) -> Result<(), GameLoopError> {
        self.tx
            .send(Command::Event(event))
            .map_err(|_| GameLoopError::Closed)
    }
}

/// Repeating round tick. Dropping it cancels the task.
struct Ticker {
    generation: u64,
    task: JoinHandle<()>,
}

impl Ticker {
    fn spawn(generation: u64, period: Duration, tx: mpsc::WeakUnboundedSender<Command>) -> Self {
        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                let Some(tx) = tx.upgrade() else { break };
                if tx.send(Command::Tick { generation }).is_err() {
                    break;
                }
            }
        });
        Self { generation, task }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.task.abort();
    }
}

struct GameRunner {
    game: Game,
    rng: StdRng,
    rx: mpsc::UnboundedReceiver<Command>,
    tx: mpsc::WeakUnboundedSender<Command>,
    snapshots: watch::Sender<GameSnapshot>,
    ticker: Option<Ticker>,
    generations: u64,
}

impl GameRunner {
    fn spawn(game: Game, rng: StdRng) -> GameHandle {
        let (tx, rx) = mpsc::unbounded_channel();
        let (snap_tx, snap_rx) = watch::channel(game.snapshot());
        let catalog: Arc<[Item]> = Arc::from(game.catalog());
        let runner = Self {
            game,
            rng,
            rx,
            tx: tx.downgrade(),
            snapshots: snap_tx,
            ticker: None,
            generations: 0,
        };
        tokio::spawn(runner.run());
        GameHandle {
            tx,
            snapshots: snap_rx,
            catalog,
        }
    }

    async fn run(mut self) {
        while let Some(command) = self.rx.recv().await {
            match command {
                Command::Event(event) => self.dispatch(event),
                Command::Tick { generation } => {
                    if self.ticker.as_ref().is_some_and(|t| t.generation == generation) {
                        self.dispatch(GameEvent::Tick);
                    } else {
                        debug!(generation, "stale tick dropped");
                    }
                }
            }
        }
        debug!("game runner stopped");
    }

    fn dispatch(&mut self, event: GameEvent) {
        let name = event.name();
        let before = self.game.phase();
        match self.game.apply(event, &mut self.rng) {
            Ok(effects) => {
                for effect in effects {
                    self.execute(effect);
                }
            }
            Err(GameError::InvalidGuessTarget) => {
                debug!(event = name, phase = before.label(), "guess ignored, no active round");
            }
            Err(err) => warn!(event = name, error = %err, "event rejected"),
        }

        let after = self.game.phase();
        if before != after {
            info!(from = before.label(), to = after.label(), event = name, "phase changed");
            if after == GamePhase::Result {
                if let Some(summary) = self.game.summary() {
                    info!(score = summary.total_score(), wins = summary.wins(), "session finished");
                }
            }
        }
        self.snapshots.send_replace(self.game.snapshot());
    }

    fn execute(&mut self, effect: Effect) {
        match effect {
            Effect::StartTicker => {
                self.generations += 1;
                // Replacing the old ticker drops and cancels it.
                self.ticker = Some(Ticker::spawn(
                    self.generations,
                    self.game.rules().tick(),
                    self.tx.clone(),
                ));
            }
            Effect::StopTicker => {
                self.ticker = None;
            }
            Effect::Schedule { after, event } => {
                let tx = self.tx.clone();
                tokio::spawn(async move {
                    tokio::time::sleep(after).await;
                    if let Some(tx) = tx.upgrade() {
                        let _ = tx.send(Command::Event(event));
                    }
                });
            }
        }
    }
}
