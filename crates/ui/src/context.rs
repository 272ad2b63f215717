use std::sync::Arc;

use services::{GameLoopService, ImageLoader};

pub trait UiApp: Send + Sync {
    fn game_loop(&self) -> Arc<GameLoopService>;
    fn images(&self) -> Arc<ImageLoader>;
}

#[derive(Clone)]
pub struct AppContext {
    game_loop: Arc<GameLoopService>,
    images: Arc<ImageLoader>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            game_loop: app.game_loop(),
            images: app.images(),
        }
    }

    #[must_use]
    pub fn game_loop(&self) -> Arc<GameLoopService> {
        Arc::clone(&self.game_loop)
    }

    #[must_use]
    pub fn images(&self) -> Arc<ImageLoader> {
        Arc::clone(&self.images)
    }
}

// This context is provided by the application composition root (`crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
