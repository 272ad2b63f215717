use std::sync::Arc;

use guess_core::GameRules;
use storage::repository::Storage;

use crate::Clock;
use crate::catalog_service::CatalogService;
use crate::error::AppServicesError;
use crate::game_loop::GameLoopService;
use crate::images::ImageLoader;

/// Assembles the services the UI talks to.
#[derive(Clone)]
pub struct AppServices {
    catalog: Arc<CatalogService>,
    game_loop: Arc<GameLoopService>,
    images: Arc<ImageLoader>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails.
    pub async fn new_sqlite(
        db_url: &str,
        clock: Clock,
        rules: GameRules,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Ok(Self::from_storage(&storage, clock, rules))
    }

    #[must_use]
    pub fn from_storage(storage: &Storage, clock: Clock, rules: GameRules) -> Self {
        let catalog = Arc::new(CatalogService::new(clock, Arc::clone(&storage.items)));
        let game_loop =
            Arc::new(GameLoopService::new(Arc::clone(&storage.items)).with_rules(rules));
        Self {
            catalog,
            game_loop,
            images: Arc::new(ImageLoader::new()),
        }
    }

    #[must_use]
    pub fn catalog(&self) -> Arc<CatalogService> {
        Arc::clone(&self.catalog)
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
