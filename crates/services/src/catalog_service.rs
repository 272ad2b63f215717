use std::sync::Arc;

use guess_core::model::{Item, ItemDraft, ItemId};
use storage::repository::ItemRepository;
use storage::seed::{import_catalog, parse_catalog};
use tracing::{debug, info};

use crate::Clock;
use crate::error::CatalogServiceError;

/// Reads and edits the quiz catalog.
#[derive(Clone)]
pub struct CatalogService {
    clock: Clock,
    items: Arc<dyn ItemRepository>,
}

impl CatalogService {
    #[must_use]
    pub fn new(clock: Clock, items: Arc<dyn ItemRepository>) -> Self {
        Self { clock, items }
    }

    /// # Errors
    ///
    /// Returns `CatalogServiceError::Storage` if repository access fails.
    pub async fn list_items(&self) -> Result<Vec<Item>, CatalogServiceError> {
        let items = self.items.list_items().await?;
        debug!(count = items.len(), "catalog listed");
        Ok(items)
    }

    /// Validate a draft and store it. An existing id is updated in place.
    ///
    /// # Errors
    ///
    /// Returns `CatalogServiceError::Item` for validation failures.
    /// Returns `CatalogServiceError::Storage` if persistence fails.
    pub async fn save_draft(&self, draft: ItemDraft) -> Result<Item, CatalogServiceError> {
        let item = draft.validate(self.clock.now())?;
        self.items.upsert_item(&item).await?;
        info!(id = %item.id(), "catalog item saved");
        Ok(item)
    }

    /// # Errors
    ///
    /// Returns `CatalogServiceError::Storage` if the item is missing or
    /// repository access fails.
    pub async fn delete_item(&self, id: &ItemId) -> Result<(), CatalogServiceError> {
        self.items.delete_item(id).await?;
        info!(id = %id, "catalog item deleted");
        Ok(())
    }

    /// Import a JSON catalog export. Returns the number of items written.
    ///
    /// # Errors
    ///
    /// Returns `CatalogServiceError::Seed` if the document or an entry is
    /// invalid, or a write fails.
    pub async fn import_json(&self, json: &str) -> Result<usize, CatalogServiceError> {
        let drafts = parse_catalog(json)?;
        let count = import_catalog(self.items.as_ref(), drafts, self.clock.now()).await?;
        info!(count, "catalog imported");
        Ok(count)
    }
}
