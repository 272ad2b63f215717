//! Catalog import from a JSON export.
//!
//! The file is an array of `{ "id", "nameJp", "nameKr", "imageUrl" }`
//! objects. Drive share links are rewritten to their thumbnail form on the
//! way in.

use chrono::{DateTime, Duration, Utc};
use guess_core::model::{ItemDraft, ItemError};
use thiserror::Error;

use crate::repository::{ItemRepository, StorageError};

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SeedError {
    #[error("invalid catalog json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("entry {index} is invalid: {source}")]
    Item {
        index: usize,
        #[source]
        source: ItemError,
    },

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Parses a catalog export.
///
/// # Errors
///
/// Returns `SeedError::Json` if the document is not an array of drafts.
pub fn parse_catalog(json: &str) -> Result<Vec<ItemDraft>, SeedError> {
    Ok(serde_json::from_str(json)?)
}

/// Validates every draft, then upserts them in file order.
///
/// Entries are stamped one millisecond apart from `now` so the stored order
/// follows the file. Nothing is written if any entry is invalid.
///
/// # Errors
///
/// Returns `SeedError::Item` for the first invalid entry, or
/// `SeedError::Storage` if a write fails.
pub async fn import_catalog(
    repo: &dyn ItemRepository,
    drafts: Vec<ItemDraft>,
    now: DateTime<Utc>,
) -> Result<usize, SeedError> {
    let mut items = Vec::with_capacity(drafts.len());
    let mut stamp = now;
    for (index, draft) in drafts.into_iter().enumerate() {
        let item = draft
            .validate(stamp)
            .map_err(|source| SeedError::Item { index, source })?;
        items.push(item);
        stamp += Duration::milliseconds(1);
    }

    for item in &items {
        repo.upsert_item(item).await?;
    }
    Ok(items.len())
}
