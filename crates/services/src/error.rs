//! Shared error types for the services crate.

use thiserror::Error;

use guess_core::model::ItemError;
use storage::repository::StorageError;
use storage::seed::SeedError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by `CatalogService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogServiceError {
    #[error(transparent)]
    Item(#[from] ItemError),
    #[error(transparent)]
    Seed(#[from] SeedError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while starting or talking to a game loop.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GameLoopError {
    #[error("catalog could not be loaded: {0}")]
    CatalogLoad(#[from] StorageError),
    #[error("catalog has no items to play")]
    EmptyCatalog,
    #[error("game loop has stopped")]
    Closed,
}

/// Errors emitted by `ImageLoader`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ImageLoadError {
    #[error("image request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("image could not be decoded: {0}")]
    Decode(#[from] image::ImageError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
}
