#![forbid(unsafe_code)]

pub mod app_services;
pub mod catalog_service;
pub mod error;
pub mod game_loop;
pub mod images;
pub mod prediction;

pub use guess_core::Clock;

pub use app_services::AppServices;
pub use catalog_service::CatalogService;
pub use error::{AppServicesError, CatalogServiceError, GameLoopError, ImageLoadError};
pub use game_loop::{GameHandle, GameLoopService};
pub use images::{ImageLoader, mosaic_png};
pub use prediction::{MAX_CANDIDATES, PredictionSearch};
