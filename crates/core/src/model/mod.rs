mod ids;
mod image;
mod item;
mod record;

pub use ids::{EmptyItemId, ItemId};
pub use image::{ImageRef, ImageRefError, drive_file_id, drive_thumbnail_url};
pub use item::{Item, ItemDraft, ItemError, Locale};
pub use record::{RoundOutcome, RoundRecord};
