use guess_core::model::{ImageRef, Item, ItemId};
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

use crate::repository::StorageError;

pub(crate) fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

pub(crate) fn conn<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Connection(e.to_string())
}

/// Stored form of an image reference: the URL, or the path as text.
pub(crate) fn image_to_text(image: &ImageRef) -> String {
    image.to_string()
}

pub(crate) fn map_item_row(row: &SqliteRow) -> Result<Item, StorageError> {
    let id = ItemId::new(row.try_get::<String, _>("id").map_err(ser)?).map_err(ser)?;
    let image =
        ImageRef::from_link(row.try_get::<String, _>("image_url").map_err(ser)?).map_err(ser)?;

    Item::new(
        id,
        row.try_get::<String, _>("name_jp").map_err(ser)?,
        row.try_get::<String, _>("name_kr").map_err(ser)?,
        image,
        row.try_get("created_at").map_err(ser)?,
    )
    .map_err(ser)
}
