use guess_core::model::{Item, ItemId};

use super::SqliteRepository;
use super::mapping::{conn, image_to_text, map_item_row};
use crate::repository::{ItemRepository, StorageError};

#[async_trait::async_trait]
impl ItemRepository for SqliteRepository {
    async fn list_items(&self) -> Result<Vec<Item>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT id, name_jp, name_kr, image_url, created_at
            FROM items
            ORDER BY created_at ASC, id ASC
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(conn)?;

        rows.iter().map(map_item_row).collect()
    }

    async fn get_item(&self, id: &ItemId) -> Result<Item, StorageError> {
        let row = sqlx::query(
            r"
            SELECT id, name_jp, name_kr, image_url, created_at
            FROM items WHERE id = ?1
            ",
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(conn)?;

        match row {
            Some(row) => map_item_row(&row),
            None => Err(StorageError::NotFound),
        }
    }

    async fn upsert_item(&self, item: &Item) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO items (id, name_jp, name_kr, image_url, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ON CONFLICT(id) DO UPDATE SET
                name_jp = excluded.name_jp,
                name_kr = excluded.name_kr,
                image_url = excluded.image_url
            ",
        )
        .bind(item.id().as_str())
        .bind(item.name_jp())
        .bind(item.name_kr())
        .bind(image_to_text(item.image()))
        .bind(item.created_at())
        .execute(&self.pool)
        .await
        .map_err(conn)?;

        Ok(())
    }

    async fn delete_item(&self, id: &ItemId) -> Result<(), StorageError> {
        let res = sqlx::query("DELETE FROM items WHERE id = ?1")
            .bind(id.as_str())
            .execute(&self.pool)
            .await
            .map_err(conn)?;

        if res.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }
}
