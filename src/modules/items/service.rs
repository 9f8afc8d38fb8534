use sqlx::PgPool;
use tracing::instrument;

use crate::modules::items::model::{CreateItemDto, Item, UpdateItemDto};
use crate::modules::stores::model::UNASSIGNED_STORE_ID;
use crate::utils::errors::AppError;

pub struct ItemService;

impl ItemService {
    #[instrument(skip(db))]
    pub async fn create_item(db: &PgPool, dto: CreateItemDto) -> Result<Item, AppError> {
        sqlx::query_as::<_, Item>(
            "INSERT INTO items (name, price, store_id) VALUES ($1, $2, $3)
             RETURNING id, name, price, store_id",
        )
        .bind(&dto.name)
        .bind(dto.price)
        .bind(dto.store_id)
        .fetch_one(db)
        .await
        .map_err(classify_store_reference)
    }

    #[instrument(skip(db))]
    pub async fn get_items(db: &PgPool) -> Result<Vec<Item>, AppError> {
        let items = sqlx::query_as::<_, Item>(
            "SELECT id, name, price, store_id FROM items ORDER BY id",
        )
        .fetch_all(db)
        .await?;

        Ok(items)
    }

    #[instrument(skip(db))]
    pub async fn get_item(db: &PgPool, item_id: i64) -> Result<Item, AppError> {
        sqlx::query_as::<_, Item>("SELECT id, name, price, store_id FROM items WHERE id = $1")
            .bind(item_id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Item not found")))
    }

    /// Replaces the item's name and price, or creates the item under the
    /// supplied id when it does not exist (upsert-by-id). Returns `true` in
    /// the second position when a row was created.
    #[instrument(skip(db))]
    pub async fn upsert_item(
        db: &PgPool,
        item_id: i64,
        dto: UpdateItemDto,
    ) -> Result<(Item, bool), AppError> {
        let existing = sqlx::query_as::<_, Item>(
            "SELECT id, name, price, store_id FROM items WHERE id = $1",
        )
        .bind(item_id)
        .fetch_optional(db)
        .await?;

        if existing.is_some() {
            let item = sqlx::query_as::<_, Item>(
                "UPDATE items SET name = $1, price = $2 WHERE id = $3
                 RETURNING id, name, price, store_id",
            )
            .bind(&dto.name)
            .bind(dto.price)
            .bind(item_id)
            .fetch_one(db)
            .await?;

            return Ok((item, false));
        }

        let store_id = dto.store_id.unwrap_or(UNASSIGNED_STORE_ID);
        let item = sqlx::query_as::<_, Item>(
            "INSERT INTO items (id, name, price, store_id) VALUES ($1, $2, $3, $4)
             RETURNING id, name, price, store_id",
        )
        .bind(item_id)
        .bind(&dto.name)
        .bind(dto.price)
        .bind(store_id)
        .fetch_one(db)
        .await
        .map_err(classify_store_reference)?;

        Ok((item, true))
    }

    #[instrument(skip(db))]
    pub async fn delete_item(db: &PgPool, item_id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM items WHERE id = $1")
            .bind(item_id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Item not found")));
        }

        Ok(())
    }
}

/// An item insert can only violate the store foreign key; everything else is
/// an unclassified persistence failure.
fn classify_store_reference(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &e
        && db_err.is_foreign_key_violation()
    {
        return AppError::not_found(anyhow::anyhow!("Store not found"));
    }
    AppError::from(e)
}
