use sqlx::PgPool;
use tracing::instrument;

use crate::modules::items::model::Item;
use crate::modules::items::service::ItemService;
use crate::modules::stores::model::{CreateStoreDto, Store, UNASSIGNED_STORE_ID};
use crate::utils::errors::AppError;

pub struct StoreService;

impl StoreService {
    #[instrument(skip(db))]
    pub async fn create_store(db: &PgPool, dto: CreateStoreDto) -> Result<Store, AppError> {
        sqlx::query_as::<_, Store>("INSERT INTO stores (name) VALUES ($1) RETURNING id, name")
            .bind(&dto.name)
            .fetch_one(db)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(db_err) = &e
                    && db_err.is_unique_violation()
                {
                    return AppError::integrity(anyhow::anyhow!(
                        "A store with that same name already exists"
                    ));
                }
                AppError::from(e)
            })
    }

    #[instrument(skip(db))]
    pub async fn get_stores(db: &PgPool) -> Result<Vec<Store>, AppError> {
        let stores =
            sqlx::query_as::<_, Store>("SELECT id, name FROM stores ORDER BY id")
                .fetch_all(db)
                .await?;

        Ok(stores)
    }

    #[instrument(skip(db))]
    pub async fn get_store(db: &PgPool, store_id: i64) -> Result<Store, AppError> {
        sqlx::query_as::<_, Store>("SELECT id, name FROM stores WHERE id = $1")
            .bind(store_id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Store not found")))
    }

    #[instrument(skip(db))]
    pub async fn delete_store(db: &PgPool, store_id: i64) -> Result<(), AppError> {
        if store_id == UNASSIGNED_STORE_ID {
            return Err(AppError::bad_request(anyhow::anyhow!(
                "The Unassigned store cannot be deleted"
            )));
        }

        let result = sqlx::query("DELETE FROM stores WHERE id = $1")
            .bind(store_id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Store not found")));
        }

        Ok(())
    }

    #[instrument(skip(db))]
    pub async fn search_stores(db: &PgPool, name: &str) -> Result<Vec<Store>, AppError> {
        let stores = sqlx::query_as::<_, Store>(
            "SELECT id, name FROM stores WHERE name ILIKE $1 ORDER BY id",
        )
        .bind(format!("%{}%", name))
        .fetch_all(db)
        .await?;

        Ok(stores)
    }

    /// Derived read, computed per request.
    #[instrument(skip(db))]
    pub async fn item_count(db: &PgPool, store_id: i64) -> Result<i64, AppError> {
        let count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM items WHERE store_id = $1")
                .bind(store_id)
                .fetch_one(db)
                .await?;

        Ok(count)
    }

    /// Assigns the item to the store in place. Returns `true` in the second
    /// position when the item was already assigned and nothing changed.
    #[instrument(skip(db))]
    pub async fn link_item(
        db: &PgPool,
        store_id: i64,
        item_id: i64,
    ) -> Result<(Item, bool), AppError> {
        let item = ItemService::get_item(db, item_id).await?;
        Self::get_store(db, store_id).await?;

        if item.store_id == store_id {
            return Ok((item, true));
        }

        let item = sqlx::query_as::<_, Item>(
            "UPDATE items SET store_id = $1 WHERE id = $2 RETURNING id, name, price, store_id",
        )
        .bind(store_id)
        .bind(item_id)
        .fetch_one(db)
        .await?;

        Ok((item, false))
    }

    /// Moves the item to the sentinel Unassigned store. Fails when the item
    /// does not currently belong to the claimed store.
    #[instrument(skip(db))]
    pub async fn unlink_item(db: &PgPool, store_id: i64, item_id: i64) -> Result<Item, AppError> {
        let item = ItemService::get_item(db, item_id).await?;

        if item.store_id != store_id {
            return Err(AppError::not_found(anyhow::anyhow!(
                "Item not found under this store"
            )));
        }

        let item = sqlx::query_as::<_, Item>(
            "UPDATE items SET store_id = $1 WHERE id = $2 RETURNING id, name, price, store_id",
        )
        .bind(UNASSIGNED_STORE_ID)
        .bind(item_id)
        .fetch_one(db)
        .await?;

        Ok(item)
    }
}
