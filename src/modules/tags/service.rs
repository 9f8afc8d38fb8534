use sqlx::PgPool;
use tracing::instrument;

use crate::modules::items::service::ItemService;
use crate::modules::tags::model::{CreateTagDto, Tag};
use crate::utils::errors::AppError;

pub struct TagService;

impl TagService {
    #[instrument(skip(db))]
    pub async fn create_tag(db: &PgPool, dto: CreateTagDto) -> Result<Tag, AppError> {
        sqlx::query_as::<_, Tag>(
            "INSERT INTO tags (name, store_id) VALUES ($1, $2) RETURNING id, name, store_id",
        )
        .bind(&dto.name)
        .bind(dto.store_id)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::integrity(anyhow::anyhow!(
                        "A tag with that name already exists in this store"
                    ));
                }
                if db_err.is_foreign_key_violation() {
                    return AppError::not_found(anyhow::anyhow!("Store not found"));
                }
            }
            AppError::from(e)
        })
    }

    #[instrument(skip(db))]
    pub async fn get_tags(db: &PgPool) -> Result<Vec<Tag>, AppError> {
        let tags =
            sqlx::query_as::<_, Tag>("SELECT id, name, store_id FROM tags ORDER BY id")
                .fetch_all(db)
                .await?;

        Ok(tags)
    }

    #[instrument(skip(db))]
    pub async fn get_tag(db: &PgPool, tag_id: i64) -> Result<Tag, AppError> {
        sqlx::query_as::<_, Tag>("SELECT id, name, store_id FROM tags WHERE id = $1")
            .bind(tag_id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Tag not found")))
    }

    /// Deletion is refused while any item still carries the tag.
    #[instrument(skip(db))]
    pub async fn delete_tag(db: &PgPool, tag_id: i64) -> Result<(), AppError> {
        Self::get_tag(db, tag_id).await?;

        let linked = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM items_tags WHERE tag_id = $1)",
        )
        .bind(tag_id)
        .fetch_one(db)
        .await?;

        if linked {
            return Err(AppError::integrity(anyhow::anyhow!(
                "Could not delete tag. Make sure the tag is not linked to any items"
            )));
        }

        sqlx::query("DELETE FROM tags WHERE id = $1")
            .bind(tag_id)
            .execute(db)
            .await?;

        Ok(())
    }

    /// Adds the tag to the item. Returns `true` in the second position when
    /// the pair was already linked and nothing changed.
    #[instrument(skip(db))]
    pub async fn link_tag(db: &PgPool, item_id: i64, tag_id: i64) -> Result<(Tag, bool), AppError> {
        let item = ItemService::get_item(db, item_id).await?;
        let tag = Self::get_tag(db, tag_id).await?;

        if item.store_id != tag.store_id {
            return Err(AppError::bad_request(anyhow::anyhow!(
                "Item and tag must belong to the same store"
            )));
        }

        let already_linked = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM items_tags WHERE item_id = $1 AND tag_id = $2)",
        )
        .bind(item_id)
        .bind(tag_id)
        .fetch_one(db)
        .await?;

        if already_linked {
            return Ok((tag, true));
        }

        sqlx::query("INSERT INTO items_tags (item_id, tag_id) VALUES ($1, $2)")
            .bind(item_id)
            .bind(tag_id)
            .execute(db)
            .await?;

        Ok((tag, false))
    }

    /// Removes the association row. Fails when the pair is not linked.
    #[instrument(skip(db))]
    pub async fn unlink_tag(db: &PgPool, item_id: i64, tag_id: i64) -> Result<Tag, AppError> {
        let tag = Self::get_tag(db, tag_id).await?;

        let result = sqlx::query("DELETE FROM items_tags WHERE item_id = $1 AND tag_id = $2")
            .bind(item_id)
            .bind(tag_id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!(
                "Tag is not linked to this item"
            )));
        }

        Ok(tag)
    }
}
