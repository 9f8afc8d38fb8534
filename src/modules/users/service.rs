use sqlx::PgPool;
use tracing::instrument;

use crate::modules::users::model::{User, UserWithPassword};
use crate::utils::errors::AppError;

pub struct UserService;

impl UserService {
    #[instrument(skip_all, fields(username = %username))]
    pub async fn create_user(
        db: &PgPool,
        username: &str,
        password_hash: &str,
    ) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (username, password) VALUES ($1, $2) RETURNING id, username",
        )
        .bind(username)
        .bind(password_hash)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_unique_violation()
            {
                return AppError::conflict(anyhow::anyhow!(
                    "A user with that username already exists"
                ));
            }
            AppError::from(e)
        })
    }

    #[instrument(skip_all, fields(username = %username))]
    pub async fn find_by_username(
        db: &PgPool,
        username: &str,
    ) -> Result<Option<UserWithPassword>, AppError> {
        let user = sqlx::query_as::<_, UserWithPassword>(
            "SELECT id, username, password FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(db)
        .await?;

        Ok(user)
    }

    #[instrument(skip(db))]
    pub async fn get_user(db: &PgPool, user_id: i64) -> Result<User, AppError> {
        sqlx::query_as::<_, User>("SELECT id, username FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("User not found")))
    }

    #[instrument(skip(db))]
    pub async fn delete_user(db: &PgPool, user_id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("User not found")));
        }

        Ok(())
    }
}
