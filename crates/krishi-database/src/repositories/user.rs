//! User repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use krishi_core::error::{AppError, ErrorKind};
use krishi_core::result::AppResult;
use krishi_entity::user::model::User;

/// Repository for user lookups and push token registration.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a user by id.
    pub async fn find_by_id(&self, user_id: Uuid) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find user", e))
    }

    /// Overwrite a user's push token. Latest write wins.
    ///
    /// Returns false if the user does not exist.
    pub async fn set_push_token(&self, user_id: Uuid, push_token: &str) -> AppResult<bool> {
        let result = sqlx::query("UPDATE users SET push_token = $2 WHERE id = $1")
            .bind(user_id)
            .bind(push_token)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to set push token", e)
            })?;
        Ok(result.rows_affected() > 0)
    }

    /// Return a user's registered push token, if any.
    pub async fn find_push_token(&self, user_id: Uuid) -> AppResult<Option<String>> {
        sqlx::query_scalar::<_, Option<String>>("SELECT push_token FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map(|row| row.flatten())
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find push token", e))
    }

    /// Return push tokens of every user at an exact location.
    pub async fn find_push_tokens_by_location(&self, location: &str) -> AppResult<Vec<String>> {
        sqlx::query_scalar::<_, String>(
            "SELECT push_token FROM users WHERE location = $1 AND push_token IS NOT NULL",
        )
        .bind(location)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list tokens by location", e)
        })
    }
}
