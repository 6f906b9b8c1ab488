//! Alert receipt repository implementation.
//!
//! Every write here is an upsert against the `(user_id, alert_id)` primary
//! key, so concurrent dispatches of the same alert cannot create duplicate
//! rows and never reset a user's read state.

use sqlx::PgPool;
use uuid::Uuid;

use krishi_core::error::{AppError, ErrorKind};
use krishi_core::result::AppResult;

/// Repository for per-user alert delivery/read records.
#[derive(Debug, Clone)]
pub struct ReceiptRepository {
    pool: PgPool,
}

impl ReceiptRepository {
    /// Create a new receipt repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Record that an alert was delivered to a set of users.
    ///
    /// Insert-if-absent: existing rows, read or unread, are left untouched.
    /// Returns the number of rows actually created.
    pub async fn record_delivered(&self, alert_id: Uuid, user_ids: &[Uuid]) -> AppResult<u64> {
        if user_ids.is_empty() {
            return Ok(0);
        }
        let result = sqlx::query(
            "INSERT INTO user_alerts (user_id, alert_id) \
             SELECT unnest($1::uuid[]), $2 \
             ON CONFLICT (user_id, alert_id) DO NOTHING",
        )
        .bind(user_ids)
        .bind(alert_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to record delivery", e))?;
        Ok(result.rows_affected())
    }

    /// Mark an alert as read for a user.
    ///
    /// Inserts the row read if no delivery record exists yet (the user
    /// browsed to the alert without a push having been sent). If a row
    /// exists, `is_read` is set and the original `read_at` is kept, so a
    /// repeated call is a strict no-op.
    pub async fn mark_read(&self, user_id: Uuid, alert_id: Uuid) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO user_alerts (user_id, alert_id, is_read, read_at) \
             VALUES ($1, $2, TRUE, NOW()) \
             ON CONFLICT (user_id, alert_id) DO UPDATE \
             SET is_read = TRUE, read_at = COALESCE(user_alerts.read_at, EXCLUDED.read_at)",
        )
        .bind(user_id)
        .bind(alert_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to mark read", e))?;
        Ok(())
    }
}
