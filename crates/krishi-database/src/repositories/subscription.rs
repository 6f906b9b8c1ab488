//! Alert subscription repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use krishi_core::error::{AppError, ErrorKind};
use krishi_core::result::AppResult;
use krishi_entity::alert::AlertKind;
use krishi_entity::subscription::model::AlertSubscription;

/// Repository for per-user alert kind opt-ins.
#[derive(Debug, Clone)]
pub struct SubscriptionRepository {
    pool: PgPool,
}

impl SubscriptionRepository {
    /// Create a new subscription repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List a user's subscription rows.
    pub async fn find_by_user(&self, user_id: Uuid) -> AppResult<Vec<AlertSubscription>> {
        sqlx::query_as::<_, AlertSubscription>(
            "SELECT * FROM alert_subscriptions WHERE user_id = $1 ORDER BY alert_type",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list subscriptions", e))
    }

    /// Upsert one subscription row. The `(user_id, alert_type)` uniqueness
    /// constraint makes concurrent writes converge on the latest value.
    pub async fn upsert(
        &self,
        user_id: Uuid,
        alert_type: AlertKind,
        is_enabled: bool,
    ) -> AppResult<AlertSubscription> {
        sqlx::query_as::<_, AlertSubscription>(
            "INSERT INTO alert_subscriptions (user_id, alert_type, is_enabled) \
             VALUES ($1, $2, $3) \
             ON CONFLICT (user_id, alert_type) DO UPDATE SET is_enabled = $3 \
             RETURNING *",
        )
        .bind(user_id)
        .bind(alert_type)
        .bind(is_enabled)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to upsert subscription", e))
    }
}
