//! Alert repository implementation.
//!
//! Both directions of the matching predicate live here: alerts matched for
//! a user, and push-capable users matched for an alert. The WHERE clause is
//! the same in both queries (liveness, locality, enabled subscription) so
//! the two views stay symmetric.

use sqlx::PgPool;
use uuid::Uuid;

use krishi_core::error::{AppError, ErrorKind};
use krishi_core::result::AppResult;
use krishi_entity::alert::model::{Alert, MatchedAlert, NewAlert};
use krishi_entity::user::model::Recipient;

/// Repository for alert CRUD and the matching queries.
#[derive(Debug, Clone)]
pub struct AlertRepository {
    pool: PgPool,
}

impl AlertRepository {
    /// Create a new alert repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new alert and return the stored row.
    pub async fn create(&self, alert: &NewAlert) -> AppResult<Alert> {
        sqlx::query_as::<_, Alert>(
            "INSERT INTO alerts (id, title, message, alert_type, severity, location, crop_type, expires_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(&alert.title)
        .bind(&alert.message)
        .bind(alert.alert_type)
        .bind(alert.severity)
        .bind(&alert.location)
        .bind(&alert.crop_type)
        .bind(alert.expires_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create alert", e))
    }

    /// Find an alert by id.
    pub async fn find_by_id(&self, alert_id: Uuid) -> AppResult<Option<Alert>> {
        sqlx::query_as::<_, Alert>("SELECT * FROM alerts WHERE id = $1")
            .bind(alert_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find alert", e))
    }

    /// List all currently live alerts, newest first.
    pub async fn list_live(&self) -> AppResult<Vec<Alert>> {
        sqlx::query_as::<_, Alert>(
            "SELECT * FROM alerts \
             WHERE is_active = TRUE AND (expires_at IS NULL OR expires_at > NOW()) \
             ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list alerts", e))
    }

    /// Logically retire an alert. Returns false if the alert does not exist.
    pub async fn deactivate(&self, alert_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("UPDATE alerts SET is_active = FALSE WHERE id = $1")
            .bind(alert_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to deactivate alert", e)
            })?;
        Ok(result.rows_affected() > 0)
    }

    /// All live alerts matching one user, left-joined with that user's
    /// read state. An unknown user id yields an empty list.
    pub async fn find_matched_for_user(
        &self,
        user_id: Uuid,
        broadcast_region: &str,
    ) -> AppResult<Vec<MatchedAlert>> {
        sqlx::query_as::<_, MatchedAlert>(
            "SELECT a.*, COALESCE(ua.is_read, FALSE) AS is_read, ua.read_at \
             FROM users u \
             JOIN alert_subscriptions s ON s.user_id = u.id AND s.is_enabled = TRUE \
             JOIN alerts a ON a.alert_type = s.alert_type \
             LEFT JOIN user_alerts ua ON ua.alert_id = a.id AND ua.user_id = u.id \
             WHERE u.id = $1 \
               AND a.is_active = TRUE \
               AND (a.expires_at IS NULL OR a.expires_at > NOW()) \
               AND (a.location IS NULL OR a.location = u.location OR a.location = $2)",
        )
        .bind(user_id)
        .bind(broadcast_region)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to match alerts for user", e)
        })
    }

    /// All push-capable users matching one alert. Users without a
    /// registered device are excluded; they still see the alert via
    /// [`find_matched_for_user`](Self::find_matched_for_user).
    pub async fn find_recipients(
        &self,
        alert_id: Uuid,
        broadcast_region: &str,
    ) -> AppResult<Vec<Recipient>> {
        sqlx::query_as::<_, Recipient>(
            "SELECT u.id AS user_id, u.push_token AS push_token \
             FROM alerts a \
             JOIN alert_subscriptions s ON s.alert_type = a.alert_type AND s.is_enabled = TRUE \
             JOIN users u ON u.id = s.user_id \
             WHERE a.id = $1 \
               AND a.is_active = TRUE \
               AND (a.expires_at IS NULL OR a.expires_at > NOW()) \
               AND (a.location IS NULL OR a.location = u.location OR a.location = $2) \
               AND u.push_token IS NOT NULL",
        )
        .bind(alert_id)
        .bind(broadcast_region)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to match users for alert", e)
        })
    }
}
