//! Alert receipt entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// The durable record that a user has been delivered and/or has read a
/// given alert.
///
/// One row exists per `(user_id, alert_id)` pair that has been matched or
/// delivered at least once. Created either by the fan-out dispatcher
/// (unread) or directly by mark-as-read.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AlertReceipt {
    /// The recipient user.
    pub user_id: Uuid,
    /// The delivered alert.
    pub alert_id: Uuid,
    /// Whether the user has read the alert.
    pub is_read: bool,
    /// When the alert was first read. Never updated after the first read.
    pub read_at: Option<DateTime<Utc>>,
    /// When the receipt row was created.
    pub created_at: DateTime<Utc>,
}
