//! Alert subscription entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::alert::AlertKind;

/// A per-user opt-in for one alert kind.
///
/// Subscriptions are opt-in by row presence: a user with no row for a kind
/// does not match alerts of that kind. Uniqueness of `(user_id, alert_type)`
/// is enforced at the storage level and all writes are upserts.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AlertSubscription {
    /// The subscribing user.
    pub user_id: Uuid,
    /// The alert kind this subscription covers.
    pub alert_type: AlertKind,
    /// Whether the subscription is currently enabled.
    pub is_enabled: bool,
    /// When the subscription row was created.
    pub created_at: DateTime<Utc>,
}
