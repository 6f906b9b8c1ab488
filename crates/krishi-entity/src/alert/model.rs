//! Alert entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::kind::AlertKind;
use super::severity::Severity;

/// A broadcastable notice with type, severity, and optional locality scope.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Alert {
    /// Unique alert identifier.
    pub id: Uuid,
    /// Notification title.
    pub title: String,
    /// Notification body text.
    pub message: String,
    /// Category matched against subscriptions.
    pub alert_type: AlertKind,
    /// Severity level.
    pub severity: Severity,
    /// Targeted place name. `None` targets all locations; the configured
    /// broadcast region name also matches every user.
    pub location: Option<String>,
    /// Crop the alert concerns. Informational only, never used in matching.
    pub crop_type: Option<String>,
    /// Whether the alert is still active.
    pub is_active: bool,
    /// When the alert expires. `None` means never.
    pub expires_at: Option<DateTime<Utc>>,
    /// When the alert was created.
    pub created_at: DateTime<Utc>,
}

/// Data required to create a new alert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAlert {
    /// Notification title.
    pub title: String,
    /// Notification body text.
    pub message: String,
    /// Category matched against subscriptions.
    pub alert_type: AlertKind,
    /// Severity level.
    pub severity: Severity,
    /// Targeted place name (optional).
    pub location: Option<String>,
    /// Crop the alert concerns (optional).
    pub crop_type: Option<String>,
    /// When the alert expires (optional).
    pub expires_at: Option<DateTime<Utc>>,
}

/// An alert matched for a specific user, joined with that user's read state.
///
/// `is_read` defaults to false and `read_at` to `None` when the user has no
/// receipt row for the alert yet.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MatchedAlert {
    /// The matched alert.
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub alert: Alert,
    /// Whether this user has read the alert.
    pub is_read: bool,
    /// When this user first read the alert.
    pub read_at: Option<DateTime<Utc>>,
}

impl Alert {
    /// Check whether the alert is live at the given instant.
    ///
    /// An alert is live iff it is active and its expiry, if any, is strictly
    /// in the future. An alert expiring exactly at `now` is already expired.
    pub fn is_live(&self, now: DateTime<Utc>) -> bool {
        self.is_active && self.expires_at.map(|exp| exp > now).unwrap_or(true)
    }

    /// Check whether the alert's locality scope covers a user's location.
    ///
    /// A `None` alert location targets everyone. An alert scoped to the
    /// configured broadcast region also targets everyone. Otherwise the
    /// user's location must match exactly; a user without a location only
    /// receives unscoped and region-wide alerts.
    pub fn matches_location(&self, user_location: Option<&str>, broadcast_region: &str) -> bool {
        match self.location.as_deref() {
            None => true,
            Some(loc) if loc == broadcast_region => true,
            Some(loc) => user_location == Some(loc),
        }
    }
}
