//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A registered farmer in the advisory system.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Contact phone number.
    pub phone: Option<String>,
    /// Free-text place name (village, taluka, or district).
    pub location: Option<String>,
    /// Device push token, if a device has registered. Latest write wins;
    /// at most one active token per user.
    pub push_token: Option<String>,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Check whether this user can receive push delivery.
    pub fn has_device(&self) -> bool {
        self.push_token.is_some()
    }
}

/// A push-capable recipient resolved for one alert.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Recipient {
    /// The recipient user.
    pub user_id: Uuid,
    /// The recipient's registered device token.
    pub push_token: String,
}
