//! Request DTOs with validation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use krishi_entity::alert::{AlertKind, Severity};

/// Create alert request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateAlertRequest {
    /// Notification title.
    #[validate(length(min = 1, max = 200, message = "Title is required"))]
    pub title: String,
    /// Notification body text.
    #[validate(length(min = 1, message = "Message is required"))]
    pub message: String,
    /// Alert category.
    pub alert_type: AlertKind,
    /// Severity level.
    pub severity: Severity,
    /// Targeted place name (optional; omit to target all locations).
    pub location: Option<String>,
    /// Crop the alert concerns (optional, informational).
    pub crop_type: Option<String>,
    /// Expiry timestamp (optional; omit for no expiry).
    pub expires_at: Option<DateTime<Utc>>,
}

/// Mark-as-read request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkReadRequest {
    /// The reading user.
    pub user_id: Uuid,
    /// The alert being read.
    pub alert_id: Uuid,
}

/// Push token registration request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterTokenRequest {
    /// The registering user.
    pub user_id: Uuid,
    /// The device token to store.
    #[validate(length(min = 1, message = "Push token is required"))]
    pub push_token: String,
}

/// Test notification request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TestPushRequest {
    /// The device token to message.
    #[validate(length(min = 1, message = "Push token is required"))]
    pub push_token: String,
}

/// One subscription toggle within an update request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriptionToggle {
    /// The alert kind to toggle.
    pub alert_type: AlertKind,
    /// Whether the user wants alerts of this kind.
    pub is_enabled: bool,
}

/// Subscription preferences update request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateSubscriptionsRequest {
    /// Toggles to apply.
    #[validate(length(min = 1, message = "At least one subscription is required"))]
    pub subscriptions: Vec<SubscriptionToggle>,
}
