//! Push delivery gateway trait for pluggable push providers.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::result::AppResult;

/// Delivery priority for an outbound push message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PushPriority {
    /// Default delivery priority.
    Normal,
    /// Time-sensitive delivery (critical alerts).
    High,
}

/// A single outbound push message addressed to one device token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PushMessage {
    /// Opaque device token the gateway routes by.
    pub to: String,
    /// Notification title.
    pub title: String,
    /// Notification body text.
    pub body: String,
    /// Structured payload delivered alongside the notification.
    pub data: serde_json::Value,
    /// Delivery priority.
    pub priority: PushPriority,
}

/// A per-message delivery ticket returned by the gateway.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PushTicket {
    /// Ticket status (`"ok"` or `"error"`).
    pub status: String,
    /// Gateway-assigned receipt identifier, present on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Error description, present on per-message failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl PushTicket {
    /// Check whether this ticket represents an accepted message.
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

/// Trait for push delivery providers.
///
/// The trait is defined here in `krishi-core` and implemented in
/// `krishi-push`. Services depend on `Arc<dyn PushGateway>` so tests can
/// substitute an in-memory gateway.
#[async_trait]
pub trait PushGateway: Send + Sync + std::fmt::Debug + 'static {
    /// Return the provider type name (e.g., "expo").
    fn provider_type(&self) -> &str;

    /// Check whether a device token has the provider's expected format.
    fn is_valid_token(&self, token: &str) -> bool;

    /// Submit one batch of messages and return one ticket per message.
    ///
    /// The batch must not exceed the provider's maximum batch size; the
    /// caller is responsible for partitioning.
    async fn send_batch(&self, messages: &[PushMessage]) -> AppResult<Vec<PushTicket>>;
}
