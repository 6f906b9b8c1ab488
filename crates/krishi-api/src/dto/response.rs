//! Response DTOs.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use krishi_service::alert::dispatch::DispatchOutcome;
use krishi_service::alert::read_state::AlertStats;

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Simple message payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Human-readable confirmation.
    pub message: String,
}

/// Aggregate alert counts for one user.
#[derive(Debug, Clone, Serialize)]
pub struct AlertStatsResponse {
    /// Count of matched alerts.
    pub total_alerts: usize,
    /// Count of matched alerts not yet read.
    pub unread_alerts: usize,
    /// Count of matched critical alerts.
    pub critical_alerts: usize,
}

impl From<AlertStats> for AlertStatsResponse {
    fn from(stats: AlertStats) -> Self {
        Self {
            total_alerts: stats.total,
            unread_alerts: stats.unread,
            critical_alerts: stats.critical,
        }
    }
}

/// Response to alert creation: the stored id plus the dispatch outcome.
#[derive(Debug, Clone, Serialize)]
pub struct CreateAlertResponse {
    /// Identifier of the created alert.
    pub alert_id: Uuid,
    /// Outcome of the synchronous dispatch.
    pub notification: DispatchOutcome,
}

/// Health check payload.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Crate version.
    pub version: String,
    /// Database connectivity.
    pub database: String,
}
