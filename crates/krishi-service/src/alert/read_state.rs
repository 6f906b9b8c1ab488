//! Per-user read state and aggregate counts.
//!
//! Stats are folded over the exact result set the matching engine returns,
//! so the list view and the counters can never disagree.

use std::sync::Arc;

use serde::Serialize;
use uuid::Uuid;

use krishi_core::result::AppResult;
use krishi_database::repositories::receipt::ReceiptRepository;
use krishi_entity::alert::model::MatchedAlert;

use super::matching::AlertMatcher;

/// Aggregate alert counts for one user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AlertStats {
    /// Count of matched alerts.
    pub total: usize,
    /// Count of matched alerts the user has not read.
    pub unread: usize,
    /// Count of matched critical alerts, read or not.
    pub critical: usize,
}

/// Fold stats from a matched alert list.
pub fn fold_stats(matched: &[MatchedAlert]) -> AlertStats {
    AlertStats {
        total: matched.len(),
        unread: matched.iter().filter(|m| !m.is_read).count(),
        critical: matched
            .iter()
            .filter(|m| m.alert.severity.is_critical())
            .count(),
    }
}

/// Records read state and computes per-user aggregate counts.
#[derive(Debug, Clone)]
pub struct ReadStateTracker {
    matcher: AlertMatcher,
    receipt_repo: Arc<ReceiptRepository>,
}

impl ReadStateTracker {
    /// Create a new read-state tracker.
    pub fn new(matcher: AlertMatcher, receipt_repo: Arc<ReceiptRepository>) -> Self {
        Self {
            matcher,
            receipt_repo,
        }
    }

    /// Mark an alert as read for a user. Idempotent: a repeated call leaves
    /// the stored row, including its original `read_at`, unchanged.
    pub async fn mark_read(&self, user_id: Uuid, alert_id: Uuid) -> AppResult<()> {
        self.receipt_repo.mark_read(user_id, alert_id).await
    }

    /// Aggregate counts over the user's matched set.
    pub async fn stats(&self, user_id: Uuid) -> AppResult<AlertStats> {
        let matched = self.matcher.alerts_for_user(user_id).await?;
        Ok(fold_stats(&matched))
    }
}
