//! Alert service facade — creation, dispatch, listing, and read state.

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use krishi_core::error::AppError;
use krishi_core::result::AppResult;
use krishi_database::repositories::alert::AlertRepository;
use krishi_entity::alert::model::{Alert, MatchedAlert, NewAlert};

use super::dispatch::{AlertDispatcher, DispatchOutcome};
use super::matching::AlertMatcher;
use super::read_state::{AlertStats, ReadStateTracker};

/// Orchestrates alert lifecycle and delegates to the matching engine,
/// dispatcher, and read-state tracker.
#[derive(Debug, Clone)]
pub struct AlertService {
    alert_repo: Arc<AlertRepository>,
    matcher: AlertMatcher,
    dispatcher: AlertDispatcher,
    read_state: ReadStateTracker,
}

impl AlertService {
    /// Create a new alert service.
    pub fn new(
        alert_repo: Arc<AlertRepository>,
        matcher: AlertMatcher,
        dispatcher: AlertDispatcher,
        read_state: ReadStateTracker,
    ) -> Self {
        Self {
            alert_repo,
            matcher,
            dispatcher,
            read_state,
        }
    }

    /// Create an alert and synchronously dispatch it.
    ///
    /// The alert row persists regardless of the notification outcome; a
    /// dispatch failure is reported in the returned outcome, never rolled
    /// back into the creation.
    pub async fn create_and_dispatch(
        &self,
        new_alert: NewAlert,
    ) -> AppResult<(Alert, DispatchOutcome)> {
        let alert = self.alert_repo.create(&new_alert).await?;
        info!(alert_id = %alert.id, alert_type = %alert.alert_type, severity = %alert.severity, "Alert created");

        let outcome = match self.dispatcher.dispatch(&alert).await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(alert_id = %alert.id, error = %e, "Dispatch failed after creation");
                return Err(e);
            }
        };

        Ok((alert, outcome))
    }

    /// Re-trigger dispatch for an existing alert.
    pub async fn redispatch(&self, alert_id: Uuid) -> AppResult<DispatchOutcome> {
        self.dispatcher.dispatch_by_id(alert_id).await
    }

    /// All alerts matched for a user, most urgent first.
    pub async fn alerts_for_user(&self, user_id: Uuid) -> AppResult<Vec<MatchedAlert>> {
        self.matcher.alerts_for_user(user_id).await
    }

    /// Aggregate counts over a user's matched set.
    pub async fn stats(&self, user_id: Uuid) -> AppResult<AlertStats> {
        self.read_state.stats(user_id).await
    }

    /// Mark an alert as read for a user.
    pub async fn mark_read(&self, user_id: Uuid, alert_id: Uuid) -> AppResult<()> {
        if self.alert_repo.find_by_id(alert_id).await?.is_none() {
            return Err(AppError::not_found(format!("Alert {alert_id} not found")));
        }
        self.read_state.mark_read(user_id, alert_id).await
    }

    /// List all currently live alerts.
    pub async fn list_live(&self) -> AppResult<Vec<Alert>> {
        self.alert_repo.list_live().await
    }

    /// Logically retire an alert.
    pub async fn deactivate(&self, alert_id: Uuid) -> AppResult<()> {
        if !self.alert_repo.deactivate(alert_id).await? {
            return Err(AppError::not_found(format!("Alert {alert_id} not found")));
        }
        info!(alert_id = %alert_id, "Alert deactivated");
        Ok(())
    }
}
