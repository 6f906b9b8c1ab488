//! Notification fan-out dispatcher.
//!
//! Delivers one alert to every currently-matched, push-capable user and
//! durably records delivery. Batches are submitted to the gateway
//! sequentially; a batch failure aborts the remaining batches but returns
//! the tickets collected so far instead of discarding them. There is no
//! automatic batch retry: without an idempotency key a retry could deliver
//! the same notification twice.
//!
//! TODO: add a backoff retry policy once the gateway supports idempotency
//! keys per message.

use std::collections::HashSet;
use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use krishi_core::error::AppError;
use krishi_core::result::AppResult;
use krishi_core::traits::push::{PushGateway, PushMessage, PushPriority, PushTicket};
use krishi_database::repositories::alert::AlertRepository;
use krishi_database::repositories::receipt::ReceiptRepository;
use krishi_entity::alert::model::Alert;
use krishi_entity::user::model::Recipient;

/// The result of one dispatch attempt.
///
/// "Nothing to do" cases (no recipients, no valid tokens) are successful
/// responses carrying `success: false` and a reason, distinguished from
/// gateway failures which also report the failed batch index.
#[derive(Debug, Clone, Serialize)]
pub struct DispatchOutcome {
    /// Whether every batch was delivered to the gateway.
    pub success: bool,
    /// Why the dispatch did not fully deliver, when it did not.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Number of valid device tokens the dispatch targeted.
    pub sent_to: usize,
    /// Per-message delivery tickets collected from the gateway. Partial on
    /// a mid-dispatch gateway failure.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tickets: Vec<PushTicket>,
    /// Title of the dispatched alert.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alert_title: Option<String>,
}

impl DispatchOutcome {
    fn no_recipients() -> Self {
        Self {
            success: false,
            reason: Some("no recipients".to_string()),
            sent_to: 0,
            tickets: Vec::new(),
            alert_title: None,
        }
    }

    fn no_valid_tokens() -> Self {
        Self {
            success: false,
            reason: Some("no valid tokens".to_string()),
            sent_to: 0,
            tickets: Vec::new(),
            alert_title: None,
        }
    }

    fn gateway_failed(failed_batch: usize, sent_to: usize, tickets: Vec<PushTicket>) -> Self {
        Self {
            success: false,
            reason: Some(format!("gateway failure at batch {failed_batch}")),
            sent_to,
            tickets,
            alert_title: None,
        }
    }

    fn sent(alert_title: String, sent_to: usize, tickets: Vec<PushTicket>) -> Self {
        Self {
            success: true,
            reason: None,
            sent_to,
            tickets,
            alert_title: Some(alert_title),
        }
    }
}

/// Build one outbound message per recipient token.
///
/// Critical alerts go out with high delivery priority; everything else is
/// normal. The data payload routes the mobile client to its alerts screen.
pub fn build_messages(alert: &Alert, recipients: &[Recipient]) -> Vec<PushMessage> {
    let priority = if alert.severity.is_critical() {
        PushPriority::High
    } else {
        PushPriority::Normal
    };

    recipients
        .iter()
        .map(|r| PushMessage {
            to: r.push_token.clone(),
            title: alert.title.clone(),
            body: alert.message.clone(),
            data: serde_json::json!({
                "alert_id": alert.id,
                "alert_type": alert.alert_type,
                "severity": alert.severity,
                "screen": "alerts",
            }),
            priority,
        })
        .collect()
}

/// Delivers matched alerts to devices and records receipts.
#[derive(Debug, Clone)]
pub struct AlertDispatcher {
    alert_repo: Arc<AlertRepository>,
    receipt_repo: Arc<ReceiptRepository>,
    gateway: Arc<dyn PushGateway>,
    /// Maximum messages per gateway batch.
    batch_size: usize,
    /// Region name that broadcasts to every user.
    broadcast_region: String,
}

impl AlertDispatcher {
    /// Create a new dispatcher.
    pub fn new(
        alert_repo: Arc<AlertRepository>,
        receipt_repo: Arc<ReceiptRepository>,
        gateway: Arc<dyn PushGateway>,
        batch_size: usize,
        broadcast_region: String,
    ) -> Self {
        Self {
            alert_repo,
            receipt_repo,
            gateway,
            batch_size,
            broadcast_region,
        }
    }

    /// Dispatch an alert by id. Fails with NotFound for an unknown alert.
    pub async fn dispatch_by_id(&self, alert_id: Uuid) -> AppResult<DispatchOutcome> {
        let alert = self
            .alert_repo
            .find_by_id(alert_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Alert {alert_id} not found")))?;
        self.dispatch(&alert).await
    }

    /// Deliver one alert to all currently-matched recipients.
    ///
    /// Safe to call repeatedly for the same alert: receipt creation is
    /// insert-if-absent and existing read state is never reset.
    pub async fn dispatch(&self, alert: &Alert) -> AppResult<DispatchOutcome> {
        let recipients = self
            .alert_repo
            .find_recipients(alert.id, &self.broadcast_region)
            .await?;

        if recipients.is_empty() {
            info!(alert_id = %alert.id, "Dispatch skipped: no matched recipients");
            return Ok(DispatchOutcome::no_recipients());
        }

        // Invalid tokens are discarded rather than failing the dispatch.
        let (valid, invalid): (Vec<Recipient>, Vec<Recipient>) = recipients
            .into_iter()
            .partition(|r| self.gateway.is_valid_token(&r.push_token));

        if !invalid.is_empty() {
            warn!(
                alert_id = %alert.id,
                discarded = invalid.len(),
                "Discarded recipients with malformed push tokens"
            );
        }

        if valid.is_empty() {
            return Ok(DispatchOutcome::no_valid_tokens());
        }

        let messages = build_messages(alert, &valid);
        let mut tickets: Vec<PushTicket> = Vec::with_capacity(messages.len());

        for (batch_index, batch) in messages.chunks(self.batch_size).enumerate() {
            match self.gateway.send_batch(batch).await {
                Ok(batch_tickets) => tickets.extend(batch_tickets),
                Err(e) => {
                    warn!(
                        alert_id = %alert.id,
                        batch_index,
                        collected = tickets.len(),
                        error = %e,
                        "Push batch failed; aborting remaining batches"
                    );
                    return Ok(DispatchOutcome::gateway_failed(
                        batch_index,
                        valid.len(),
                        tickets,
                    ));
                }
            }
        }

        // Record delivery for every distinct valid-token recipient. Tickets
        // are not correlated back to individual users.
        let user_ids: Vec<Uuid> = valid
            .iter()
            .map(|r| r.user_id)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        let created = self.receipt_repo.record_delivered(alert.id, &user_ids).await?;

        info!(
            alert_id = %alert.id,
            sent_to = valid.len(),
            receipts_created = created,
            "Alert dispatched"
        );

        Ok(DispatchOutcome::sent(
            alert.title.clone(),
            valid.len(),
            tickets,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use krishi_entity::alert::{AlertKind, Severity};

    fn alert(severity: Severity) -> Alert {
        Alert {
            id: Uuid::new_v4(),
            title: "Mandi price surge".to_string(),
            message: "Tur dal up 12% at Solapur APMC".to_string(),
            alert_type: AlertKind::Market,
            severity,
            location: None,
            crop_type: Some("tur".to_string()),
            is_active: true,
            expires_at: None,
            created_at: Utc::now(),
        }
    }

    fn recipient(token: &str) -> Recipient {
        Recipient {
            user_id: Uuid::new_v4(),
            push_token: token.to_string(),
        }
    }

    #[test]
    fn test_critical_alert_uses_high_priority() {
        let msgs = build_messages(&alert(Severity::Critical), &[recipient("ExponentPushToken[a]")]);
        assert_eq!(msgs[0].priority, PushPriority::High);

        let msgs = build_messages(&alert(Severity::High), &[recipient("ExponentPushToken[a]")]);
        assert_eq!(msgs[0].priority, PushPriority::Normal);
    }

    #[test]
    fn test_message_payload_routes_to_alerts_screen() {
        let a = alert(Severity::Medium);
        let msgs = build_messages(&a, &[recipient("ExponentPushToken[a]")]);
        assert_eq!(msgs.len(), 1);
        assert_eq!(msgs[0].title, a.title);
        assert_eq!(msgs[0].body, a.message);
        assert_eq!(msgs[0].data["screen"], "alerts");
        assert_eq!(msgs[0].data["alert_type"], "market");
        assert_eq!(msgs[0].data["severity"], "medium");
        assert_eq!(msgs[0].data["alert_id"], a.id.to_string());
    }

    #[test]
    fn test_outcome_reasons() {
        let outcome = DispatchOutcome::no_recipients();
        assert!(!outcome.success);
        assert_eq!(outcome.reason.as_deref(), Some("no recipients"));

        let outcome = DispatchOutcome::no_valid_tokens();
        assert_eq!(outcome.reason.as_deref(), Some("no valid tokens"));

        let outcome = DispatchOutcome::gateway_failed(2, 250, Vec::new());
        assert_eq!(outcome.reason.as_deref(), Some("gateway failure at batch 2"));
        assert_eq!(outcome.sent_to, 250);
    }

    #[test]
    fn test_outcome_serialization_omits_empty_fields() {
        let json = serde_json::to_value(DispatchOutcome::no_recipients()).unwrap();
        assert_eq!(json["success"], false);
        assert!(json.get("tickets").is_none());
        assert!(json.get("alert_title").is_none());

        let ticket = PushTicket {
            status: "ok".to_string(),
            id: Some("T-1".to_string()),
            message: None,
        };
        let json =
            serde_json::to_value(DispatchOutcome::sent("t".to_string(), 1, vec![ticket])).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["sent_to"], 1);
        assert_eq!(json["tickets"][0]["status"], "ok");
    }
}
