//! Alert matching engine — determines which alerts and users are mutually
//! eligible under liveness, locality, and subscription rules.
//!
//! The SQL in `AlertRepository` and the pure [`pair_matches`] predicate
//! implement the same rule; the predicate exists so the rule is testable
//! without a database and is the reference for both query directions.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use krishi_core::result::AppResult;
use krishi_database::repositories::alert::AlertRepository;
use krishi_entity::alert::model::{Alert, MatchedAlert};
use krishi_entity::user::model::Recipient;

/// Decide whether one (user, alert) pair matches.
///
/// A pair matches iff the alert is live at `now`, its locality scope covers
/// the user's location (given the configured broadcast region), and the user
/// has an enabled subscription row for the alert's kind. Absence of a
/// subscription row means no match; subscriptions are opt-in by presence.
pub fn pair_matches(
    alert: &Alert,
    user_location: Option<&str>,
    subscription_enabled: Option<bool>,
    broadcast_region: &str,
    now: DateTime<Utc>,
) -> bool {
    alert.is_live(now)
        && alert.matches_location(user_location, broadcast_region)
        && subscription_enabled == Some(true)
}

/// Sort matched alerts by severity rank descending, then creation time
/// descending. This ordering is a UX contract: the most urgent, most recent
/// alerts surface first.
pub fn sort_matched(alerts: &mut [MatchedAlert]) {
    alerts.sort_by(|a, b| {
        b.alert
            .severity
            .rank()
            .cmp(&a.alert.severity.rank())
            .then_with(|| b.alert.created_at.cmp(&a.alert.created_at))
    });
}

/// Resolves matched alerts for users and matched users for alerts.
#[derive(Debug, Clone)]
pub struct AlertMatcher {
    /// Alert repository holding both matching queries.
    alert_repo: Arc<AlertRepository>,
    /// Region name that broadcasts to every user.
    broadcast_region: String,
}

impl AlertMatcher {
    /// Create a new matching engine.
    pub fn new(alert_repo: Arc<AlertRepository>, broadcast_region: String) -> Self {
        Self {
            alert_repo,
            broadcast_region,
        }
    }

    /// All alerts matching one user, with that user's read state, ordered
    /// most severe and most recent first. An unknown user yields an empty
    /// list, not an error.
    pub async fn alerts_for_user(&self, user_id: Uuid) -> AppResult<Vec<MatchedAlert>> {
        let mut matched = self
            .alert_repo
            .find_matched_for_user(user_id, &self.broadcast_region)
            .await?;
        sort_matched(&mut matched);
        Ok(matched)
    }

    /// All push-capable users matching one alert. Side-effect free.
    pub async fn recipients_for_alert(&self, alert_id: Uuid) -> AppResult<Vec<Recipient>> {
        self.alert_repo
            .find_recipients(alert_id, &self.broadcast_region)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use krishi_entity::alert::{AlertKind, Severity};

    const REGION: &str = "Maharashtra";

    fn alert(kind: AlertKind, severity: Severity, location: Option<&str>) -> Alert {
        Alert {
            id: Uuid::new_v4(),
            title: "Brown planthopper outbreak".to_string(),
            message: "Inspect paddy fields".to_string(),
            alert_type: kind,
            severity,
            location: location.map(str::to_string),
            crop_type: Some("rice".to_string()),
            is_active: true,
            expires_at: None,
            created_at: Utc::now(),
        }
    }

    fn matched(severity: Severity, created_at: DateTime<Utc>) -> MatchedAlert {
        let mut a = alert(AlertKind::Pest, severity, None);
        a.created_at = created_at;
        MatchedAlert {
            alert: a,
            is_read: false,
            read_at: None,
        }
    }

    #[test]
    fn test_subscribed_user_matches_unscoped_alert() {
        let a = alert(AlertKind::Pest, Severity::Critical, None);
        assert!(pair_matches(&a, Some("Solapur"), Some(true), REGION, Utc::now()));
    }

    #[test]
    fn test_disabled_subscription_blocks_match() {
        // Locality is satisfied; the opt-out alone must block the pair.
        let a = alert(AlertKind::Pest, Severity::Critical, None);
        assert!(!pair_matches(&a, Some("Solapur"), Some(false), REGION, Utc::now()));
    }

    #[test]
    fn test_missing_subscription_row_blocks_match() {
        let a = alert(AlertKind::Pest, Severity::Critical, None);
        assert!(!pair_matches(&a, Some("Solapur"), None, REGION, Utc::now()));
    }

    #[test]
    fn test_location_mismatch_blocks_match() {
        let a = alert(AlertKind::Weather, Severity::High, Some("Solapur"));
        assert!(!pair_matches(&a, Some("Pune"), Some(true), REGION, Utc::now()));
    }

    #[test]
    fn test_region_wide_alert_matches_any_location() {
        let a = alert(AlertKind::Weather, Severity::High, Some(REGION));
        assert!(pair_matches(&a, Some("Pune"), Some(true), REGION, Utc::now()));
    }

    #[test]
    fn test_expired_alert_never_matches() {
        let now = Utc::now();
        let mut a = alert(AlertKind::Market, Severity::Low, None);
        a.expires_at = Some(now);
        assert!(!pair_matches(&a, Some("Pune"), Some(true), REGION, now));
        a.expires_at = Some(now - Duration::hours(1));
        assert!(!pair_matches(&a, Some("Pune"), Some(true), REGION, now));
    }

    #[test]
    fn test_ordering_severity_then_recency() {
        let now = Utc::now();
        let mut items = vec![
            matched(Severity::Low, now),
            matched(Severity::Critical, now - Duration::hours(2)),
            matched(Severity::Critical, now - Duration::hours(1)),
            matched(Severity::High, now),
        ];
        sort_matched(&mut items);

        let severities: Vec<_> = items.iter().map(|m| m.alert.severity).collect();
        assert_eq!(
            severities,
            vec![
                Severity::Critical,
                Severity::Critical,
                Severity::High,
                Severity::Low
            ]
        );
        // Newer critical alert first.
        assert!(items[0].alert.created_at > items[1].alert.created_at);
    }
}
