//! Integration tests for the two matching queries.

mod helpers;

use chrono::{Duration, Utc};
use uuid::Uuid;

use krishi_database::repositories::alert::AlertRepository;
use krishi_entity::alert::{AlertKind, Severity};

#[tokio::test]
async fn test_matching_queries_agree_on_both_directions() {
    let app = helpers::TestApp::new().await;
    let repo = AlertRepository::new(app.db_pool.clone());
    let region = app.config.push.broadcast_region.as_str();

    let solapur = app
        .create_test_user("solapur", Some("Solapur"), Some("ExponentPushToken[s]"))
        .await;
    let pune = app
        .create_test_user("pune", Some("Pune"), Some("ExponentPushToken[p]"))
        .await;
    let opted_out = app
        .create_test_user("opted-out", Some("Solapur"), Some("ExponentPushToken[o]"))
        .await;
    let no_device = app.create_test_user("no-device", Some("Solapur"), None).await;

    for &user in &[solapur, pune, no_device] {
        app.subscribe(user, AlertKind::Weather, true).await;
    }
    app.subscribe(opted_out, AlertKind::Weather, false).await;

    let alert = app
        .create_test_alert(AlertKind::Weather, Severity::High, Some("Solapur"), None)
        .await;

    let recipients: Vec<Uuid> = repo
        .find_recipients(alert, region)
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.user_id)
        .collect();

    // Both query directions must agree on who matches; the recipient view
    // additionally requires a registered device.
    for (user, matches, is_recipient) in [
        (solapur, true, true),
        (pune, false, false),
        (opted_out, false, false),
        (no_device, true, false),
    ] {
        let matched = repo.find_matched_for_user(user, region).await.unwrap();
        assert_eq!(matched.iter().any(|m| m.alert.id == alert), matches);
        assert_eq!(recipients.contains(&user), is_recipient);
    }
    assert_eq!(recipients.len(), 1);
}

#[tokio::test]
async fn test_expired_alert_excluded_from_both_directions() {
    let app = helpers::TestApp::new().await;
    let repo = AlertRepository::new(app.db_pool.clone());
    let region = app.config.push.broadcast_region.as_str();

    let user = app
        .create_test_user("farmer", Some("Pune"), Some("ExponentPushToken[f]"))
        .await;
    app.subscribe(user, AlertKind::Market, true).await;

    let expired = app
        .create_test_alert(
            AlertKind::Market,
            Severity::Low,
            None,
            Some(Utc::now() - Duration::hours(1)),
        )
        .await;

    let matched = repo.find_matched_for_user(user, region).await.unwrap();
    assert!(matched.iter().all(|m| m.alert.id != expired));
    assert!(repo.find_recipients(expired, region).await.unwrap().is_empty());
}
