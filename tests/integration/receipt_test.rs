//! Integration tests for delivery receipt and read-state upserts.

mod helpers;

use krishi_database::repositories::receipt::ReceiptRepository;
use krishi_entity::alert::{AlertKind, Severity};

#[tokio::test]
async fn test_record_delivered_rerun_creates_no_duplicate_rows() {
    let app = helpers::TestApp::new().await;
    let user = app.create_test_user("asha", Some("Solapur"), None).await;
    let alert = app
        .create_test_alert(AlertKind::Pest, Severity::High, None, None)
        .await;

    let repo = ReceiptRepository::new(app.db_pool.clone());

    let created = repo.record_delivered(alert, &[user]).await.unwrap();
    assert_eq!(created, 1);

    let created = repo.record_delivered(alert, &[user]).await.unwrap();
    assert_eq!(created, 0);
    assert_eq!(app.receipt_count(alert).await, 1);
}

#[tokio::test]
async fn test_record_delivered_never_resets_read_state() {
    let app = helpers::TestApp::new().await;
    let user = app.create_test_user("vijay", Some("Pune"), None).await;
    let alert = app
        .create_test_alert(AlertKind::Weather, Severity::Critical, None, None)
        .await;

    let repo = ReceiptRepository::new(app.db_pool.clone());

    repo.mark_read(user, alert).await.unwrap();
    let (is_read, read_at) = app.receipt(user, alert).await;
    assert!(is_read);

    // A later dispatch of the same alert must not flip the row back.
    repo.record_delivered(alert, &[user]).await.unwrap();
    let (still_read, still_read_at) = app.receipt(user, alert).await;
    assert!(still_read);
    assert_eq!(still_read_at, read_at);
}

#[tokio::test]
async fn test_mark_read_twice_preserves_first_read_at() {
    let app = helpers::TestApp::new().await;
    let user = app.create_test_user("sunita", Some("Nashik"), None).await;
    let alert = app
        .create_test_alert(AlertKind::Market, Severity::Medium, None, None)
        .await;

    let repo = ReceiptRepository::new(app.db_pool.clone());

    repo.mark_read(user, alert).await.unwrap();
    let (is_read, first_read_at) = app.receipt(user, alert).await;
    assert!(is_read);
    let first_read_at = first_read_at.expect("read_at set on first read");

    tokio::time::sleep(std::time::Duration::from_millis(20)).await;

    repo.mark_read(user, alert).await.unwrap();
    let (is_read, second_read_at) = app.receipt(user, alert).await;
    assert!(is_read);
    assert_eq!(second_read_at, Some(first_read_at));
    assert_eq!(app.receipt_count(alert).await, 1);
}
