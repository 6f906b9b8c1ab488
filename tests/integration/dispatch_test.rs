//! Integration tests for notification fan-out.

mod helpers;

use std::sync::Arc;

use krishi_database::repositories::alert::AlertRepository;
use krishi_database::repositories::receipt::ReceiptRepository;
use krishi_entity::alert::{AlertKind, Severity};
use krishi_service::alert::dispatch::AlertDispatcher;

fn dispatcher(app: &helpers::TestApp, stub: &Arc<helpers::StubGateway>) -> AlertDispatcher {
    AlertDispatcher::new(
        Arc::new(AlertRepository::new(app.db_pool.clone())),
        Arc::new(ReceiptRepository::new(app.db_pool.clone())),
        helpers::gateway_handle(stub),
        app.config.push.batch_size,
        app.config.push.broadcast_region.clone(),
    )
}

#[tokio::test]
async fn test_dispatch_twice_records_one_receipt_per_user() {
    let app = helpers::TestApp::new().await;
    let stub = Arc::new(helpers::StubGateway::default());

    let user = app
        .create_test_user("asha", Some("Solapur"), Some("ExponentPushToken[a]"))
        .await;
    app.subscribe(user, AlertKind::Pest, true).await;
    let alert = app
        .create_test_alert(AlertKind::Pest, Severity::Critical, None, None)
        .await;

    let dispatcher = dispatcher(&app, &stub);

    let first = dispatcher.dispatch_by_id(alert).await.unwrap();
    assert!(first.success);
    assert_eq!(first.sent_to, 1);

    let second = dispatcher.dispatch_by_id(alert).await.unwrap();
    assert!(second.success);

    assert_eq!(app.receipt_count(alert).await, 1);
}

#[tokio::test]
async fn test_dispatch_with_no_valid_tokens_creates_no_receipts() {
    let app = helpers::TestApp::new().await;
    let stub = Arc::new(helpers::StubGateway::default());

    let user = app
        .create_test_user("vijay", Some("Pune"), Some("not-a-push-token"))
        .await;
    app.subscribe(user, AlertKind::Weather, true).await;
    let alert = app
        .create_test_alert(AlertKind::Weather, Severity::High, None, None)
        .await;

    let outcome = dispatcher(&app, &stub).dispatch_by_id(alert).await.unwrap();

    assert!(!outcome.success);
    assert_eq!(outcome.reason.as_deref(), Some("no valid tokens"));
    assert_eq!(app.receipt_count(alert).await, 0);
    assert!(stub.batches.lock().unwrap().is_empty());
}
