//! Integration tests for ad-hoc push messaging.

mod helpers;

use std::sync::Arc;

use krishi_database::repositories::user::UserRepository;
use krishi_service::push::service::PushService;

#[tokio::test]
async fn test_send_to_location_partitions_oversized_batches() {
    let app = helpers::TestApp::new().await;
    let stub = Arc::new(helpers::StubGateway::default());

    let service = PushService::new(
        Arc::new(UserRepository::new(app.db_pool.clone())),
        helpers::gateway_handle(&stub),
        2,
    );

    for i in 0..5 {
        app.create_test_user(
            &format!("farmer-{i}"),
            Some("Nashik"),
            Some(&format!("ExponentPushToken[{i}]")),
        )
        .await;
    }

    let sent = service
        .send_to_location("Nashik", "Mandi update", "Onion prices", serde_json::json!({}))
        .await
        .unwrap();

    assert_eq!(sent, 5);
    assert_eq!(*stub.batches.lock().unwrap(), vec![2, 2, 1]);
}
