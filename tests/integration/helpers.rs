//! Shared test helpers for integration tests.
//!
//! These tests run against the PostgreSQL instance configured in
//! `config/test.toml`; every `TestApp::new()` call migrates the schema and
//! empties all tables.

use std::sync::Arc;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use krishi_core::config::AppConfig;
use krishi_core::result::AppResult;
use krishi_core::traits::push::{PushGateway, PushMessage, PushTicket};
use krishi_entity::alert::{AlertKind, Severity};

/// Test application context
pub struct TestApp {
    /// Database pool for direct queries
    pub db_pool: PgPool,
    /// Application config
    pub config: AppConfig,
}

impl TestApp {
    /// Create a new test application
    pub async fn new() -> Self {
        let config = AppConfig::load("test").expect("Failed to load test config");

        let db_pool = krishi_database::connection::create_pool(&config.database)
            .await
            .expect("Failed to connect to test database");

        krishi_database::migration::run_migrations(&db_pool)
            .await
            .expect("Failed to run migrations");

        Self::clean_database(&db_pool).await;

        Self { db_pool, config }
    }

    /// Empty all tables, children first.
    async fn clean_database(pool: &PgPool) {
        for table in ["user_alerts", "alert_subscriptions", "alerts", "users"] {
            sqlx::query(&format!("DELETE FROM {table}"))
                .execute(pool)
                .await
                .expect("Failed to clean table");
        }
    }

    /// Insert a user row.
    pub async fn create_test_user(
        &self,
        name: &str,
        location: Option<&str>,
        push_token: Option<&str>,
    ) -> Uuid {
        let id = Uuid::new_v4();
        sqlx::query("INSERT INTO users (id, name, location, push_token) VALUES ($1, $2, $3, $4)")
            .bind(id)
            .bind(name)
            .bind(location)
            .bind(push_token)
            .execute(&self.db_pool)
            .await
            .expect("Failed to insert user");
        id
    }

    /// Insert an alert row.
    pub async fn create_test_alert(
        &self,
        alert_type: AlertKind,
        severity: Severity,
        location: Option<&str>,
        expires_at: Option<DateTime<Utc>>,
    ) -> Uuid {
        let id = Uuid::new_v4();
        sqlx::query(
            "INSERT INTO alerts (id, title, message, alert_type, severity, location, expires_at) \
             VALUES ($1, 'Test alert', 'Test body', $2, $3, $4, $5)",
        )
        .bind(id)
        .bind(alert_type)
        .bind(severity)
        .bind(location)
        .bind(expires_at)
        .execute(&self.db_pool)
        .await
        .expect("Failed to insert alert");
        id
    }

    /// Insert a subscription row.
    pub async fn subscribe(&self, user_id: Uuid, alert_type: AlertKind, is_enabled: bool) {
        sqlx::query(
            "INSERT INTO alert_subscriptions (user_id, alert_type, is_enabled) \
             VALUES ($1, $2, $3)",
        )
        .bind(user_id)
        .bind(alert_type)
        .bind(is_enabled)
        .execute(&self.db_pool)
        .await
        .expect("Failed to insert subscription");
    }

    /// Fetch one receipt row's read state.
    pub async fn receipt(&self, user_id: Uuid, alert_id: Uuid) -> (bool, Option<DateTime<Utc>>) {
        sqlx::query_as(
            "SELECT is_read, read_at FROM user_alerts WHERE user_id = $1 AND alert_id = $2",
        )
        .bind(user_id)
        .bind(alert_id)
        .fetch_one(&self.db_pool)
        .await
        .expect("Receipt row missing")
    }

    /// Count receipt rows for one alert.
    pub async fn receipt_count(&self, alert_id: Uuid) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM user_alerts WHERE alert_id = $1")
            .bind(alert_id)
            .fetch_one(&self.db_pool)
            .await
            .expect("Failed to count receipts")
    }
}

/// Gateway stub that accepts Expo-shaped tokens and records batch sizes.
#[derive(Debug, Default)]
pub struct StubGateway {
    /// Sizes of the batches submitted, in order.
    pub batches: Mutex<Vec<usize>>,
}

#[async_trait::async_trait]
impl PushGateway for StubGateway {
    fn provider_type(&self) -> &str {
        "stub"
    }

    fn is_valid_token(&self, token: &str) -> bool {
        krishi_push::expo::is_expo_push_token(token)
    }

    async fn send_batch(&self, messages: &[PushMessage]) -> AppResult<Vec<PushTicket>> {
        self.batches.lock().unwrap().push(messages.len());
        Ok(messages
            .iter()
            .map(|_| PushTicket {
                status: "ok".to_string(),
                id: None,
                message: None,
            })
            .collect())
    }
}

/// Build an `Arc<dyn PushGateway>` view of a stub.
pub fn gateway_handle(stub: &Arc<StubGateway>) -> Arc<dyn PushGateway> {
    Arc::clone(stub) as Arc<dyn PushGateway>
}
