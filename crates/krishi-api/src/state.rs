//! Application state shared across all handlers.

use std::sync::Arc;

use sqlx::PgPool;

use krishi_core::config::AppConfig;
use krishi_database::repositories::subscription::SubscriptionRepository;
use krishi_service::alert::service::AlertService;
use krishi_service::push::service::PushService;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// PostgreSQL connection pool.
    pub db_pool: PgPool,
    /// Subscription repository.
    pub subscription_repo: Arc<SubscriptionRepository>,
    /// Alert matching, dispatch, and read-state service.
    pub alert_service: Arc<AlertService>,
    /// Token registration and ad-hoc push service.
    pub push_service: Arc<PushService>,
}
