//! Application builder — wires repositories, services, router, and server.

use std::sync::Arc;

use axum::Router;
use sqlx::PgPool;

use krishi_core::config::AppConfig;
use krishi_core::error::AppError;
use krishi_core::traits::push::PushGateway;
use krishi_database::repositories::{alert, receipt, subscription, user};
use krishi_push::expo::ExpoPushGateway;
use krishi_service::alert::dispatch::AlertDispatcher;
use krishi_service::alert::matching::AlertMatcher;
use krishi_service::alert::read_state::ReadStateTracker;
use krishi_service::alert::service::AlertService;
use krishi_service::push::service::PushService;

use crate::router::build_router;
use crate::state::AppState;

/// Build the application state from configuration and a connected pool.
pub fn build_state(
    config: AppConfig,
    db_pool: PgPool,
    gateway: Arc<dyn PushGateway>,
) -> AppState {
    let user_repo = Arc::new(user::UserRepository::new(db_pool.clone()));
    let alert_repo = Arc::new(alert::AlertRepository::new(db_pool.clone()));
    let subscription_repo = Arc::new(subscription::SubscriptionRepository::new(db_pool.clone()));
    let receipt_repo = Arc::new(receipt::ReceiptRepository::new(db_pool.clone()));

    let matcher = AlertMatcher::new(
        Arc::clone(&alert_repo),
        config.push.broadcast_region.clone(),
    );
    let dispatcher = AlertDispatcher::new(
        Arc::clone(&alert_repo),
        Arc::clone(&receipt_repo),
        Arc::clone(&gateway),
        config.push.batch_size,
        config.push.broadcast_region.clone(),
    );
    let read_state = ReadStateTracker::new(matcher.clone(), Arc::clone(&receipt_repo));

    let alert_service = Arc::new(AlertService::new(
        Arc::clone(&alert_repo),
        matcher,
        dispatcher,
        read_state,
    ));
    let push_service = Arc::new(PushService::new(
        Arc::clone(&user_repo),
        gateway,
        config.push.batch_size,
    ));

    AppState {
        config: Arc::new(config),
        db_pool,
        subscription_repo,
        alert_service,
        push_service,
    }
}

/// Build the complete Axum application.
pub fn build_app(state: AppState) -> Router {
    build_router(state)
}

/// Run the HTTP server until shutdown.
pub async fn run_server(config: AppConfig, db_pool: PgPool) -> Result<(), AppError> {
    let gateway: Arc<dyn PushGateway> = Arc::new(ExpoPushGateway::new(&config.push)?);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = build_state(config, db_pool, gateway);
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("Listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))
}

/// Resolve on Ctrl-C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
