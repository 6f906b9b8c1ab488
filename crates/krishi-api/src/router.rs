//! Route definitions for the Krishi HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`.
//! The router receives `AppState` and passes it to all handlers via Axum's
//! `State` extractor.

use axum::{
    Router,
    routing::{get, post, put},
};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(alert_routes())
        .merge(notification_routes())
        .merge(subscription_routes())
        .merge(health_routes());

    let cors = build_cors_layer(&state);

    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Alert matching, creation, and read-state endpoints.
fn alert_routes() -> Router<AppState> {
    Router::new()
        .route("/alerts", get(handlers::alert::list_live))
        .route("/alerts/user/{user_id}", get(handlers::alert::list_for_user))
        .route("/alerts/stats/{user_id}", get(handlers::alert::stats))
        .route("/alerts/mark-read", post(handlers::alert::mark_read))
        .route("/alerts/create", post(handlers::alert::create))
        .route(
            "/alerts/{alert_id}/deactivate",
            post(handlers::alert::deactivate),
        )
}

/// Push token registration and dispatch endpoints.
fn notification_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/notifications/register-token",
            post(handlers::notification::register_token),
        )
        .route("/notifications/test", post(handlers::notification::send_test))
        .route(
            "/notifications/send-alert/{alert_id}",
            post(handlers::notification::send_alert),
        )
}

/// Per-user alert kind opt-in endpoints.
fn subscription_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/subscriptions/{user_id}",
            get(handlers::subscription::get_subscriptions),
        )
        .route(
            "/subscriptions/{user_id}",
            put(handlers::subscription::update_subscriptions),
        )
}

/// Health check endpoint (no auth required).
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health_check))
}

/// Build CORS layer from configuration.
fn build_cors_layer(state: &AppState) -> tower_http::cors::CorsLayer {
    use axum::http::Method;
    use tower_http::cors::{Any, CorsLayer};

    let cors_config = &state.config.server.cors;

    let mut cors = CorsLayer::new();

    if cors_config.allowed_origins.contains(&"*".to_string()) {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<axum::http::HeaderValue> = cors_config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        cors = cors.allow_origin(origins);
    }

    let methods: Vec<Method> = cors_config
        .allowed_methods
        .iter()
        .filter_map(|m| m.parse().ok())
        .collect();
    cors = cors.allow_methods(methods);
    cors = cors.allow_headers(Any);
    cors = cors.max_age(std::time::Duration::from_secs(cors_config.max_age_seconds));

    cors
}
