//! Alert handlers.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;
use validator::Validate;

use krishi_core::error::AppError;
use krishi_entity::alert::model::{Alert, MatchedAlert, NewAlert};

use crate::dto::request::{CreateAlertRequest, MarkReadRequest};
use crate::dto::response::{
    AlertStatsResponse, ApiResponse, CreateAlertResponse, MessageResponse,
};
use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/alerts/user/{user_id}
pub async fn list_for_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<MatchedAlert>>>, ApiError> {
    let alerts = state.alert_service.alerts_for_user(user_id).await?;
    Ok(Json(ApiResponse::ok(alerts)))
}

/// GET /api/alerts/stats/{user_id}
pub async fn stats(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<ApiResponse<AlertStatsResponse>>, ApiError> {
    let stats = state.alert_service.stats(user_id).await?;
    Ok(Json(ApiResponse::ok(stats.into())))
}

/// POST /api/alerts/mark-read
pub async fn mark_read(
    State(state): State<AppState>,
    Json(req): Json<MarkReadRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state
        .alert_service
        .mark_read(req.user_id, req.alert_id)
        .await?;
    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Marked as read".to_string(),
    })))
}

/// POST /api/alerts/create
///
/// Creation and dispatch run in the same request; a dispatch failure is
/// reported in the response and never rolls back the created alert.
pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<CreateAlertRequest>,
) -> Result<Json<ApiResponse<CreateAlertResponse>>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let new_alert = NewAlert {
        title: req.title,
        message: req.message,
        alert_type: req.alert_type,
        severity: req.severity,
        location: req.location,
        crop_type: req.crop_type,
        expires_at: req.expires_at,
    };

    let (alert, outcome) = state.alert_service.create_and_dispatch(new_alert).await?;
    Ok(Json(ApiResponse::ok(CreateAlertResponse {
        alert_id: alert.id,
        notification: outcome,
    })))
}

/// GET /api/alerts
pub async fn list_live(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Alert>>>, ApiError> {
    let alerts = state.alert_service.list_live().await?;
    Ok(Json(ApiResponse::ok(alerts)))
}

/// POST /api/alerts/{alert_id}/deactivate
pub async fn deactivate(
    State(state): State<AppState>,
    Path(alert_id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.alert_service.deactivate(alert_id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Alert deactivated".to_string(),
    })))
}
