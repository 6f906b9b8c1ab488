//! Notification handlers.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;
use validator::Validate;

use krishi_core::error::AppError;
use krishi_core::traits::push::PushTicket;
use krishi_service::alert::dispatch::DispatchOutcome;

use crate::dto::request::{RegisterTokenRequest, TestPushRequest};
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiError;
use crate::state::AppState;

/// POST /api/notifications/register-token
pub async fn register_token(
    State(state): State<AppState>,
    Json(req): Json<RegisterTokenRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    state
        .push_service
        .register_token(req.user_id, &req.push_token)
        .await?;
    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Push token registered".to_string(),
    })))
}

/// POST /api/notifications/test
pub async fn send_test(
    State(state): State<AppState>,
    Json(req): Json<TestPushRequest>,
) -> Result<Json<ApiResponse<Vec<PushTicket>>>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let tickets = state.push_service.send_test(&req.push_token).await?;
    Ok(Json(ApiResponse::ok(tickets)))
}

/// POST /api/notifications/send-alert/{alert_id}
pub async fn send_alert(
    State(state): State<AppState>,
    Path(alert_id): Path<Uuid>,
) -> Result<Json<ApiResponse<DispatchOutcome>>, ApiError> {
    let outcome = state.alert_service.redispatch(alert_id).await?;
    Ok(Json(ApiResponse::ok(outcome)))
}
