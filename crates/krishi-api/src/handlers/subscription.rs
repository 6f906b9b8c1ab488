//! Subscription preference handlers.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;
use validator::Validate;

use krishi_core::error::AppError;
use krishi_entity::subscription::model::AlertSubscription;

use crate::dto::request::UpdateSubscriptionsRequest;
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/subscriptions/{user_id}
pub async fn get_subscriptions(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<AlertSubscription>>>, ApiError> {
    let subs = state.subscription_repo.find_by_user(user_id).await?;
    Ok(Json(ApiResponse::ok(subs)))
}

/// PUT /api/subscriptions/{user_id}
pub async fn update_subscriptions(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(req): Json<UpdateSubscriptionsRequest>,
) -> Result<Json<ApiResponse<Vec<AlertSubscription>>>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let mut updated = Vec::with_capacity(req.subscriptions.len());
    for toggle in &req.subscriptions {
        let sub = state
            .subscription_repo
            .upsert(user_id, toggle.alert_type, toggle.is_enabled)
            .await?;
        updated.push(sub);
    }
    Ok(Json(ApiResponse::ok(updated)))
}
