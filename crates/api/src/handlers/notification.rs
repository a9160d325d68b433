//! Handlers for the `/notifications` resource: list, create, delete.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use optom_core::error::CoreError;
use optom_core::validation::validate_input;
use optom_db::models::notification::{CreateNotification, Notification};
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppQuery};
use crate::query::IdParam;
use crate::response::{with_id, SuccessResponse};
use crate::state::AppState;

/// GET /api/notifications
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Notification>>> {
    let notifications = state.store()?.notifications.list().await?;
    Ok(Json(notifications))
}

/// POST /api/notifications
pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateNotification>,
) -> AppResult<(StatusCode, Json<Value>)> {
    validate_input(&input)?;
    let id = state.store()?.notifications.create(&input).await?;
    Ok((StatusCode::CREATED, Json(with_id(id, &input)?)))
}

/// DELETE /api/notifications?id={id}
pub async fn delete(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<IdParam>,
) -> AppResult<Json<SuccessResponse>> {
    let id = params
        .id
        .ok_or_else(|| AppError::BadRequest("Notification id is required".into()))?;

    let deleted = state.store()?.notifications.delete(id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Notification",
            id,
        }));
    }
    Ok(Json(SuccessResponse::OK))
}
