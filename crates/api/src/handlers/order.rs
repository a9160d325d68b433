//! Handlers for the `/orders` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use optom_core::error::CoreError;
use optom_core::order_status::is_known_status;
use optom_core::types::DbId;
use optom_core::validation::{normalize_search_term, validate_input};
use optom_db::models::order::{CreateOrderRequest, Order, OrderDetail, UpdateOrderStatus};
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::query::SearchParams;
use crate::response::{with_id, SuccessResponse};
use crate::state::AppState;

/// GET /api/orders
pub async fn list(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<SearchParams>,
) -> AppResult<Json<Vec<Order>>> {
    let store = state.store()?;
    let orders = match normalize_search_term(params.search.as_deref()) {
        Some(term) => store.orders.search(term).await?,
        None => store.orders.list().await?,
    };
    Ok(Json(orders))
}

/// GET /api/orders/{id}
///
/// Returns the order with its line items inlined under `items`.
pub async fn get_by_id(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<OrderDetail>> {
    let store = state.store()?;
    let order = store
        .orders
        .find_by_id(id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Order", id }))?;
    let items = store.orders.items_for_order(id).await?;
    Ok(Json(OrderDetail { order, items }))
}

/// POST /api/orders
///
/// Body: `{ "order": {...}, "items": [...] }`. The store persists both in
/// one transaction; the response echoes the order with its new `id` and
/// the submitted items.
pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateOrderRequest>,
) -> AppResult<(StatusCode, Json<Value>)> {
    validate_input(&input)?;
    let id = state
        .store()?
        .orders
        .create(&input.order, &input.items)
        .await?;
    tracing::info!(order_id = id, item_count = input.items.len(), "Order created");

    let mut body = with_id(id, &input.order)?;
    body["items"] = serde_json::to_value(&input.items)
        .map_err(|e| AppError::InternalError(format!("Failed to serialize items: {e}")))?;
    Ok((StatusCode::CREATED, Json(body)))
}

/// PUT /api/orders/{id}/status
///
/// Any status value is accepted and any transition is allowed; values
/// outside the known vocabulary are logged.
pub async fn update_status(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateOrderStatus>,
) -> AppResult<Json<SuccessResponse>> {
    if !is_known_status(&input.status) {
        tracing::warn!(order_id = id, status = %input.status, "Unrecognised order status accepted");
    }

    let updated = state
        .store()?
        .orders
        .update_status(id, &input.status)
        .await?;
    if !updated {
        return Err(AppError::Core(CoreError::NotFound { entity: "Order", id }));
    }
    Ok(Json(SuccessResponse::OK))
}
