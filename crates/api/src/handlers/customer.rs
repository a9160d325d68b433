//! Handlers for the `/customers` resource.
//!
//! Customers are authoritative records: store failures are reported as
//! errors, never replaced with fallback data.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use optom_core::error::CoreError;
use optom_core::types::DbId;
use optom_core::validation::{normalize_search_term, validate_input};
use optom_db::models::customer::{CreateCustomer, Customer, UpdateCustomer};
use optom_db::StoreError;
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::query::{CustomerListParams, CustomerSearchParams};
use crate::response::{with_id, SuccessResponse};
use crate::state::AppState;

/// GET /api/customers
///
/// With a non-blank `search` term, searches and applies the other filters;
/// without one, lists every customer.
pub async fn list(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<CustomerListParams>,
) -> AppResult<Json<Vec<Customer>>> {
    let store = state.store()?;
    let customers = match normalize_search_term(params.search.as_deref()) {
        Some(term) => store.customers.search(Some(term), &params.filter()).await?,
        None => store.customers.list().await?,
    };
    Ok(Json(customers))
}

/// GET /api/customers/search
///
/// Always applies the filter set, including `minSpent`/`maxSpent`; the
/// search term is optional.
pub async fn search(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<CustomerSearchParams>,
) -> AppResult<Json<Vec<Customer>>> {
    let store = state.store()?;
    let term = normalize_search_term(params.search.as_deref());
    let customers = store.customers.search(term, &params.filter()).await?;
    Ok(Json(customers))
}

/// GET /api/customers/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<Customer>> {
    let customer = state
        .store()?
        .customers
        .find_by_id(id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Customer",
            id,
        }))?;
    Ok(Json(customer))
}

/// POST /api/customers
pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateCustomer>,
) -> AppResult<(StatusCode, Json<Value>)> {
    validate_input(&input)?;
    let id = state.store()?.customers.create(&input).await?;
    tracing::info!(customer_id = id, "Customer created");
    Ok((StatusCode::CREATED, Json(with_id(id, &input)?)))
}

/// PUT /api/customers/{id}
pub async fn update(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateCustomer>,
) -> AppResult<Json<SuccessResponse>> {
    validate_input(&input)?;
    let updated = state.store()?.customers.update(id, &input).await?;
    if !updated {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Customer",
            id,
        }));
    }
    Ok(Json(SuccessResponse::OK))
}

/// DELETE /api/customers/{id}
///
/// A customer with orders cannot be deleted: responds 400 with code
/// `FOREIGN_KEY_CONSTRAINT`.
pub async fn delete(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<SuccessResponse>> {
    match state.store()?.customers.delete(id).await {
        Ok(true) => Ok(Json(SuccessResponse::OK)),
        Ok(false) => Err(AppError::Core(CoreError::NotFound {
            entity: "Customer",
            id,
        })),
        Err(StoreError::ForeignKeyViolation(detail)) => {
            tracing::info!(customer_id = id, %detail, "Customer delete blocked by orders");
            Err(AppError::Core(CoreError::ForeignKeyConstraint(
                "Cannot delete customer with existing orders. \
                 Delete or reassign the customer's orders first."
                    .into(),
            )))
        }
        Err(e) => Err(e.into()),
    }
}
