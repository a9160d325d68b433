//! Handlers for the `/products` resource.
//!
//! The catalog listing degrades to an empty list when the store fails;
//! single-product reads and writes report errors.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use optom_core::error::CoreError;
use optom_core::types::DbId;
use optom_core::validation::normalize_search_term;
use optom_db::models::product::{Product, ProductInput};
use serde::Serialize;
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::handlers::{log_no_store, or_fallback};
use crate::query::SearchParams;
use crate::response::{with_id, SuccessResponse};
use crate::state::AppState;

/// Response body of `PUT /products/{id}`.
#[derive(Debug, Serialize)]
pub struct ProductUpdated {
    pub success: bool,
    pub product: Product,
}

/// GET /api/products
///
/// Returns `[]` with status 200 when the store is missing or fails.
pub async fn list(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<SearchParams>,
) -> Json<Vec<Product>> {
    let Some(store) = &state.store else {
        log_no_store("products.list");
        return Json(Vec::new());
    };

    let products = match normalize_search_term(params.search.as_deref()) {
        Some(term) => or_fallback("products.search", store.products.search(term), Vec::new).await,
        None => or_fallback("products.list", store.products.list(), Vec::new).await,
    };
    Json(products)
}

/// GET /api/products/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<Product>> {
    let product = state
        .store()?
        .products
        .find_by_id(id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Product",
            id,
        }))?;
    Ok(Json(product))
}

/// POST /api/products
pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<ProductInput>,
) -> AppResult<(StatusCode, Json<Value>)> {
    let product = input.validated()?;
    let id = state.store()?.products.create(&product).await?;
    tracing::info!(product_id = id, "Product created");
    Ok((StatusCode::CREATED, Json(with_id(id, &product)?)))
}

/// PUT /api/products/{id}
///
/// Rejects a missing name or non-positive price with 400 before the store
/// is touched.
pub async fn update(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<ProductInput>,
) -> AppResult<Json<ProductUpdated>> {
    let product = input.validated()?;
    let updated = state
        .store()?
        .products
        .update(id, &product)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Product",
            id,
        }))?;
    Ok(Json(ProductUpdated {
        success: true,
        product: updated,
    }))
}

/// DELETE /api/products/{id}
pub async fn delete(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<SuccessResponse>> {
    let deleted = state.store()?.products.delete(id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Product",
            id,
        }));
    }
    Ok(Json(SuccessResponse::OK))
}
