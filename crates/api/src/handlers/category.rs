//! Handlers for the `/categories` resource.

use axum::extract::State;
use axum::Json;
use optom_db::models::category::Category;

use crate::handlers::{log_no_store, or_fallback};
use crate::state::AppState;

/// GET /api/categories
///
/// Degrades to the four built-in categories when the store fails.
pub async fn list(State(state): State<AppState>) -> Json<Vec<Category>> {
    let fallbacks = &state.fallbacks;
    let Some(store) = &state.store else {
        log_no_store("categories.list");
        return Json(fallbacks.categories());
    };

    let categories = or_fallback("categories.list", store.categories.list(), || {
        fallbacks.categories()
    })
    .await;
    Json(categories)
}
