pub mod analytics;
pub mod category;
pub mod customer;
pub mod health;
pub mod notification;
pub mod order;
pub mod product;
pub mod settings;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /customers                      list, create
/// /customers/search               filtered search
/// /customers/{id}                 get, update, delete
///
/// /products                       list (degrades to []), create
/// /products/{id}                  get, update, delete
///
/// /orders                         list, create (order + items)
/// /orders/{id}                    get with items
/// /orders/{id}/status             update status
///
/// /categories                     list (degrades to built-ins)
///
/// /notifications                  list, create, delete (?id=)
///
/// /settings/{category}            get (degrades to defaults), update (best-effort)
///
/// /analytics/dashboard            stats, recent orders, top products
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/customers", customer::router())
        .nest("/products", product::router())
        .nest("/orders", order::router())
        .nest("/categories", category::router())
        .nest("/notifications", notification::router())
        .nest("/settings", settings::router())
        .nest("/analytics", analytics::router())
}
