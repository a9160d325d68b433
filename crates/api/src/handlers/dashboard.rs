//! Handler for the analytics dashboard.

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use optom_db::models::dashboard::DashboardSnapshot;

use crate::handlers::{log_no_store, or_fallback};
use crate::state::AppState;

/// Number of rows in the recent-orders widget.
const RECENT_ORDERS_LIMIT: i64 = 5;

/// Number of rows in the top-products widget.
const TOP_PRODUCTS_LIMIT: i64 = 5;

/// GET /api/analytics/dashboard
///
/// Issues the three aggregate queries concurrently. Each one that fails is
/// replaced by its own fallback while the others keep live data; the
/// response is always 200.
pub async fn dashboard(State(state): State<AppState>) -> Json<DashboardSnapshot> {
    let now = Utc::now();
    let fallbacks = &state.fallbacks;
    let Some(store) = &state.store else {
        log_no_store("dashboard");
        return Json(fallbacks.dashboard(now));
    };

    let (stats, recent_orders, top_products) = tokio::join!(
        or_fallback("dashboard.stats", store.dashboard.stats(), || fallbacks.stats()),
        or_fallback(
            "dashboard.recent_orders",
            store.dashboard.recent_orders(RECENT_ORDERS_LIMIT),
            || fallbacks.recent_orders(now),
        ),
        or_fallback(
            "dashboard.top_products",
            store.dashboard.top_products(TOP_PRODUCTS_LIMIT),
            || fallbacks.top_products(),
        ),
    );

    Json(DashboardSnapshot {
        stats,
        recent_orders,
        top_products,
    })
}
