//! Integration tests for `GET /api/analytics/dashboard`.

mod common;

use std::sync::Arc;

use async_trait::async_trait;
use axum::http::StatusCode;
use common::{body_json, build_test_app, failing_app, get, post_json, MemoryStore};
use optom_db::models::dashboard::{DashboardStats, RecentOrder, TopProduct};
use optom_db::store::{DashboardStore, StoreResult};
use optom_db::StoreError;
use serde_json::json;

/// Delegates to the in-memory dashboard except for `stats`, which fails.
struct StatsDown(Arc<MemoryStore>);

#[async_trait]
impl DashboardStore for StatsDown {
    async fn stats(&self) -> StoreResult<DashboardStats> {
        Err(StoreError::Unavailable("statement timeout".into()))
    }

    async fn recent_orders(&self, limit: i64) -> StoreResult<Vec<RecentOrder>> {
        self.0.recent_orders(limit).await
    }

    async fn top_products(&self, limit: i64) -> StoreResult<Vec<TopProduct>> {
        self.0.top_products(limit).await
    }
}

/// The fallback stats payload.
fn default_stats() -> serde_json::Value {
    json!({
        "totalCustomers": 48,
        "totalProducts": 126,
        "totalOrders": 125,
        "pendingOrders": 12,
        "processingOrders": 8,
        "shippedOrders": 15,
        "deliveredOrders": 86,
        "cancelledOrders": 4,
        "lowStockProducts": 7,
        "outOfStockProducts": 3,
        "totalRevenue": 186450000.0,
    })
}

/// Seed one customer with one order of two items through the API.
async fn seed(app: axum::Router) {
    let response = post_json(app.clone(), "/api/customers", json!({"name": "Aziz Karimov"})).await;
    let customer = body_json(response).await["id"].as_i64().unwrap();
    post_json(
        app,
        "/api/orders",
        json!({
            "order": {"customerId": customer},
            "items": [
                {"productId": 101, "productName": "Jinsi shim", "quantity": 3, "price": 240000.0},
                {"productId": 102, "productName": "Sharf", "quantity": 8, "price": 60000.0},
            ],
        }),
    )
    .await;
}

#[tokio::test]
async fn live_dashboard_comes_from_the_store() {
    let memory = Arc::new(MemoryStore::default());
    let app = build_test_app(Some(memory.store()));
    seed(app.clone()).await;

    let response = get(app, "/api/analytics/dashboard").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["stats"]["totalCustomers"], 1);
    assert_eq!(json["stats"]["pendingOrders"], 1);
    assert_eq!(json["recentOrders"][0]["customerName"], "Aziz Karimov");
    assert_eq!(json["topProducts"][0]["name"], "Sharf");
    assert_eq!(json["topProducts"][0]["totalSold"], 8);
}

#[tokio::test]
async fn failing_stats_call_defaults_only_stats() {
    let memory = Arc::new(MemoryStore::default());
    let mut store = memory.store();
    store.dashboard = Arc::new(StatsDown(memory.clone()));
    let app = build_test_app(Some(store));
    seed(app.clone()).await;

    let response = get(app, "/api/analytics/dashboard").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["stats"], default_stats());

    let recent = json["recentOrders"].as_array().unwrap();
    assert_eq!(recent.len(), 1);
    assert_eq!(recent[0]["customerName"], "Aziz Karimov");

    let top = json["topProducts"].as_array().unwrap();
    assert_eq!(top.len(), 2);
    assert_eq!(top[0]["name"], "Sharf");
}

#[tokio::test]
async fn failing_store_serves_all_three_fallbacks() {
    let response = get(failing_app(), "/api/analytics/dashboard").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["stats"], default_stats());
    assert_eq!(json["recentOrders"].as_array().unwrap().len(), 5);
    assert_eq!(json["recentOrders"][0]["orderNumber"], "ORD-000125");
    assert_eq!(json["topProducts"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn missing_store_serves_all_three_fallbacks() {
    let response = get(build_test_app(None), "/api/analytics/dashboard").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["stats"], default_stats());
    assert_eq!(json["topProducts"][0]["totalSold"], 156);
}
