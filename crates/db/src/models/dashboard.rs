//! Dashboard aggregate rows.

use optom_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Summary counters shown at the top of the dashboard.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_customers: i64,
    pub total_products: i64,
    pub total_orders: i64,
    pub pending_orders: i64,
    pub processing_orders: i64,
    pub shipped_orders: i64,
    pub delivered_orders: i64,
    pub cancelled_orders: i64,
    pub low_stock_products: i64,
    pub out_of_stock_products: i64,
    pub total_revenue: f64,
}

/// One row of the recent-orders widget.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentOrder {
    pub id: DbId,
    pub order_number: String,
    pub customer_name: String,
    pub total_amount: f64,
    pub status: String,
    pub created_at: Timestamp,
}

/// One row of the top-products widget, ranked by units sold.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopProduct {
    pub id: DbId,
    pub name: String,
    pub total_sold: i64,
    pub revenue: f64,
}

/// The full `GET /analytics/dashboard` payload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub stats: DashboardStats,
    pub recent_orders: Vec<RecentOrder>,
    pub top_products: Vec<TopProduct>,
}
