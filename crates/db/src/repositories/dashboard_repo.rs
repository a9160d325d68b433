//! Dashboard aggregates computed on every request.

use async_trait::async_trait;
use optom_core::order_status::{
    STATUS_CANCELLED, STATUS_DELIVERED, STATUS_PENDING, STATUS_PROCESSING, STATUS_SHIPPED,
};
use sqlx::PgPool;

use crate::models::dashboard::{DashboardStats, RecentOrder, TopProduct};
use crate::models::product::LOW_STOCK_THRESHOLD;
use crate::store::{DashboardStore, StoreResult};

pub struct DashboardRepo {
    pool: PgPool,
}

impl DashboardRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DashboardStore for DashboardRepo {
    async fn stats(&self) -> StoreResult<DashboardStats> {
        let stats = sqlx::query_as::<_, DashboardStats>(
            "SELECT
                (SELECT COUNT(*) FROM customers) AS total_customers,
                (SELECT COUNT(*) FROM products) AS total_products,
                (SELECT COUNT(*) FROM orders) AS total_orders,
                (SELECT COUNT(*) FROM orders WHERE status = $1) AS pending_orders,
                (SELECT COUNT(*) FROM orders WHERE status = $2) AS processing_orders,
                (SELECT COUNT(*) FROM orders WHERE status = $3) AS shipped_orders,
                (SELECT COUNT(*) FROM orders WHERE status = $4) AS delivered_orders,
                (SELECT COUNT(*) FROM orders WHERE status = $5) AS cancelled_orders,
                (SELECT COUNT(*) FROM products WHERE stock > 0 AND stock < $6)
                    AS low_stock_products,
                (SELECT COUNT(*) FROM products WHERE stock <= 0) AS out_of_stock_products,
                (SELECT COALESCE(SUM(total_amount), 0)::DOUBLE PRECISION
                    FROM orders WHERE status <> $5) AS total_revenue",
        )
        .bind(STATUS_PENDING)
        .bind(STATUS_PROCESSING)
        .bind(STATUS_SHIPPED)
        .bind(STATUS_DELIVERED)
        .bind(STATUS_CANCELLED)
        .bind(LOW_STOCK_THRESHOLD)
        .fetch_one(&self.pool)
        .await?;
        Ok(stats)
    }

    /// The `limit` newest orders with their customer names.
    async fn recent_orders(&self, limit: i64) -> StoreResult<Vec<RecentOrder>> {
        let orders = sqlx::query_as::<_, RecentOrder>(
            "SELECT o.id, o.order_number, COALESCE(c.name, '') AS customer_name,
                    o.total_amount, o.status, o.created_at
             FROM orders o
             LEFT JOIN customers c ON c.id = o.customer_id
             ORDER BY o.created_at DESC, o.id DESC
             LIMIT $1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(orders)
    }

    /// The `limit` best-selling products over non-cancelled orders.
    async fn top_products(&self, limit: i64) -> StoreResult<Vec<TopProduct>> {
        let products = sqlx::query_as::<_, TopProduct>(
            "SELECT p.id, p.name,
                    SUM(oi.quantity)::BIGINT AS total_sold,
                    SUM(oi.quantity * oi.price)::DOUBLE PRECISION AS revenue
             FROM order_items oi
             JOIN orders o ON o.id = oi.order_id AND o.status <> $1
             JOIN products p ON p.id = oi.product_id
             GROUP BY p.id, p.name
             ORDER BY total_sold DESC, p.id
             LIMIT $2",
        )
        .bind(STATUS_CANCELLED)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(products)
    }
}
