//! Repository for the `orders` and `order_items` tables.

use async_trait::async_trait;
use optom_core::order_status::DEFAULT_STATUS;
use optom_core::types::DbId;
use sqlx::PgPool;

use crate::models::order::{
    default_order_number, items_total, NewOrder, NewOrderItem, Order, OrderItem,
};
use crate::repositories::like_pattern;
use crate::store::{OrderStore, StoreResult};

/// Order columns with `o` aliasing `orders` and `c` aliasing `customers`.
const COLUMNS: &str = "o.id, o.order_number, o.customer_id, c.name AS customer_name,
     o.total_amount, o.status, o.notes, o.created_at, o.updated_at";

const ITEM_COLUMNS: &str = "id, order_id, product_id, product_name, quantity, price";

pub struct OrderRepo {
    pool: PgPool,
}

impl OrderRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OrderStore for OrderRepo {
    /// List all orders, newest first.
    async fn list(&self) -> StoreResult<Vec<Order>> {
        let query = format!(
            "SELECT {COLUMNS} FROM orders o
             LEFT JOIN customers c ON c.id = o.customer_id
             ORDER BY o.created_at DESC, o.id DESC"
        );
        let orders = sqlx::query_as::<_, Order>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(orders)
    }

    /// Match `term` against order number, customer name and status.
    async fn search(&self, term: &str) -> StoreResult<Vec<Order>> {
        let query = format!(
            "SELECT {COLUMNS} FROM orders o
             LEFT JOIN customers c ON c.id = o.customer_id
             WHERE o.order_number ILIKE $1 OR c.name ILIKE $1 OR o.status ILIKE $1
             ORDER BY o.created_at DESC, o.id DESC"
        );
        let orders = sqlx::query_as::<_, Order>(&query)
            .bind(like_pattern(term))
            .fetch_all(&self.pool)
            .await?;
        Ok(orders)
    }

    async fn find_by_id(&self, id: DbId) -> StoreResult<Option<Order>> {
        let query = format!(
            "SELECT {COLUMNS} FROM orders o
             LEFT JOIN customers c ON c.id = o.customer_id
             WHERE o.id = $1"
        );
        let order = sqlx::query_as::<_, Order>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(order)
    }

    async fn items_for_order(&self, order_id: DbId) -> StoreResult<Vec<OrderItem>> {
        let query = format!("SELECT {ITEM_COLUMNS} FROM order_items WHERE order_id = $1 ORDER BY id");
        let items = sqlx::query_as::<_, OrderItem>(&query)
            .bind(order_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(items)
    }

    /// Insert the order and its items in a single transaction.
    ///
    /// The ID is drawn from the sequence first so that a default order
    /// number can be derived from it in the same insert.
    async fn create(&self, order: &NewOrder, items: &[NewOrderItem]) -> StoreResult<DbId> {
        let mut tx = self.pool.begin().await?;

        let id: DbId = sqlx::query_scalar("SELECT nextval(pg_get_serial_sequence('orders', 'id'))")
            .fetch_one(&mut *tx)
            .await?;

        let order_number = order
            .order_number
            .clone()
            .unwrap_or_else(|| default_order_number(id));
        let total_amount = order.total_amount.unwrap_or_else(|| items_total(items));

        sqlx::query(
            "INSERT INTO orders (id, order_number, customer_id, total_amount, status, notes)
             VALUES ($1, $2, $3, $4, COALESCE($5, $6), $7)",
        )
        .bind(id)
        .bind(&order_number)
        .bind(order.customer_id)
        .bind(total_amount)
        .bind(&order.status)
        .bind(DEFAULT_STATUS)
        .bind(&order.notes)
        .execute(&mut *tx)
        .await?;

        for item in items {
            sqlx::query(
                "INSERT INTO order_items (order_id, product_id, product_name, quantity, price)
                 VALUES ($1, $2, $3, $4, $5)",
            )
            .bind(id)
            .bind(item.product_id)
            .bind(&item.product_name)
            .bind(item.quantity)
            .bind(item.price)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        tracing::debug!(order_id = id, item_count = items.len(), "Order created");
        Ok(id)
    }

    async fn update_status(&self, id: DbId, status: &str) -> StoreResult<bool> {
        let result =
            sqlx::query("UPDATE orders SET status = $2, updated_at = NOW() WHERE id = $1")
                .bind(id)
                .bind(status)
                .execute(&self.pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}
