//! Repository for the `customers` table.

use async_trait::async_trait;
use optom_core::order_status::STATUS_CANCELLED;
use optom_core::types::DbId;
use sqlx::PgPool;

use crate::error::StoreError;
use crate::models::customer::{
    CreateCustomer, Customer, CustomerFilter, UpdateCustomer, DEFAULT_CUSTOMER_STATUS,
};
use crate::repositories::like_pattern;
use crate::store::{CustomerStore, StoreResult};

/// Customers joined with their order count and spend.
///
/// `$1` is the status excluded from `total_spent`.
const SELECT_WITH_TOTALS: &str = "
    SELECT c.id, c.name, c.email, c.phone, c.company, c.location, c.status, c.notes,
           COALESCE(t.total_orders, 0) AS total_orders,
           COALESCE(t.total_spent, 0) AS total_spent,
           c.created_at, c.updated_at
    FROM customers c
    LEFT JOIN (
        SELECT customer_id,
               COUNT(*)::BIGINT AS total_orders,
               (COALESCE(SUM(total_amount) FILTER (WHERE status <> $1), 0))::DOUBLE PRECISION
                   AS total_spent
        FROM orders
        GROUP BY customer_id
    ) t ON t.customer_id = c.id";

pub struct CustomerRepo {
    pool: PgPool,
}

impl CustomerRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CustomerStore for CustomerRepo {
    /// List all customers, most recently created first.
    async fn list(&self) -> StoreResult<Vec<Customer>> {
        let query = format!("{SELECT_WITH_TOTALS} ORDER BY c.created_at DESC, c.id DESC");
        let customers = sqlx::query_as::<_, Customer>(&query)
            .bind(STATUS_CANCELLED)
            .fetch_all(&self.pool)
            .await?;
        Ok(customers)
    }

    async fn search(
        &self,
        term: Option<&str>,
        filter: &CustomerFilter,
    ) -> StoreResult<Vec<Customer>> {
        let query = format!(
            "SELECT * FROM ({SELECT_WITH_TOTALS}) x
             WHERE ($2::TEXT IS NULL
                    OR x.name ILIKE $2 OR x.email ILIKE $2
                    OR x.phone ILIKE $2 OR x.company ILIKE $2)
               AND ($3::TEXT IS NULL OR x.status = $3)
               AND ($4::TEXT IS NULL OR x.location ILIKE $4)
               AND ($5::BIGINT IS NULL OR x.total_orders >= $5)
               AND ($6::BIGINT IS NULL OR x.total_orders <= $6)
               AND ($7::DOUBLE PRECISION IS NULL OR x.total_spent >= $7)
               AND ($8::DOUBLE PRECISION IS NULL OR x.total_spent <= $8)
             ORDER BY x.created_at DESC, x.id DESC"
        );
        let customers = sqlx::query_as::<_, Customer>(&query)
            .bind(STATUS_CANCELLED)
            .bind(term.map(like_pattern))
            .bind(&filter.status)
            .bind(filter.location.as_deref().map(like_pattern))
            .bind(filter.min_orders)
            .bind(filter.max_orders)
            .bind(filter.min_spent)
            .bind(filter.max_spent)
            .fetch_all(&self.pool)
            .await?;
        Ok(customers)
    }

    async fn find_by_id(&self, id: DbId) -> StoreResult<Option<Customer>> {
        let query = format!("{SELECT_WITH_TOTALS} WHERE c.id = $2");
        let customer = sqlx::query_as::<_, Customer>(&query)
            .bind(STATUS_CANCELLED)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(customer)
    }

    /// Insert a customer. If `status` is omitted, defaults to `active`.
    async fn create(&self, input: &CreateCustomer) -> StoreResult<DbId> {
        let id = sqlx::query_scalar::<_, DbId>(
            "INSERT INTO customers (name, email, phone, company, location, status, notes)
             VALUES ($1, $2, $3, $4, $5, COALESCE($6, $7), $8)
             RETURNING id",
        )
        .bind(&input.name)
        .bind(&input.email)
        .bind(&input.phone)
        .bind(&input.company)
        .bind(&input.location)
        .bind(&input.status)
        .bind(DEFAULT_CUSTOMER_STATUS)
        .bind(&input.notes)
        .fetch_one(&self.pool)
        .await?;
        Ok(id)
    }

    /// Update a customer. Only non-`None` fields in `input` are applied.
    async fn update(&self, id: DbId, input: &UpdateCustomer) -> StoreResult<bool> {
        let result = sqlx::query(
            "UPDATE customers SET
                name = COALESCE($2, name),
                email = COALESCE($3, email),
                phone = COALESCE($4, phone),
                company = COALESCE($5, company),
                location = COALESCE($6, location),
                status = COALESCE($7, status),
                notes = COALESCE($8, notes),
                updated_at = NOW()
             WHERE id = $1",
        )
        .bind(id)
        .bind(&input.name)
        .bind(&input.email)
        .bind(&input.phone)
        .bind(&input.company)
        .bind(&input.location)
        .bind(&input.status)
        .bind(&input.notes)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete a customer that has no orders.
    ///
    /// The order check and the delete run in one transaction; a concurrent
    /// insert that slips past the check still surfaces as a foreign key
    /// violation from `orders.customer_id`.
    async fn delete(&self, id: DbId) -> StoreResult<bool> {
        let mut tx = self.pool.begin().await?;

        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM customers WHERE id = $1)")
                .bind(id)
                .fetch_one(&mut *tx)
                .await?;
        if !exists {
            return Ok(false);
        }

        let order_count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM orders WHERE customer_id = $1")
                .bind(id)
                .fetch_one(&mut *tx)
                .await?;
        if order_count > 0 {
            return Err(StoreError::ForeignKeyViolation(format!(
                "Customer {id} has {order_count} order(s)"
            )));
        }

        let result = sqlx::query("DELETE FROM customers WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        Ok(result.rows_affected() > 0)
    }
}
