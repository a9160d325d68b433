//! Repository for the `products` table.

use async_trait::async_trait;
use optom_core::types::DbId;
use sqlx::PgPool;

use crate::models::product::{NewProduct, Product};
use crate::repositories::like_pattern;
use crate::store::{ProductStore, StoreResult};

/// Column list shared across queries, with `p` aliasing `products` and `c`
/// aliasing `categories`.
const COLUMNS: &str = "p.id, p.name, p.description, p.sku, p.price, p.stock, p.category_id,
     c.name AS category_name, p.created_at, p.updated_at";

pub struct ProductRepo {
    pool: PgPool,
}

impl ProductRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductStore for ProductRepo {
    /// List all products, most recently created first.
    async fn list(&self) -> StoreResult<Vec<Product>> {
        let query = format!(
            "SELECT {COLUMNS} FROM products p
             LEFT JOIN categories c ON c.id = p.category_id
             ORDER BY p.created_at DESC, p.id DESC"
        );
        let products = sqlx::query_as::<_, Product>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(products)
    }

    /// Match `term` against name, description, SKU and category name.
    async fn search(&self, term: &str) -> StoreResult<Vec<Product>> {
        let query = format!(
            "SELECT {COLUMNS} FROM products p
             LEFT JOIN categories c ON c.id = p.category_id
             WHERE p.name ILIKE $1 OR p.description ILIKE $1
                OR p.sku ILIKE $1 OR c.name ILIKE $1
             ORDER BY p.created_at DESC, p.id DESC"
        );
        let products = sqlx::query_as::<_, Product>(&query)
            .bind(like_pattern(term))
            .fetch_all(&self.pool)
            .await?;
        Ok(products)
    }

    async fn find_by_id(&self, id: DbId) -> StoreResult<Option<Product>> {
        let query = format!(
            "SELECT {COLUMNS} FROM products p
             LEFT JOIN categories c ON c.id = p.category_id
             WHERE p.id = $1"
        );
        let product = sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(product)
    }

    async fn create(&self, input: &NewProduct) -> StoreResult<DbId> {
        let id = sqlx::query_scalar::<_, DbId>(
            "INSERT INTO products (name, description, sku, price, stock, category_id)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING id",
        )
        .bind(&input.name)
        .bind(&input.description)
        .bind(&input.sku)
        .bind(input.price)
        .bind(input.stock)
        .bind(input.category_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(id)
    }

    /// Replace a product's fields. Returns `None` if no row with `id` exists.
    async fn update(&self, id: DbId, input: &NewProduct) -> StoreResult<Option<Product>> {
        let query = format!(
            "WITH p AS (
                UPDATE products SET
                    name = $2,
                    description = $3,
                    sku = $4,
                    price = $5,
                    stock = $6,
                    category_id = $7,
                    updated_at = NOW()
                WHERE id = $1
                RETURNING *
             )
             SELECT {COLUMNS} FROM p
             LEFT JOIN categories c ON c.id = p.category_id"
        );
        let product = sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.sku)
            .bind(input.price)
            .bind(input.stock)
            .bind(input.category_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(product)
    }

    /// Delete a product. Order items keep their copied name and lose the link.
    async fn delete(&self, id: DbId) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
