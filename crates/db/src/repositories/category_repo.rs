//! Repository for the `categories` table.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::models::category::Category;
use crate::store::{CategoryStore, StoreResult};

pub struct CategoryRepo {
    pool: PgPool,
}

impl CategoryRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryStore for CategoryRepo {
    /// List all categories ordered by ID.
    async fn list(&self) -> StoreResult<Vec<Category>> {
        let categories =
            sqlx::query_as::<_, Category>("SELECT id, name FROM categories ORDER BY id")
                .fetch_all(&self.pool)
                .await?;
        Ok(categories)
    }
}
