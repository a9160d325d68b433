//! Repository for the `settings` table: one JSONB document per category.

use async_trait::async_trait;
use optom_core::settings::SettingsCategory;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::settings::SettingsMap;
use crate::store::{SettingsStore, StoreResult};

pub struct SettingsRepo {
    pool: PgPool,
}

impl SettingsRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SettingsStore for SettingsRepo {
    async fn get(&self, category: SettingsCategory) -> StoreResult<Option<SettingsMap>> {
        let row: Option<Json<SettingsMap>> =
            sqlx::query_scalar("SELECT data FROM settings WHERE category = $1")
                .bind(category.as_str())
                .fetch_optional(&self.pool)
                .await?;
        Ok(row.map(|Json(data)| data))
    }

    /// Upsert the category document, merging `values` over stored keys.
    async fn update(&self, category: SettingsCategory, values: &SettingsMap) -> StoreResult<()> {
        sqlx::query(
            "INSERT INTO settings (category, data)
             VALUES ($1, $2)
             ON CONFLICT (category) DO UPDATE
             SET data = settings.data || EXCLUDED.data, updated_at = NOW()",
        )
        .bind(category.as_str())
        .bind(Json(values))
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
