//! Repository for the `notifications` table.

use async_trait::async_trait;
use optom_core::types::DbId;
use sqlx::PgPool;

use crate::models::notification::{CreateNotification, Notification, DEFAULT_NOTIFICATION_TYPE};
use crate::store::{NotificationStore, StoreResult};

pub struct NotificationRepo {
    pool: PgPool,
}

impl NotificationRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NotificationStore for NotificationRepo {
    /// List all notifications, newest first.
    async fn list(&self) -> StoreResult<Vec<Notification>> {
        let notifications = sqlx::query_as::<_, Notification>(
            "SELECT id, title, message, notification_type, created_at
             FROM notifications
             ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(notifications)
    }

    async fn create(&self, input: &CreateNotification) -> StoreResult<DbId> {
        let id = sqlx::query_scalar::<_, DbId>(
            "INSERT INTO notifications (title, message, notification_type)
             VALUES ($1, $2, COALESCE($3, $4))
             RETURNING id",
        )
        .bind(&input.title)
        .bind(&input.message)
        .bind(&input.notification_type)
        .bind(DEFAULT_NOTIFICATION_TYPE)
        .fetch_one(&self.pool)
        .await?;
        Ok(id)
    }

    async fn delete(&self, id: DbId) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM notifications WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
