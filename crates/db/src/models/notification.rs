//! Notification model and DTOs.

use optom_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Type assigned to notifications created without one.
pub const DEFAULT_NOTIFICATION_TYPE: &str = "info";

/// A row from the `notifications` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: DbId,
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    pub notification_type: String,
    pub created_at: Timestamp,
}

/// DTO for creating a notification.
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateNotification {
    #[serde(default)]
    pub title: String,
    #[validate(length(min = 1, message = "Notification message is required"))]
    pub message: String,
    /// Defaults to `info` if omitted.
    #[serde(rename = "type")]
    pub notification_type: Option<String>,
}
