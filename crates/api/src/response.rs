//! Shared response body types for API handlers.

use optom_core::types::DbId;
use serde::Serialize;
use serde_json::Value;

use crate::error::{AppError, AppResult};

/// `{ "success": true }` acknowledgement for updates and deletes.
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub const OK: SuccessResponse = SuccessResponse { success: true };
}

/// Merge a store-assigned `id` into the submitted payload.
///
/// Create endpoints echo what the client sent plus the new identifier.
pub fn with_id<T: Serialize>(id: DbId, payload: &T) -> AppResult<Value> {
    let mut value = serde_json::to_value(payload)
        .map_err(|e| AppError::InternalError(format!("Failed to serialize payload: {e}")))?;
    match value.as_object_mut() {
        Some(object) => {
            object.insert("id".into(), Value::from(id));
            Ok(value)
        }
        None => Err(AppError::InternalError(
            "Create payload did not serialize to an object".into(),
        )),
    }
}
