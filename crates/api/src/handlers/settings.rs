//! Handlers for `/settings/{category}`.
//!
//! Reads fall back to the category defaults. Writes are best-effort: the
//! client is always told the update succeeded and failures are only logged,
//! so the settings screens stay usable against a partially configured
//! backend.

use axum::extract::State;
use axum::Json;
use optom_core::settings::{is_flat_value, SettingsCategory};
use optom_db::models::settings::SettingsMap;
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath};
use crate::handlers::log_no_store;
use crate::response::SuccessResponse;
use crate::state::AppState;

/// GET /api/settings/{category}
///
/// Returns the category defaults overlaid with any stored values.
pub async fn get(
    State(state): State<AppState>,
    AppPath(category): AppPath<String>,
) -> AppResult<Json<SettingsMap>> {
    let category: SettingsCategory = category.parse()?;
    let mut settings = state.fallbacks.settings(category);

    let Some(store) = &state.store else {
        log_no_store("settings.get");
        return Ok(Json(settings));
    };

    match store.settings.get(category).await {
        Ok(Some(stored)) => settings.extend(stored),
        Ok(None) => {}
        Err(e) => {
            tracing::warn!(%category, error = %e, "Failed to load settings, serving defaults");
        }
    }
    Ok(Json(settings))
}

/// PUT /api/settings/{category}
///
/// Always responds `{ "success": true }` for a recognised category.
/// Values that are not strings or numbers are dropped, and a body that is
/// not a JSON object is treated as an empty update.
pub async fn update(
    State(state): State<AppState>,
    AppPath(category): AppPath<String>,
    body: Result<AppJson<Value>, AppError>,
) -> AppResult<Json<SuccessResponse>> {
    let category: SettingsCategory = category.parse()?;

    let values = match body {
        Ok(AppJson(Value::Object(values))) => values,
        Ok(AppJson(other)) => {
            tracing::warn!(
                %category,
                kind = json_kind(&other),
                "Settings body is not an object, nothing to update"
            );
            SettingsMap::new()
        }
        Err(e) => {
            tracing::warn!(%category, error = %e, "Unreadable settings body, nothing to update");
            SettingsMap::new()
        }
    };

    let (flat, rejected): (SettingsMap, SettingsMap) =
        values.into_iter().partition(|(_, v)| is_flat_value(v));
    if !rejected.is_empty() {
        let fields: Vec<_> = rejected.keys().map(String::as_str).collect();
        tracing::warn!(%category, ?fields, "Ignoring settings values that are not strings or numbers");
    }

    match &state.store {
        Some(store) => {
            if let Err(e) = store.settings.update(category, &flat).await {
                tracing::error!(%category, error = %e, "Failed to update settings");
            }
        }
        None => {
            tracing::error!(%category, "Failed to update settings: no store connected");
        }
    }
    Ok(Json(SuccessResponse::OK))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
