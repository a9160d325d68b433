use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use optom_core::error::CoreError;
use optom_db::StoreError;
use serde_json::json;

/// Error returned by every HTTP handler.
///
/// Wraps [`CoreError`] for domain errors and [`StoreError`] for persistence
/// failures, and adds HTTP-specific variants. Implements [`IntoResponse`] to
/// produce consistent `{ "error", "code" }` JSON bodies.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `optom_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A failure reported by the persistence collaborator.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The request is malformed in a way the extractors did not catch.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// No persistence collaborator was available at startup.
    #[error("Database is not available")]
    Unavailable,

    /// An unexpected failure. The message is logged, never returned.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Result alias used by handlers.
pub type AppResult<T> = Result<T, AppError>;

/// Error code for deletes blocked by dependent records.
pub const FOREIGN_KEY_CONSTRAINT: &str = "FOREIGN_KEY_CONSTRAINT";

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- Domain errors ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::ForeignKeyConstraint(msg) => {
                    (StatusCode::BAD_REQUEST, FOREIGN_KEY_CONSTRAINT, msg.clone())
                }
            },

            // --- Persistence errors ---
            AppError::Store(err) => classify_store_error(err),

            // --- Request and availability errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::Unavailable => {
                tracing::error!("Request needs the database but no store is connected");
                unavailable()
            }
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal()
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            // Well-formed JSON whose fields have the wrong shape or type.
            JsonRejection::JsonDataError(err) => {
                AppError::Core(CoreError::Validation(err.body_text()))
            }
            other => AppError::BadRequest(other.body_text()),
        }
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

fn unavailable() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "DATABASE_UNAVAILABLE",
        "Database is not available".to_string(),
    )
}

fn internal() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}

/// Classify a store error into an HTTP status, error code, and message.
///
/// - Foreign key violations map to 400 `FOREIGN_KEY_CONSTRAINT`.
/// - Unique violations on `uq_*` constraints map to 409.
/// - An unreachable database maps to 500 `DATABASE_UNAVAILABLE`.
/// - `RowNotFound` maps to 404.
/// - Any other failure is logged and maps to 500 `INTERNAL_ERROR`.
fn classify_store_error(err: &StoreError) -> (StatusCode, &'static str, String) {
    match err {
        StoreError::ForeignKeyViolation(msg) => {
            (StatusCode::BAD_REQUEST, FOREIGN_KEY_CONSTRAINT, msg.clone())
        }
        StoreError::UniqueViolation(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
        StoreError::Unavailable(detail) => {
            tracing::error!(error = %detail, "Database unreachable");
            unavailable()
        }
        StoreError::Database(sqlx::Error::RowNotFound) => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        other => {
            tracing::error!(error = %other, "Store error");
            internal()
        }
    }
}
