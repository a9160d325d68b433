//! Domain error type shared by every layer.

use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    /// A delete was rejected because dependent records still reference the target.
    #[error("Foreign key constraint: {0}")]
    ForeignKeyConstraint(String),
}
