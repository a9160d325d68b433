/// Errors returned by the persistence collaborator.
///
/// Absence is not an error: lookups return `Option` and mutations return
/// `bool`/`Option` so callers can tell "not found" apart from a failure.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The operation would break a reference from dependent rows.
    #[error("Foreign key violation: {0}")]
    ForeignKeyViolation(String),

    /// A write collided with a named unique constraint (`uq_*`).
    #[error("Unique violation: {0}")]
    UniqueViolation(String),

    /// The backing store could not be reached.
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Database error: {0}")]
    Database(sqlx::Error),
}

/// PostgreSQL SQLSTATE for `foreign_key_violation`.
const PG_FOREIGN_KEY_VIOLATION: &str = "23503";

/// PostgreSQL SQLSTATE for `unique_violation`.
const PG_UNIQUE_VIOLATION: &str = "23505";

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            let constraint = db_err.constraint().unwrap_or("unknown");
            match db_err.code().as_deref() {
                Some(PG_FOREIGN_KEY_VIOLATION) => {
                    return StoreError::ForeignKeyViolation(format!(
                        "Row is still referenced (constraint {constraint})"
                    ));
                }
                Some(PG_UNIQUE_VIOLATION) if constraint.starts_with("uq_") => {
                    return StoreError::UniqueViolation(format!(
                        "Duplicate value violates unique constraint: {constraint}"
                    ));
                }
                _ => {}
            }
        }

        match err {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                StoreError::Unavailable(err.to_string())
            }
            other => StoreError::Database(other),
        }
    }
}
