/// Row identifier (`BIGSERIAL` columns).
pub type DbId = i64;

/// `TIMESTAMPTZ` values, always handled in UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
