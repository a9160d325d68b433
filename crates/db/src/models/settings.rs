//! Settings documents.

/// One settings category: a flat object of field name to string or number.
pub type SettingsMap = serde_json::Map<String, serde_json::Value>;
