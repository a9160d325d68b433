//! Store settings categories.
//!
//! Settings are grouped into a fixed set of categories, each stored as a
//! flat JSON object of field name to string or number.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A recognised settings category (the `{category}` path segment).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SettingsCategory {
    Store,
    Payment,
    Shipping,
    Brand,
}

impl SettingsCategory {
    pub const ALL: [SettingsCategory; 4] = [
        SettingsCategory::Store,
        SettingsCategory::Payment,
        SettingsCategory::Shipping,
        SettingsCategory::Brand,
    ];

    /// The value stored in `settings.category` and used in URLs.
    pub fn as_str(self) -> &'static str {
        match self {
            SettingsCategory::Store => "store",
            SettingsCategory::Payment => "payment",
            SettingsCategory::Shipping => "shipping",
            SettingsCategory::Brand => "brand",
        }
    }
}

impl fmt::Display for SettingsCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SettingsCategory {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SettingsCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Unknown settings category '{s}'. Must be one of: store, payment, shipping, brand"
                ))
            })
    }
}

/// Whether `value` is an allowed settings field value (string or number).
pub fn is_flat_value(value: &serde_json::Value) -> bool {
    value.is_string() || value.is_number()
}
