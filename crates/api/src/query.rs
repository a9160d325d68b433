//! Shared query parameter types for API handlers.

use optom_core::types::DbId;
use optom_db::models::customer::CustomerFilter;
use serde::Deserialize;

/// `?search=` on collections that support free-text search.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub search: Option<String>,
}

/// Query parameters for `GET /customers`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerListParams {
    pub search: Option<String>,
    pub status: Option<String>,
    pub location: Option<String>,
    pub min_orders: Option<i64>,
    pub max_orders: Option<i64>,
}

impl CustomerListParams {
    pub fn filter(&self) -> CustomerFilter {
        CustomerFilter {
            status: non_blank(&self.status),
            location: non_blank(&self.location),
            min_orders: self.min_orders,
            max_orders: self.max_orders,
            min_spent: None,
            max_spent: None,
        }
    }
}

/// Query parameters for `GET /customers/search`: the list filters plus spend bounds.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerSearchParams {
    #[serde(alias = "q")]
    pub search: Option<String>,
    pub status: Option<String>,
    pub location: Option<String>,
    pub min_orders: Option<i64>,
    pub max_orders: Option<i64>,
    pub min_spent: Option<f64>,
    pub max_spent: Option<f64>,
}

impl CustomerSearchParams {
    pub fn filter(&self) -> CustomerFilter {
        CustomerFilter {
            status: non_blank(&self.status),
            location: non_blank(&self.location),
            min_orders: self.min_orders,
            max_orders: self.max_orders,
            min_spent: self.min_spent,
            max_spent: self.max_spent,
        }
    }
}

/// `?id=` for `DELETE /notifications`.
#[derive(Debug, Deserialize)]
pub struct IdParam {
    pub id: Option<DbId>,
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
