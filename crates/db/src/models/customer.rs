//! Customer entity model, DTOs and search filters.

use optom_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Status assigned to customers created without one.
pub const DEFAULT_CUSTOMER_STATUS: &str = "active";

/// A customer row joined with its order aggregates.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: DbId,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub status: String,
    pub notes: Option<String>,
    /// Number of orders placed by this customer.
    pub total_orders: i64,
    /// Sum of `total_amount` over the customer's non-cancelled orders.
    pub total_spent: f64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a customer.
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCustomer {
    #[validate(length(min = 1, message = "Customer name is required"))]
    pub name: String,
    #[validate(email(message = "Email address is invalid"))]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    /// Defaults to `active` if omitted.
    pub status: Option<String>,
    pub notes: Option<String>,
}

/// DTO for updating a customer. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCustomer {
    #[validate(length(min = 1, message = "Customer name cannot be empty"))]
    pub name: Option<String>,
    #[validate(email(message = "Email address is invalid"))]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub status: Option<String>,
    pub notes: Option<String>,
}

/// Optional filters applied alongside a customer search term.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomerFilter {
    pub status: Option<String>,
    /// Case-insensitive substring match on `location`.
    pub location: Option<String>,
    pub min_orders: Option<i64>,
    pub max_orders: Option<i64>,
    pub min_spent: Option<f64>,
    pub max_spent: Option<f64>,
}

impl CustomerFilter {
    /// Whether `customer` satisfies every set filter.
    ///
    /// Mirrors the SQL predicate in the PostgreSQL repository so that
    /// alternative stores filter identically.
    pub fn matches(&self, customer: &Customer) -> bool {
        if let Some(status) = &self.status {
            if &customer.status != status {
                return false;
            }
        }
        if let Some(location) = &self.location {
            let haystack = customer.location.as_deref().unwrap_or_default().to_lowercase();
            if !haystack.contains(&location.to_lowercase()) {
                return false;
            }
        }
        self.min_orders.map_or(true, |min| customer.total_orders >= min)
            && self.max_orders.map_or(true, |max| customer.total_orders <= max)
            && self.min_spent.map_or(true, |min| customer.total_spent >= min)
            && self.max_spent.map_or(true, |max| customer.total_spent <= max)
    }
}
