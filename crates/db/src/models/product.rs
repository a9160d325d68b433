//! Product entity model and DTOs.

use optom_core::error::CoreError;
use optom_core::types::{DbId, Timestamp};
use optom_core::validation::validate_input;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Products with fewer units than this (but more than zero) count as low stock.
pub const LOW_STOCK_THRESHOLD: i32 = 10;

/// A product row joined with its category name.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub sku: Option<String>,
    pub price: f64,
    pub stock: i32,
    pub category_id: Option<DbId>,
    pub category_name: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Product payload as submitted by clients for both create and update.
///
/// `name` and `price` are optional here so that a missing field is reported
/// as a validation error rather than a deserialization failure.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    #[validate(
        required(message = "Product name is required"),
        length(min = 1, message = "Product name is required")
    )]
    pub name: Option<String>,
    pub description: Option<String>,
    pub sku: Option<String>,
    #[validate(
        required(message = "Price must be a positive number"),
        range(exclusive_min = 0.0, message = "Price must be a positive number")
    )]
    pub price: Option<f64>,
    #[validate(range(min = 0, message = "Stock cannot be negative"))]
    pub stock: Option<i32>,
    pub category_id: Option<DbId>,
}

/// A validated product payload, ready to be persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    pub description: Option<String>,
    pub sku: Option<String>,
    pub price: f64,
    pub stock: i32,
    pub category_id: Option<DbId>,
}

impl ProductInput {
    /// Check the payload and convert it into a [`NewProduct`].
    ///
    /// Blank names are rejected along with missing ones; stock defaults to 0.
    pub fn validated(self) -> Result<NewProduct, CoreError> {
        validate_input(&self)?;
        let name = self
            .name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .ok_or_else(|| CoreError::Validation("Product name is required".into()))?;
        let price = self
            .price
            .filter(|p| p.is_finite() && *p > 0.0)
            .ok_or_else(|| CoreError::Validation("Price must be a positive number".into()))?;

        Ok(NewProduct {
            name,
            description: self.description,
            sku: self.sku,
            price,
            stock: self.stock.unwrap_or(0),
            category_id: self.category_id,
        })
    }
}
