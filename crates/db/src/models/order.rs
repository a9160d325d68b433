//! Order and order item models and DTOs.

use optom_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// An order row joined with the customer's name.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: DbId,
    pub order_number: String,
    pub customer_id: DbId,
    pub customer_name: Option<String>,
    pub total_amount: f64,
    pub status: String,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `order_items` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: DbId,
    pub order_id: DbId,
    pub product_id: Option<DbId>,
    pub product_name: String,
    pub quantity: i32,
    pub price: f64,
}

/// An order with its line items inlined.
#[derive(Debug, Clone, Serialize)]
pub struct OrderDetail {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItem>,
}

/// Order fields of a create request.
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    pub customer_id: DbId,
    /// Assigned by the store (`ORD-000042`) if omitted.
    pub order_number: Option<String>,
    /// Computed from the items if omitted.
    #[validate(range(min = 0.0, message = "Total amount cannot be negative"))]
    pub total_amount: Option<f64>,
    /// Defaults to `pending` if omitted.
    pub status: Option<String>,
    pub notes: Option<String>,
}

/// One line item of a create request.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewOrderItem {
    pub product_id: Option<DbId>,
    #[serde(default)]
    pub product_name: String,
    #[validate(range(min = 1, message = "Item quantity must be at least 1"))]
    pub quantity: i32,
    #[validate(range(min = 0.0, message = "Item price cannot be negative"))]
    pub price: f64,
}

/// Body of `POST /orders`: the order and its items, persisted together.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateOrderRequest {
    #[validate(nested)]
    pub order: NewOrder,
    #[serde(default)]
    #[validate(nested)]
    pub items: Vec<NewOrderItem>,
}

/// Body of `PUT /orders/{id}/status`.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateOrderStatus {
    pub status: String,
}

/// Order number assigned to orders created without one.
pub fn default_order_number(id: DbId) -> String {
    format!("ORD-{id:06}")
}

/// Sum of quantity x price over `items`.
pub fn items_total(items: &[NewOrderItem]) -> f64 {
    items
        .iter()
        .map(|item| f64::from(item.quantity) * item.price)
        .sum()
}
