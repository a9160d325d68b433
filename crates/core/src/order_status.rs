//! Order status vocabulary.
//!
//! Statuses are stored as free text in `orders.status`. The constants below
//! are the values the storefront produces and the dashboard aggregates over;
//! status updates are not checked against this list.

pub const STATUS_PENDING: &str = "pending";
pub const STATUS_PROCESSING: &str = "processing";
pub const STATUS_SHIPPED: &str = "shipped";
pub const STATUS_DELIVERED: &str = "delivered";
pub const STATUS_CANCELLED: &str = "cancelled";

/// Status assigned to new orders that do not specify one.
pub const DEFAULT_STATUS: &str = STATUS_PENDING;

/// All statuses the dashboard reports on, in lifecycle order.
pub const KNOWN_STATUSES: &[&str] = &[
    STATUS_PENDING,
    STATUS_PROCESSING,
    STATUS_SHIPPED,
    STATUS_DELIVERED,
    STATUS_CANCELLED,
];

/// Whether `status` is one of [`KNOWN_STATUSES`]. Case-sensitive.
pub fn is_known_status(status: &str) -> bool {
    KNOWN_STATUSES.contains(&status)
}
