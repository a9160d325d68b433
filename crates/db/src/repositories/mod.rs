//! PostgreSQL implementations of the store traits.
//!
//! Each repository holds a clone of the shared pool and implements one
//! trait from [`crate::store`].

pub mod category_repo;
pub mod customer_repo;
pub mod dashboard_repo;
pub mod health_repo;
pub mod notification_repo;
pub mod order_repo;
pub mod product_repo;
pub mod settings_repo;

pub use category_repo::CategoryRepo;
pub use customer_repo::CustomerRepo;
pub use dashboard_repo::DashboardRepo;
pub use health_repo::HealthRepo;
pub use notification_repo::NotificationRepo;
pub use order_repo::OrderRepo;
pub use product_repo::ProductRepo;
pub use settings_repo::SettingsRepo;

/// Build an `ILIKE` pattern matching `term` anywhere, with `%`, `_` and `\`
/// in the term matched literally.
pub fn like_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped.push('%');
    escaped
}
