//! Operation traits of the persistence collaborator.
//!
//! One trait per entity. Handlers only see `Arc<dyn ...Store>` handles
//! bundled in [`Store`], so the backing implementation can be swapped (the
//! PostgreSQL repositories in production, in-memory stores in tests).

use std::sync::Arc;

use async_trait::async_trait;
use optom_core::settings::SettingsCategory;
use optom_core::types::DbId;

use crate::error::StoreError;
use crate::models::category::Category;
use crate::models::customer::{CreateCustomer, Customer, CustomerFilter, UpdateCustomer};
use crate::models::dashboard::{DashboardStats, RecentOrder, TopProduct};
use crate::models::notification::{CreateNotification, Notification};
use crate::models::order::{NewOrder, NewOrderItem, Order, OrderItem};
use crate::models::product::{NewProduct, Product};
use crate::models::settings::SettingsMap;
use crate::repositories::{
    CategoryRepo, CustomerRepo, DashboardRepo, HealthRepo, NotificationRepo, OrderRepo,
    ProductRepo, SettingsRepo,
};
use crate::DbPool;

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait CustomerStore: Send + Sync {
    async fn list(&self) -> StoreResult<Vec<Customer>>;

    /// Match `term` against name, email, phone and company, then apply `filter`.
    async fn search(&self, term: Option<&str>, filter: &CustomerFilter)
        -> StoreResult<Vec<Customer>>;

    async fn find_by_id(&self, id: DbId) -> StoreResult<Option<Customer>>;

    async fn create(&self, input: &CreateCustomer) -> StoreResult<DbId>;

    /// Returns `false` if no customer with `id` exists.
    async fn update(&self, id: DbId, input: &UpdateCustomer) -> StoreResult<bool>;

    /// Returns `false` if no customer with `id` exists, and
    /// [`StoreError::ForeignKeyViolation`] if the customer still has orders.
    async fn delete(&self, id: DbId) -> StoreResult<bool>;
}

#[async_trait]
pub trait ProductStore: Send + Sync {
    async fn list(&self) -> StoreResult<Vec<Product>>;

    async fn search(&self, term: &str) -> StoreResult<Vec<Product>>;

    async fn find_by_id(&self, id: DbId) -> StoreResult<Option<Product>>;

    async fn create(&self, input: &NewProduct) -> StoreResult<DbId>;

    /// Returns the updated product, or `None` if it does not exist.
    async fn update(&self, id: DbId, input: &NewProduct) -> StoreResult<Option<Product>>;

    async fn delete(&self, id: DbId) -> StoreResult<bool>;
}

#[async_trait]
pub trait OrderStore: Send + Sync {
    async fn list(&self) -> StoreResult<Vec<Order>>;

    async fn search(&self, term: &str) -> StoreResult<Vec<Order>>;

    async fn find_by_id(&self, id: DbId) -> StoreResult<Option<Order>>;

    async fn items_for_order(&self, order_id: DbId) -> StoreResult<Vec<OrderItem>>;

    /// Persist the order and all of its items as one unit.
    async fn create(&self, order: &NewOrder, items: &[NewOrderItem]) -> StoreResult<DbId>;

    /// Set the order's status. Returns `false` if the order does not exist.
    async fn update_status(&self, id: DbId, status: &str) -> StoreResult<bool>;
}

#[async_trait]
pub trait CategoryStore: Send + Sync {
    async fn list(&self) -> StoreResult<Vec<Category>>;
}

#[async_trait]
pub trait NotificationStore: Send + Sync {
    async fn list(&self) -> StoreResult<Vec<Notification>>;

    async fn create(&self, input: &CreateNotification) -> StoreResult<DbId>;

    async fn delete(&self, id: DbId) -> StoreResult<bool>;
}

#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Stored values for `category`, or `None` if nothing was saved yet.
    async fn get(&self, category: SettingsCategory) -> StoreResult<Option<SettingsMap>>;

    /// Merge `values` into the stored document for `category`.
    async fn update(&self, category: SettingsCategory, values: &SettingsMap) -> StoreResult<()>;
}

#[async_trait]
pub trait DashboardStore: Send + Sync {
    async fn stats(&self) -> StoreResult<DashboardStats>;

    async fn recent_orders(&self, limit: i64) -> StoreResult<Vec<RecentOrder>>;

    async fn top_products(&self, limit: i64) -> StoreResult<Vec<TopProduct>>;
}

#[async_trait]
pub trait HealthProbe: Send + Sync {
    async fn ping(&self) -> StoreResult<()>;
}

/// Handles to every entity store, cheap to clone.
#[derive(Clone)]
pub struct Store {
    pub customers: Arc<dyn CustomerStore>,
    pub products: Arc<dyn ProductStore>,
    pub orders: Arc<dyn OrderStore>,
    pub categories: Arc<dyn CategoryStore>,
    pub notifications: Arc<dyn NotificationStore>,
    pub settings: Arc<dyn SettingsStore>,
    pub dashboard: Arc<dyn DashboardStore>,
    pub health: Arc<dyn HealthProbe>,
}

impl Store {
    /// Wire every store to the PostgreSQL repositories sharing `pool`.
    pub fn postgres(pool: DbPool) -> Self {
        Self {
            customers: Arc::new(CustomerRepo::new(pool.clone())),
            products: Arc::new(ProductRepo::new(pool.clone())),
            orders: Arc::new(OrderRepo::new(pool.clone())),
            categories: Arc::new(CategoryRepo::new(pool.clone())),
            notifications: Arc::new(NotificationRepo::new(pool.clone())),
            settings: Arc::new(SettingsRepo::new(pool.clone())),
            dashboard: Arc::new(DashboardRepo::new(pool.clone())),
            health: Arc::new(HealthRepo::new(pool)),
        }
    }
}
