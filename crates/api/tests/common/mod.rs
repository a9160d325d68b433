#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use chrono::Utc;
use http_body_util::BodyExt;
use tower::ServiceExt;

use optom_api::config::{LogFormat, ServerConfig};
use optom_api::router::build_app_router;
use optom_api::state::AppState;
use optom_core::order_status::{DEFAULT_STATUS, STATUS_CANCELLED};
use optom_core::settings::SettingsCategory;
use optom_core::types::DbId;
use optom_db::models::category::Category;
use optom_db::models::customer::{
    CreateCustomer, Customer, CustomerFilter, UpdateCustomer, DEFAULT_CUSTOMER_STATUS,
};
use optom_db::models::dashboard::{DashboardStats, RecentOrder, TopProduct};
use optom_db::models::notification::{
    CreateNotification, Notification, DEFAULT_NOTIFICATION_TYPE,
};
use optom_db::models::order::{
    default_order_number, items_total, NewOrder, NewOrderItem, Order, OrderItem,
};
use optom_db::models::product::{NewProduct, Product, LOW_STOCK_THRESHOLD};
use optom_db::models::settings::SettingsMap;
use optom_db::store::{
    CategoryStore, CustomerStore, DashboardStore, HealthProbe, NotificationStore, OrderStore,
    ProductStore, SettingsStore, StoreResult,
};
use optom_db::{Store, StoreError};

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        database_url: None,
        db_max_connections: 1,
        log_format: LogFormat::Text,
    }
}

/// Build the full application router (same middleware stack as `main.rs`)
/// around `store`. `None` simulates a server that started without a database.
pub fn build_test_app(store: Option<Store>) -> Router {
    let config = test_config();
    build_app_router(AppState::new(store, config.clone()), &config)
}

/// An app backed by a fresh in-memory store, plus a handle to that store
/// for seeding and inspection.
pub fn memory_app() -> (Router, Arc<MemoryStore>) {
    let memory = Arc::new(MemoryStore::default());
    (build_test_app(Some(memory.store())), memory)
}

/// An app whose every store call fails.
pub fn failing_app() -> Router {
    build_test_app(Some(failing_store()))
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, Method::PUT, uri, Some(body)).await
}

pub async fn delete(app: Router, uri: &str) -> Response {
    send(app, Method::DELETE, uri, None).await
}

/// Send `body` verbatim with a JSON content type, for payloads that are not
/// valid JSON.
pub async fn send_raw(app: Router, method: Method, uri: &str, body: &'static str) -> Response {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

async fn send(app: Router, method: Method, uri: &str, body: Option<serde_json::Value>) -> Response {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// In-memory store
// ---------------------------------------------------------------------------

#[derive(Default)]
struct MemoryData {
    next_id: DbId,
    customers: Vec<Customer>,
    products: Vec<Product>,
    orders: Vec<Order>,
    items: Vec<OrderItem>,
    categories: Vec<Category>,
    notifications: Vec<Notification>,
    settings: HashMap<SettingsCategory, SettingsMap>,
}

impl MemoryData {
    fn next_id(&mut self) -> DbId {
        self.next_id += 1;
        self.next_id
    }

    /// A customer with its order aggregates recomputed from `orders`.
    fn with_aggregates(&self, customer: &Customer) -> Customer {
        let orders = self.orders.iter().filter(|o| o.customer_id == customer.id);
        let mut out = customer.clone();
        out.total_orders = orders.clone().count() as i64;
        out.total_spent = orders
            .filter(|o| o.status != STATUS_CANCELLED)
            .map(|o| o.total_amount)
            .sum();
        out
    }

    fn category_name(&self, id: Option<DbId>) -> Option<String> {
        let id = id?;
        self.categories
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.name.clone())
    }
}

/// A single in-memory backend implementing every store trait.
#[derive(Default)]
pub struct MemoryStore {
    data: Mutex<MemoryData>,
}

impl MemoryStore {
    /// Wire every handle of a [`Store`] to this backend.
    pub fn store(self: &Arc<Self>) -> Store {
        Store {
            customers: self.clone(),
            products: self.clone(),
            orders: self.clone(),
            categories: self.clone(),
            notifications: self.clone(),
            settings: self.clone(),
            dashboard: self.clone(),
            health: self.clone(),
        }
    }

    pub fn add_category(&self, name: &str) -> DbId {
        let mut data = self.data.lock().unwrap();
        let id = data.next_id();
        data.categories.push(Category::new(id, name));
        id
    }

    pub fn customer_count(&self) -> usize {
        self.data.lock().unwrap().customers.len()
    }

    pub fn stored_settings(&self, category: SettingsCategory) -> Option<SettingsMap> {
        self.data.lock().unwrap().settings.get(&category).cloned()
    }
}

fn contains_ci(haystack: Option<&str>, needle: &str) -> bool {
    haystack
        .map(|h| h.to_lowercase().contains(&needle.to_lowercase()))
        .unwrap_or(false)
}

#[async_trait]
impl CustomerStore for MemoryStore {
    async fn list(&self) -> StoreResult<Vec<Customer>> {
        let data = self.data.lock().unwrap();
        Ok(data.customers.iter().map(|c| data.with_aggregates(c)).collect())
    }

    async fn search(
        &self,
        term: Option<&str>,
        filter: &CustomerFilter,
    ) -> StoreResult<Vec<Customer>> {
        let data = self.data.lock().unwrap();
        Ok(data
            .customers
            .iter()
            .map(|c| data.with_aggregates(c))
            .filter(|c| {
                term.map_or(true, |t| {
                    contains_ci(Some(c.name.as_str()), t)
                        || contains_ci(c.email.as_deref(), t)
                        || contains_ci(c.phone.as_deref(), t)
                        || contains_ci(c.company.as_deref(), t)
                })
            })
            .filter(|c| filter.matches(c))
            .collect())
    }

    async fn find_by_id(&self, id: DbId) -> StoreResult<Option<Customer>> {
        let data = self.data.lock().unwrap();
        Ok(data
            .customers
            .iter()
            .find(|c| c.id == id)
            .map(|c| data.with_aggregates(c)))
    }

    async fn create(&self, input: &CreateCustomer) -> StoreResult<DbId> {
        let mut data = self.data.lock().unwrap();
        let id = data.next_id();
        let now = Utc::now();
        data.customers.push(Customer {
            id,
            name: input.name.clone(),
            email: input.email.clone(),
            phone: input.phone.clone(),
            company: input.company.clone(),
            location: input.location.clone(),
            status: input
                .status
                .clone()
                .unwrap_or_else(|| DEFAULT_CUSTOMER_STATUS.to_string()),
            notes: input.notes.clone(),
            total_orders: 0,
            total_spent: 0.0,
            created_at: now,
            updated_at: now,
        });
        Ok(id)
    }

    async fn update(&self, id: DbId, input: &UpdateCustomer) -> StoreResult<bool> {
        let mut data = self.data.lock().unwrap();
        let Some(c) = data.customers.iter_mut().find(|c| c.id == id) else {
            return Ok(false);
        };
        if let Some(name) = &input.name {
            c.name = name.clone();
        }
        if let Some(status) = &input.status {
            c.status = status.clone();
        }
        c.email = input.email.clone().or(c.email.take());
        c.phone = input.phone.clone().or(c.phone.take());
        c.company = input.company.clone().or(c.company.take());
        c.location = input.location.clone().or(c.location.take());
        c.notes = input.notes.clone().or(c.notes.take());
        c.updated_at = Utc::now();
        Ok(true)
    }

    async fn delete(&self, id: DbId) -> StoreResult<bool> {
        let mut data = self.data.lock().unwrap();
        if data.orders.iter().any(|o| o.customer_id == id) {
            return Err(StoreError::ForeignKeyViolation(
                "orders_customer_id_fkey".into(),
            ));
        }
        let before = data.customers.len();
        data.customers.retain(|c| c.id != id);
        Ok(data.customers.len() < before)
    }
}

#[async_trait]
impl ProductStore for MemoryStore {
    async fn list(&self) -> StoreResult<Vec<Product>> {
        Ok(self.data.lock().unwrap().products.clone())
    }

    async fn search(&self, term: &str) -> StoreResult<Vec<Product>> {
        let data = self.data.lock().unwrap();
        Ok(data
            .products
            .iter()
            .filter(|p| {
                contains_ci(Some(p.name.as_str()), term)
                    || contains_ci(p.sku.as_deref(), term)
                    || contains_ci(p.description.as_deref(), term)
            })
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: DbId) -> StoreResult<Option<Product>> {
        let data = self.data.lock().unwrap();
        Ok(data.products.iter().find(|p| p.id == id).cloned())
    }

    async fn create(&self, input: &NewProduct) -> StoreResult<DbId> {
        let mut data = self.data.lock().unwrap();
        let id = data.next_id();
        let now = Utc::now();
        let category_name = data.category_name(input.category_id);
        data.products.push(Product {
            id,
            name: input.name.clone(),
            description: input.description.clone(),
            sku: input.sku.clone(),
            price: input.price,
            stock: input.stock,
            category_id: input.category_id,
            category_name,
            created_at: now,
            updated_at: now,
        });
        Ok(id)
    }

    async fn update(&self, id: DbId, input: &NewProduct) -> StoreResult<Option<Product>> {
        let mut data = self.data.lock().unwrap();
        let category_name = data.category_name(input.category_id);
        let Some(p) = data.products.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        p.name = input.name.clone();
        p.description = input.description.clone();
        p.sku = input.sku.clone();
        p.price = input.price;
        p.stock = input.stock;
        p.category_id = input.category_id;
        p.category_name = category_name;
        p.updated_at = Utc::now();
        Ok(Some(p.clone()))
    }

    async fn delete(&self, id: DbId) -> StoreResult<bool> {
        let mut data = self.data.lock().unwrap();
        let before = data.products.len();
        data.products.retain(|p| p.id != id);
        Ok(data.products.len() < before)
    }
}

#[async_trait]
impl OrderStore for MemoryStore {
    async fn list(&self) -> StoreResult<Vec<Order>> {
        let data = self.data.lock().unwrap();
        let mut orders = data.orders.clone();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(orders)
    }

    async fn search(&self, term: &str) -> StoreResult<Vec<Order>> {
        let data = self.data.lock().unwrap();
        Ok(data
            .orders
            .iter()
            .filter(|o| {
                contains_ci(Some(o.order_number.as_str()), term)
                    || contains_ci(o.customer_name.as_deref(), term)
            })
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: DbId) -> StoreResult<Option<Order>> {
        let data = self.data.lock().unwrap();
        Ok(data.orders.iter().find(|o| o.id == id).cloned())
    }

    async fn items_for_order(&self, order_id: DbId) -> StoreResult<Vec<OrderItem>> {
        let data = self.data.lock().unwrap();
        Ok(data
            .items
            .iter()
            .filter(|i| i.order_id == order_id)
            .cloned()
            .collect())
    }

    async fn create(&self, order: &NewOrder, items: &[NewOrderItem]) -> StoreResult<DbId> {
        let mut data = self.data.lock().unwrap();
        let customer_name = data
            .customers
            .iter()
            .find(|c| c.id == order.customer_id)
            .map(|c| c.name.clone())
            .ok_or_else(|| StoreError::ForeignKeyViolation("orders_customer_id_fkey".into()))?;

        let id = data.next_id();
        let now = Utc::now();
        data.orders.push(Order {
            id,
            order_number: order
                .order_number
                .clone()
                .unwrap_or_else(|| default_order_number(id)),
            customer_id: order.customer_id,
            customer_name: Some(customer_name),
            total_amount: order.total_amount.unwrap_or_else(|| items_total(items)),
            status: order
                .status
                .clone()
                .unwrap_or_else(|| DEFAULT_STATUS.to_string()),
            notes: order.notes.clone(),
            created_at: now,
            updated_at: now,
        });
        for item in items {
            let item_id = data.next_id();
            data.items.push(OrderItem {
                id: item_id,
                order_id: id,
                product_id: item.product_id,
                product_name: item.product_name.clone(),
                quantity: item.quantity,
                price: item.price,
            });
        }
        Ok(id)
    }

    async fn update_status(&self, id: DbId, status: &str) -> StoreResult<bool> {
        let mut data = self.data.lock().unwrap();
        let Some(o) = data.orders.iter_mut().find(|o| o.id == id) else {
            return Ok(false);
        };
        o.status = status.to_string();
        o.updated_at = Utc::now();
        Ok(true)
    }
}

#[async_trait]
impl CategoryStore for MemoryStore {
    async fn list(&self) -> StoreResult<Vec<Category>> {
        Ok(self.data.lock().unwrap().categories.clone())
    }
}

#[async_trait]
impl NotificationStore for MemoryStore {
    async fn list(&self) -> StoreResult<Vec<Notification>> {
        let mut notifications = self.data.lock().unwrap().notifications.clone();
        notifications.reverse();
        Ok(notifications)
    }

    async fn create(&self, input: &CreateNotification) -> StoreResult<DbId> {
        let mut data = self.data.lock().unwrap();
        let id = data.next_id();
        data.notifications.push(Notification {
            id,
            title: input.title.clone(),
            message: input.message.clone(),
            notification_type: input
                .notification_type
                .clone()
                .unwrap_or_else(|| DEFAULT_NOTIFICATION_TYPE.to_string()),
            created_at: Utc::now(),
        });
        Ok(id)
    }

    async fn delete(&self, id: DbId) -> StoreResult<bool> {
        let mut data = self.data.lock().unwrap();
        let before = data.notifications.len();
        data.notifications.retain(|n| n.id != id);
        Ok(data.notifications.len() < before)
    }
}

#[async_trait]
impl SettingsStore for MemoryStore {
    async fn get(&self, category: SettingsCategory) -> StoreResult<Option<SettingsMap>> {
        Ok(self.data.lock().unwrap().settings.get(&category).cloned())
    }

    async fn update(&self, category: SettingsCategory, values: &SettingsMap) -> StoreResult<()> {
        let mut data = self.data.lock().unwrap();
        data.settings
            .entry(category)
            .or_default()
            .extend(values.clone());
        Ok(())
    }
}

#[async_trait]
impl DashboardStore for MemoryStore {
    async fn stats(&self) -> StoreResult<DashboardStats> {
        let data = self.data.lock().unwrap();
        let with_status =
            |status: &str| data.orders.iter().filter(|o| o.status == status).count() as i64;
        Ok(DashboardStats {
            total_customers: data.customers.len() as i64,
            total_products: data.products.len() as i64,
            total_orders: data.orders.len() as i64,
            pending_orders: with_status("pending"),
            processing_orders: with_status("processing"),
            shipped_orders: with_status("shipped"),
            delivered_orders: with_status("delivered"),
            cancelled_orders: with_status("cancelled"),
            low_stock_products: data
                .products
                .iter()
                .filter(|p| p.stock > 0 && p.stock < LOW_STOCK_THRESHOLD)
                .count() as i64,
            out_of_stock_products: data.products.iter().filter(|p| p.stock <= 0).count() as i64,
            total_revenue: data
                .orders
                .iter()
                .filter(|o| o.status != STATUS_CANCELLED)
                .map(|o| o.total_amount)
                .sum(),
        })
    }

    async fn recent_orders(&self, limit: i64) -> StoreResult<Vec<RecentOrder>> {
        let orders = OrderStore::list(self).await?;
        Ok(orders
            .into_iter()
            .take(limit as usize)
            .map(|o| RecentOrder {
                id: o.id,
                order_number: o.order_number,
                customer_name: o.customer_name.unwrap_or_default(),
                total_amount: o.total_amount,
                status: o.status,
                created_at: o.created_at,
            })
            .collect())
    }

    async fn top_products(&self, limit: i64) -> StoreResult<Vec<TopProduct>> {
        let data = self.data.lock().unwrap();
        let mut sold: HashMap<DbId, (String, i64, f64)> = HashMap::new();
        for item in &data.items {
            if let Some(product_id) = item.product_id {
                let entry = sold
                    .entry(product_id)
                    .or_insert_with(|| (item.product_name.clone(), 0, 0.0));
                entry.1 += i64::from(item.quantity);
                entry.2 += f64::from(item.quantity) * item.price;
            }
        }
        let mut ranked: Vec<TopProduct> = sold
            .into_iter()
            .map(|(id, (name, total_sold, revenue))| TopProduct {
                id,
                name,
                total_sold,
                revenue,
            })
            .collect();
        ranked.sort_by(|a, b| b.total_sold.cmp(&a.total_sold).then(a.id.cmp(&b.id)));
        ranked.truncate(limit as usize);
        Ok(ranked)
    }
}

#[async_trait]
impl HealthProbe for MemoryStore {
    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Failing store
// ---------------------------------------------------------------------------

/// A backend whose every call reports the database as unreachable.
pub struct FailingStore;

fn down<T>() -> StoreResult<T> {
    Err(StoreError::Unavailable("connection refused".into()))
}

/// A [`Store`] whose every handle is a [`FailingStore`].
pub fn failing_store() -> Store {
    let failing = Arc::new(FailingStore);
    Store {
        customers: failing.clone(),
        products: failing.clone(),
        orders: failing.clone(),
        categories: failing.clone(),
        notifications: failing.clone(),
        settings: failing.clone(),
        dashboard: failing.clone(),
        health: failing,
    }
}

#[async_trait]
impl CustomerStore for FailingStore {
    async fn list(&self) -> StoreResult<Vec<Customer>> {
        down()
    }
    async fn search(&self, _: Option<&str>, _: &CustomerFilter) -> StoreResult<Vec<Customer>> {
        down()
    }
    async fn find_by_id(&self, _: DbId) -> StoreResult<Option<Customer>> {
        down()
    }
    async fn create(&self, _: &CreateCustomer) -> StoreResult<DbId> {
        down()
    }
    async fn update(&self, _: DbId, _: &UpdateCustomer) -> StoreResult<bool> {
        down()
    }
    async fn delete(&self, _: DbId) -> StoreResult<bool> {
        down()
    }
}

#[async_trait]
impl ProductStore for FailingStore {
    async fn list(&self) -> StoreResult<Vec<Product>> {
        down()
    }
    async fn search(&self, _: &str) -> StoreResult<Vec<Product>> {
        down()
    }
    async fn find_by_id(&self, _: DbId) -> StoreResult<Option<Product>> {
        down()
    }
    async fn create(&self, _: &NewProduct) -> StoreResult<DbId> {
        down()
    }
    async fn update(&self, _: DbId, _: &NewProduct) -> StoreResult<Option<Product>> {
        down()
    }
    async fn delete(&self, _: DbId) -> StoreResult<bool> {
        down()
    }
}

#[async_trait]
impl OrderStore for FailingStore {
    async fn list(&self) -> StoreResult<Vec<Order>> {
        down()
    }
    async fn search(&self, _: &str) -> StoreResult<Vec<Order>> {
        down()
    }
    async fn find_by_id(&self, _: DbId) -> StoreResult<Option<Order>> {
        down()
    }
    async fn items_for_order(&self, _: DbId) -> StoreResult<Vec<OrderItem>> {
        down()
    }
    async fn create(&self, _: &NewOrder, _: &[NewOrderItem]) -> StoreResult<DbId> {
        down()
    }
    async fn update_status(&self, _: DbId, _: &str) -> StoreResult<bool> {
        down()
    }
}

#[async_trait]
impl CategoryStore for FailingStore {
    async fn list(&self) -> StoreResult<Vec<Category>> {
        down()
    }
}

#[async_trait]
impl NotificationStore for FailingStore {
    async fn list(&self) -> StoreResult<Vec<Notification>> {
        down()
    }
    async fn create(&self, _: &CreateNotification) -> StoreResult<DbId> {
        down()
    }
    async fn delete(&self, _: DbId) -> StoreResult<bool> {
        down()
    }
}

#[async_trait]
impl SettingsStore for FailingStore {
    async fn get(&self, _: SettingsCategory) -> StoreResult<Option<SettingsMap>> {
        down()
    }
    async fn update(&self, _: SettingsCategory, _: &SettingsMap) -> StoreResult<()> {
        down()
    }
}

#[async_trait]
impl DashboardStore for FailingStore {
    async fn stats(&self) -> StoreResult<DashboardStats> {
        down()
    }
    async fn recent_orders(&self, _: i64) -> StoreResult<Vec<RecentOrder>> {
        down()
    }
    async fn top_products(&self, _: i64) -> StoreResult<Vec<TopProduct>> {
        down()
    }
}

#[async_trait]
impl HealthProbe for FailingStore {
    async fn ping(&self) -> StoreResult<()> {
        down()
    }
}
