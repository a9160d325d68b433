//! Static payloads served when the store cannot answer a degradable read.
//!
//! Every payload uses the same model types as the live responses, so a
//! client cannot tell fallback data from live data by shape. The table is
//! built once at startup and never mutated.

use std::collections::HashMap;

use chrono::Duration;
use optom_core::order_status::{
    STATUS_DELIVERED, STATUS_PENDING, STATUS_PROCESSING, STATUS_SHIPPED,
};
use optom_core::settings::SettingsCategory;
use optom_core::types::{DbId, Timestamp};
use optom_db::models::category::Category;
use optom_db::models::dashboard::{DashboardSnapshot, DashboardStats, RecentOrder, TopProduct};
use optom_db::models::settings::SettingsMap;
use serde_json::{json, Value};

/// A sample order whose timestamp is expressed relative to request time.
#[derive(Debug, Clone)]
struct SampleOrder {
    id: DbId,
    order_number: &'static str,
    customer_name: &'static str,
    total_amount: f64,
    status: &'static str,
    days_ago: i64,
}

impl SampleOrder {
    fn at(&self, now: Timestamp) -> RecentOrder {
        RecentOrder {
            id: self.id,
            order_number: self.order_number.to_string(),
            customer_name: self.customer_name.to_string(),
            total_amount: self.total_amount,
            status: self.status.to_string(),
            created_at: now - Duration::days(self.days_ago),
        }
    }
}

/// The fallback table, keyed by resource.
#[derive(Debug, Clone)]
pub struct Fallbacks {
    stats: DashboardStats,
    recent_orders: Vec<SampleOrder>,
    top_products: Vec<TopProduct>,
    categories: Vec<Category>,
    settings: HashMap<SettingsCategory, SettingsMap>,
}

impl Default for Fallbacks {
    fn default() -> Self {
        Self::new()
    }
}

impl Fallbacks {
    pub fn new() -> Self {
        Self {
            stats: DashboardStats {
                total_customers: 48,
                total_products: 126,
                total_orders: 125,
                pending_orders: 12,
                processing_orders: 8,
                shipped_orders: 15,
                delivered_orders: 86,
                cancelled_orders: 4,
                low_stock_products: 7,
                out_of_stock_products: 3,
                total_revenue: 186_450_000.0,
            },
            recent_orders: vec![
                SampleOrder {
                    id: 125,
                    order_number: "ORD-000125",
                    customer_name: "Aziz Karimov",
                    total_amount: 2_450_000.0,
                    status: STATUS_PENDING,
                    days_ago: 0,
                },
                SampleOrder {
                    id: 124,
                    order_number: "ORD-000124",
                    customer_name: "Malika Yusupova",
                    total_amount: 1_780_000.0,
                    status: STATUS_PROCESSING,
                    days_ago: 1,
                },
                SampleOrder {
                    id: 123,
                    order_number: "ORD-000123",
                    customer_name: "Bobur Toshmatov",
                    total_amount: 3_200_000.0,
                    status: STATUS_SHIPPED,
                    days_ago: 2,
                },
                SampleOrder {
                    id: 122,
                    order_number: "ORD-000122",
                    customer_name: "Dilnoza Rahimova",
                    total_amount: 950_000.0,
                    status: STATUS_DELIVERED,
                    days_ago: 3,
                },
                SampleOrder {
                    id: 121,
                    order_number: "ORD-000121",
                    customer_name: "Sardor Aliyev",
                    total_amount: 1_320_000.0,
                    status: STATUS_DELIVERED,
                    days_ago: 5,
                },
            ],
            top_products: vec![
                top_product(2, "Erkaklar klassik ko'ylagi", 156, 185_000.0),
                top_product(1, "Ayollar jinsi shimi", 132, 240_000.0),
                top_product(3, "Bolalar sport kostyumi", 98, 210_000.0),
                top_product(5, "Charm kamar", 87, 95_000.0),
                top_product(4, "Ayollar ko'ylagi", 76, 320_000.0),
            ],
            categories: vec![
                Category::new(1, "Erkaklar kiyimi"),
                Category::new(2, "Ayollar kiyimi"),
                Category::new(3, "Bolalar kiyimi"),
                Category::new(4, "Aksessuarlar"),
            ],
            settings: SettingsCategory::ALL
                .into_iter()
                .map(|category| (category, default_settings(category)))
                .collect(),
        }
    }

    pub fn stats(&self) -> DashboardStats {
        self.stats.clone()
    }

    /// Sample recent orders, dated relative to `now`, newest first.
    pub fn recent_orders(&self, now: Timestamp) -> Vec<RecentOrder> {
        self.recent_orders.iter().map(|o| o.at(now)).collect()
    }

    pub fn top_products(&self) -> Vec<TopProduct> {
        self.top_products.clone()
    }

    pub fn categories(&self) -> Vec<Category> {
        self.categories.clone()
    }

    /// Default values for `category`.
    pub fn settings(&self, category: SettingsCategory) -> SettingsMap {
        self.settings.get(&category).cloned().unwrap_or_default()
    }

    /// All three dashboard sections at once.
    pub fn dashboard(&self, now: Timestamp) -> DashboardSnapshot {
        DashboardSnapshot {
            stats: self.stats(),
            recent_orders: self.recent_orders(now),
            top_products: self.top_products(),
        }
    }
}

fn top_product(id: DbId, name: &str, total_sold: i64, unit_price: f64) -> TopProduct {
    TopProduct {
        id,
        name: name.to_string(),
        total_sold,
        revenue: total_sold as f64 * unit_price,
    }
}

fn default_settings(category: SettingsCategory) -> SettingsMap {
    let values = match category {
        SettingsCategory::Store => json!({
            "storeName": "Optom Kiyim",
            "storeEmail": "info@optomkiyim.uz",
            "storePhone": "+998 71 200 00 00",
            "storeAddress": "Toshkent sh., Chilonzor tumani",
            "currency": "UZS",
            "timezone": "Asia/Tashkent",
        }),
        SettingsCategory::Payment => json!({
            "defaultPaymentMethod": "cash",
            "acceptCash": "yes",
            "acceptCard": "yes",
            "acceptTransfer": "yes",
            "taxRate": 12,
            "paymentTermsDays": 30,
        }),
        SettingsCategory::Shipping => json!({
            "defaultShippingCost": 50_000,
            "freeShippingThreshold": 1_000_000,
            "deliveryDays": 3,
            "shippingRegions": "Toshkent, Samarqand, Buxoro, Farg'ona",
        }),
        SettingsCategory::Brand => json!({
            "brandName": "Optom Kiyim",
            "slogan": "Sifatli kiyim, ulgurji narxda",
            "primaryColor": "#2563eb",
            "secondaryColor": "#f59e0b",
            "logoUrl": "/logo.png",
        }),
    };
    match values {
        Value::Object(map) => map,
        _ => SettingsMap::new(),
    }
}
