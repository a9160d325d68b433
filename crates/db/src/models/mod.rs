//! Entity models and DTOs.
//!
//! Row types derive `FromRow` for the PostgreSQL repositories and serialize
//! with camelCase keys, which is the wire format of the HTTP API.

pub mod category;
pub mod customer;
pub mod dashboard;
pub mod notification;
pub mod order;
pub mod product;
pub mod settings;
