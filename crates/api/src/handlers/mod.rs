//! HTTP handlers, one module per resource.
//!
//! Reads on products, categories, the dashboard and settings degrade to
//! [`crate::fallback::Fallbacks`] when the store fails; everything else
//! surfaces the error.

pub mod category;
pub mod customer;
pub mod dashboard;
pub mod notification;
pub mod order;
pub mod product;
pub mod settings;

use std::future::Future;

use optom_db::StoreError;

/// Await a degradable store call, substituting `fallback` on failure.
///
/// The failure is logged under `operation` and never reaches the client.
pub(crate) async fn or_fallback<T>(
    operation: &'static str,
    call: impl Future<Output = Result<T, StoreError>>,
    fallback: impl FnOnce() -> T,
) -> T {
    match call.await {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(operation, error = %e, "Store call failed, serving fallback data");
            fallback()
        }
    }
}

/// Log that a degradable read is served from fallbacks because no store is connected.
pub(crate) fn log_no_store(operation: &'static str) {
    tracing::warn!(operation, "No store connected, serving fallback data");
}
