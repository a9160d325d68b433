use std::sync::Arc;

use optom_db::Store;

use crate::config::ServerConfig;
use crate::error::{AppError, AppResult};
use crate::fallback::Fallbacks;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Persistence collaborator. `None` when the database could not be
    /// reached at startup.
    pub store: Option<Store>,
    /// Static payloads served when the store cannot answer a degradable read.
    pub fallbacks: Arc<Fallbacks>,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(store: Option<Store>, config: ServerConfig) -> Self {
        Self {
            store,
            fallbacks: Arc::new(Fallbacks::new()),
            config: Arc::new(config),
        }
    }

    /// The store, or [`AppError::Unavailable`] for endpoints that do not degrade.
    pub fn store(&self) -> AppResult<&Store> {
        self.store.as_ref().ok_or(AppError::Unavailable)
    }
}
