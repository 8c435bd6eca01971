use std::sync::Arc;

use lyceum_core::hierarchy::CategoryHierarchy;
use lyceum_db::PgCategoryStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: lyceum_db::DbPool,
    /// Server configuration (JWT settings are read by the auth extractors).
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Category hierarchy manager bound to this state's pool.
    pub fn categories(&self) -> CategoryHierarchy<PgCategoryStore> {
        CategoryHierarchy::new(PgCategoryStore::new(self.pool.clone()))
    }
}
