use std::sync::Arc;

use friendtrip_db::{DbBackend, DbPool};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: DbPool,
    /// Which engine the pool talks to.
    pub db_backend: DbBackend,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}
