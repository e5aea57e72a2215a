use std::sync::Arc;

use parkwise_core::clock::Clock;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; everything non-`Clone` sits behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: parkwise_db::DbPool,
    pub config: Arc<ServerConfig>,
    /// Time source for reservation open/close. Tests swap in a fixed clock.
    pub clock: Arc<dyn Clock>,
}
