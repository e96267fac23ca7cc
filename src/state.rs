//! Application state management.

use crate::config::Config;
use crate::db::{DatabasePool, PoolManager, PoolSettings};
use std::sync::Arc;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Owner of the database connection pool.
    pub pools: Arc<PoolManager>,
    /// Application configuration.
    pub config: Config,
}

impl AppState {
    /// Creates application state whose pool is built from `config` on first
    /// use.
    #[must_use]
    pub fn new(config: Config) -> Self {
        let pools = Arc::new(PoolManager::new(PoolSettings::from(&config.database)));
        Self { pools, config }
    }

    /// Creates application state around an already constructed pool.
    #[must_use]
    pub fn with_pool(config: Config, pool: DatabasePool) -> Self {
        let settings = PoolSettings::from(&config.database);
        Self {
            pools: Arc::new(PoolManager::with_pool(settings, pool)),
            config,
        }
    }
}
