//! Database connection pool management.

use crate::config::DatabaseConfig;
use crate::db::error::DbError;
use crate::db::scope::ConnectionScope;
use futures::future::BoxFuture;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{PgConnection, PgPool};
use std::str::FromStr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, info};


/// Connection string used when no configuration is supplied.
pub const DEFAULT_DATABASE_URL: &str = "postgres://localhost:5432/heartbridge";

/// Sizing and timeout settings for a connection pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolSettings {
    /// PostgreSQL connection string.
    pub url: String,
    /// Connections kept open while idle.
    pub min_connections: u32,
    /// Upper bound on live connections.
    pub max_connections: u32,
    /// Server-side statement timeout applied to every session.
    pub command_timeout: Duration,
    /// How long an acquisition waits for a free connection.
    pub acquire_timeout: Duration,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            url: DEFAULT_DATABASE_URL.to_string(),
            min_connections: 1,
            max_connections: 10,
            command_timeout: Duration::from_secs(60),
            acquire_timeout: Duration::from_secs(5),
        }
    }
}

impl From<&DatabaseConfig> for PoolSettings {
    fn from(config: &DatabaseConfig) -> Self {
        Self {
            url: config.url.clone(),
            min_connections: config.min_connections,
            max_connections: config.max_connections,
            command_timeout: Duration::from_secs(config.command_timeout_secs),
            acquire_timeout: Duration::from_secs(config.acquire_timeout_secs),
        }
    }
}

impl PoolSettings {
    /// Parses the connection string and attaches the statement timeout.
    ///
    /// # Errors
    /// Returns [`DbError::Connection`] if the connection string is malformed.
    pub fn connect_options(&self) -> Result<PgConnectOptions, DbError> {
        let options = PgConnectOptions::from_str(&self.url)
            .map_err(|e| DbError::Connection(e.to_string()))?;

        Ok(options.options([(
            "statement_timeout",
            self.command_timeout.as_millis().to_string(),
        )]))
    }

    fn pool_options(&self) -> PgPoolOptions {
        PgPoolOptions::new()
            .min_connections(self.min_connections)
            .max_connections(self.max_connections)
            .acquire_timeout(self.acquire_timeout)
    }
}

/// Database connection pool wrapper.
///
/// Cloning is cheap; clones share the same underlying pool and lease counter.
#[derive(Clone)]
pub struct DatabasePool {
    pool: PgPool,
    leases: Arc<AtomicUsize>,
    max_connections: u32,
}

impl DatabasePool {
    /// Creates a new database pool and opens its first connection.
    ///
    /// # Errors
    /// Returns [`DbError::Connection`] if the connection string is malformed
    /// or the database cannot be reached.
    pub async fn new(settings: &PoolSettings) -> Result<Self, DbError> {
        let options = settings.connect_options()?;
        let pool = settings
            .pool_options()
            .connect_with(options)
            .await
            .map_err(|e| DbError::Connection(e.to_string()))?;

        info!(
            min_connections = settings.min_connections,
            max_connections = settings.max_connections,
            "Database connection pool established"
        );

        Ok(Self::from_pool(pool, settings.max_connections))
    }

    /// Creates a pool that defers connecting until the first acquisition.
    ///
    /// # Errors
    /// Returns [`DbError::Connection`] if the connection string is malformed.
    pub fn connect_lazy(settings: &PoolSettings) -> Result<Self, DbError> {
        let options = settings.connect_options()?;
        let pool = settings.pool_options().connect_lazy_with(options);
        Ok(Self::from_pool(pool, settings.max_connections))
    }

    fn from_pool(pool: PgPool, max_connections: u32) -> Self {
        Self {
            pool,
            leases: Arc::new(AtomicUsize::new(0)),
            max_connections,
        }
    }

    /// Returns a reference to the underlying pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Opens a scope for a single connection lease.
    #[must_use]
    pub fn scope(&self) -> ConnectionScope<'_> {
        ConnectionScope::new(self)
    }

    /// Runs `f` with a leased connection, releasing it on every exit path.
    ///
    /// # Errors
    /// Returns [`DbError::PoolExhausted`] when no connection frees up in time,
    /// or whatever `f` returns.
    pub async fn with_connection<F, T>(&self, f: F) -> Result<T, DbError>
    where
        F: for<'c> FnOnce(&'c mut PgConnection) -> BoxFuture<'c, Result<T, DbError>>,
    {
        self.scope().with_connection(f).await
    }

    /// Number of connections currently leased to callers.
    ///
    /// A lease ends when its guard drops, including on cancellation. If the
    /// caller was cancelled mid-query, the physical connection is returned
    /// to the pool only after the driver finishes draining that query, so
    /// `leased()` may read lower than the number of busy connections.
    #[must_use]
    pub fn leased(&self) -> usize {
        self.leases.load(Ordering::SeqCst)
    }

    pub(crate) fn lease_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.leases)
    }

    /// Configured upper bound on live connections.
    #[must_use]
    pub fn max_connections(&self) -> u32 {
        self.max_connections
    }

    /// Number of open connections, idle or leased.
    #[must_use]
    pub fn size(&self) -> u32 {
        self.pool.size()
    }

    /// Number of open connections waiting in the pool.
    #[must_use]
    pub fn idle(&self) -> usize {
        self.pool.num_idle()
    }

    /// Returns `true` once [`close`](Self::close) has been called.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.pool.is_closed()
    }

    /// Returns `true` if both handles share the same underlying pool.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.leases, &other.leases)
    }

    /// Closes every pooled connection, waiting for outstanding leases.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

/// Owns the application's single connection pool and its lifecycle.
///
/// The pool is created on [`initialize`](Self::initialize) or on first use via
/// [`current`](Self::current), and torn down by [`shutdown`](Self::shutdown).
pub struct PoolManager {
    settings: PoolSettings,
    slot: Mutex<Option<DatabasePool>>,
}

impl PoolManager {
    /// Creates a manager that will connect with `settings` on first demand.
    #[must_use]
    pub fn new(settings: PoolSettings) -> Self {
        Self {
            settings,
            slot: Mutex::new(None),
        }
    }

    /// Creates a manager around an already constructed pool.
    #[must_use]
    pub fn with_pool(settings: PoolSettings, pool: DatabasePool) -> Self {
        Self {
            settings,
            slot: Mutex::new(Some(pool)),
        }
    }

    /// Returns the settings used to build new pools.
    #[must_use]
    pub fn settings(&self) -> &PoolSettings {
        &self.settings
    }

    /// Returns the live pool, creating it if none exists.
    ///
    /// Concurrent callers are serialized, so at most one pool is created.
    ///
    /// # Errors
    /// Returns [`DbError::Connection`] if the pool cannot be established.
    pub async fn initialize(&self) -> Result<DatabasePool, DbError> {
        let mut slot = self.slot.lock().await;
        if let Some(pool) = slot.as_ref() {
            return Ok(pool.clone());
        }

        let pool = DatabasePool::new(&self.settings).await?;
        *slot = Some(pool.clone());
        Ok(pool)
    }

    /// Returns the live pool, lazily initializing it with the manager's
    /// settings.
    ///
    /// # Errors
    /// Returns [`DbError::Connection`] if lazy initialization fails.
    pub async fn current(&self) -> Result<DatabasePool, DbError> {
        if let Some(pool) = self.peek().await {
            return Ok(pool);
        }

        debug!("No database pool yet, initializing on demand");
        self.initialize().await
    }

    /// Returns the live pool without creating one.
    pub async fn peek(&self) -> Option<DatabasePool> {
        self.slot.lock().await.clone()
    }

    /// Returns `true` if a pool is currently live.
    pub async fn is_initialized(&self) -> bool {
        self.slot.lock().await.is_some()
    }

    /// Closes the live pool, if any. A later [`initialize`](Self::initialize)
    /// creates a fresh one.
    pub async fn shutdown(&self) {
        let pool = self.slot.lock().await.take();

        match pool {
            Some(pool) => {
                pool.close().await;
                info!("Database connection pool closed");
            }
            None => debug!("Shutdown requested with no live database pool"),
        }
    }
}
