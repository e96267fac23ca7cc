//! Scoped connection leases.

use crate::db::error::DbError;
use crate::db::pool::DatabasePool;
use futures::future::BoxFuture;
use sqlx::pool::PoolConnection;
use sqlx::{PgConnection, Postgres};
use std::ops::{Deref, DerefMut};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{debug, warn};

/// A single-use handle for leasing one connection from a [`DatabasePool`].
///
/// Both [`acquire`](Self::acquire) and [`with_connection`](Self::with_connection)
/// consume the scope, so a scope never holds more than one lease.
pub struct ConnectionScope<'p> {
    pool: &'p DatabasePool,
}

impl<'p> ConnectionScope<'p> {
    pub(crate) fn new(pool: &'p DatabasePool) -> Self {
        Self { pool }
    }

    /// Leases a connection, waiting up to the pool's acquire timeout.
    ///
    /// # Errors
    /// Returns [`DbError::PoolExhausted`] if no connection frees up in time,
    /// or [`DbError::Connection`] if the pool is closed or unreachable.
    pub async fn acquire(self) -> Result<LeasedConnection, DbError> {
        let conn = self.pool.pool().acquire().await.map_err(|e| {
            let err = DbError::from(e);
            if matches!(err, DbError::PoolExhausted) {
                warn!(
                    leased = self.pool.leased(),
                    max_connections = self.pool.max_connections(),
                    "Timed out waiting for a database connection"
                );
            }
            err
        })?;

        Ok(LeasedConnection::new(conn, self.pool.lease_counter()))
    }

    /// Leases a connection, runs `f` with it and releases it before returning.
    ///
    /// The lease is also released if the returned future is dropped before
    /// completion.
    ///
    /// # Errors
    /// Propagates acquisition failures and any error returned by `f`.
    pub async fn with_connection<F, T>(self, f: F) -> Result<T, DbError>
    where
        F: for<'c> FnOnce(&'c mut PgConnection) -> BoxFuture<'c, Result<T, DbError>>,
    {
        let mut lease = self.acquire().await?;
        let result = f(&mut *lease).await;
        drop(lease);
        result
    }
}

/// A connection checked out of the pool; returned to it on drop.
pub struct LeasedConnection {
    conn: PoolConnection<Postgres>,
    leases: Arc<AtomicUsize>,
}

impl LeasedConnection {
    fn new(conn: PoolConnection<Postgres>, leases: Arc<AtomicUsize>) -> Self {
        let live = leases.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(live, "Database connection leased");
        Self { conn, leases }
    }
}

impl Deref for LeasedConnection {
    type Target = PgConnection;

    fn deref(&self) -> &Self::Target {
        &self.conn
    }
}

impl DerefMut for LeasedConnection {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.conn
    }
}

impl Drop for LeasedConnection {
    fn drop(&mut self) {
        let live = self.leases.fetch_sub(1, Ordering::SeqCst) - 1;
        debug!(live, "Database connection released");
    }
}
