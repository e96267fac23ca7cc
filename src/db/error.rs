//! Error types for the database layer.

use sqlx::error::ErrorKind;
use thiserror::Error;


/// Faults raised at the query executor boundary.
///
/// A missing row is never an error here: lookups return `Option` and deletes
/// return `bool`.
#[derive(Debug, Error)]
pub enum DbError {
    /// The database is unreachable or the connection string is malformed.
    #[error("connection error: {0}")]
    Connection(String),

    /// No connection became available within the pool's acquire timeout.
    #[error("connection pool exhausted")]
    PoolExhausted,

    /// A uniqueness or foreign-key constraint rejected the statement.
    #[error("constraint violation: {}", .constraint.as_deref().unwrap_or("unnamed"))]
    ConstraintViolation {
        /// Name of the violated constraint, when the server reports one.
        constraint: Option<String>,
    },

    /// A column name outside the entity's allow-list.
    #[error("unknown column `{column}` for table `{table}`")]
    UnknownColumn {
        /// Table the statement targets.
        table: &'static str,
        /// Rejected column name.
        column: String,
    },

    /// Any other statement failure.
    #[error("query failed: {0}")]
    Query(#[source] sqlx::Error),
}

impl DbError {
    /// Returns `true` for infrastructure faults (connection or pool).
    #[must_use]
    pub fn is_infrastructure(&self) -> bool {
        matches!(self, DbError::Connection(_) | DbError::PoolExhausted)
    }
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,
            sqlx::Error::PoolClosed
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::Configuration(_) => DbError::Connection(err.to_string()),
            sqlx::Error::Database(ref db_err) => match db_err.kind() {
                ErrorKind::UniqueViolation | ErrorKind::ForeignKeyViolation => {
                    DbError::ConstraintViolation {
                        constraint: db_err.constraint().map(str::to_string),
                    }
                }
                _ => DbError::Query(err),
            },
            other => DbError::Query(other),
        }
    }
}
