//! Database module for PostgreSQL connection and operations.

mod error;
mod pool;
pub mod query;
mod schema;
mod scope;

pub use error::DbError;
pub use pool::{DEFAULT_DATABASE_URL, DatabasePool, PoolManager, PoolSettings};
pub use query::{Column, ColumnKind, Entity, FieldMap, SqlValue, Statement};
pub use schema::*;
pub use scope::{ConnectionScope, LeasedConnection};
