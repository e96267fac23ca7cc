//! Parameterized statements and the executor operations that run them.
//!
//! Table and column identifiers are only ever taken from [`Entity`] metadata
//! and checked against its allow-lists; every value is bound positionally.

use crate::db::error::DbError;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::postgres::{PgArguments, PgRow};
use sqlx::query::QueryAs;
use sqlx::{FromRow, PgConnection, Postgres};
use std::collections::BTreeMap;
use tracing::debug;
use uuid::Uuid;

#[cfg(test)]
mod tests;

/// Column refreshed on every update.
pub const MODIFIED_AT_COLUMN: &str = "modified_at";

/// Column used to order full scans, newest first.
pub const CREATED_AT_COLUMN: &str = "created_at";

/// Field-to-value mapping for the dynamic update builder.
///
/// Ordered so that generated SQL and parameter positions are deterministic.
pub type FieldMap = BTreeMap<String, SqlValue>;

/// A value bound to a statement parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    /// Text, `None` binds SQL `NULL`.
    Text(Option<String>),
    /// Boolean.
    Bool(bool),
    /// 64-bit integer.
    BigInt(i64),
    /// UUID.
    Uuid(Uuid),
    /// Calendar date.
    Date(NaiveDate),
    /// UTC timestamp.
    Timestamp(DateTime<Utc>),
}

impl SqlValue {
    /// Shorthand for a non-null text value.
    pub fn text(value: impl Into<String>) -> Self {
        SqlValue::Text(Some(value.into()))
    }
}

impl From<Option<String>> for SqlValue {
    fn from(value: Option<String>) -> Self {
        SqlValue::Text(value)
    }
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        SqlValue::Text(Some(value))
    }
}

impl From<bool> for SqlValue {
    fn from(value: bool) -> Self {
        SqlValue::Bool(value)
    }
}

impl From<i64> for SqlValue {
    fn from(value: i64) -> Self {
        SqlValue::BigInt(value)
    }
}

impl From<Uuid> for SqlValue {
    fn from(value: Uuid) -> Self {
        SqlValue::Uuid(value)
    }
}

impl From<NaiveDate> for SqlValue {
    fn from(value: NaiveDate) -> Self {
        SqlValue::Date(value)
    }
}

impl From<DateTime<Utc>> for SqlValue {
    fn from(value: DateTime<Utc>) -> Self {
        SqlValue::Timestamp(value)
    }
}

/// Value shape accepted by a mutable column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// Non-null text.
    Text,
    /// Text or `NULL`.
    NullableText,
    /// Email address or `NULL`.
    Email,
    /// Boolean.
    Bool,
    /// `YYYY-MM-DD` calendar date.
    Date,
    /// Text restricted to the listed values.
    Enum(&'static [&'static str]),
}

/// A column the dynamic update builder may write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    /// Column name as it appears in SQL.
    pub name: &'static str,
    /// Accepted value shape.
    pub kind: ColumnKind,
}

impl Column {
    /// Creates a column descriptor.
    #[must_use]
    pub const fn new(name: &'static str, kind: ColumnKind) -> Self {
        Self { name, kind }
    }
}

/// Table metadata for a row type.
pub trait Entity: for<'r> FromRow<'r, PgRow> + Send + Unpin {
    /// Table name.
    const TABLE: &'static str;
    /// Primary key column.
    const ID_COLUMN: &'static str;
    /// Columns an INSERT may name.
    const INSERT_COLUMNS: &'static [&'static str];
    /// Columns the dynamic update builder may set.
    const MUTABLE_COLUMNS: &'static [Column];

    /// Looks up a mutable column by name.
    #[must_use]
    fn mutable_column(name: &str) -> Option<&'static Column> {
        Self::MUTABLE_COLUMNS.iter().find(|c| c.name == name)
    }
}

/// SQL text together with its positional parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    sql: String,
    params: Vec<SqlValue>,
}

impl Statement {
    fn new(sql: String, params: Vec<SqlValue>) -> Self {
        Self { sql, params }
    }

    /// Returns the SQL text.
    #[must_use]
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Returns the parameters in binding order.
    #[must_use]
    pub fn params(&self) -> &[SqlValue] {
        &self.params
    }

    fn query_as<E: Entity>(&self) -> QueryAs<'_, Postgres, E, PgArguments> {
        self.params
            .iter()
            .cloned()
            .fold(sqlx::query_as::<_, E>(&self.sql), bind_value)
    }
}

fn bind_value<'q, O>(
    query: QueryAs<'q, Postgres, O, PgArguments>,
    value: SqlValue,
) -> QueryAs<'q, Postgres, O, PgArguments> {
    match value {
        SqlValue::Text(v) => query.bind(v),
        SqlValue::Bool(v) => query.bind(v),
        SqlValue::BigInt(v) => query.bind(v),
        SqlValue::Uuid(v) => query.bind(v),
        SqlValue::Date(v) => query.bind(v),
        SqlValue::Timestamp(v) => query.bind(v),
    }
}

// ============================================================================
// Statement Builders
// ============================================================================

/// Builds `SELECT * FROM <table> WHERE <id> = $1`.
#[must_use]
pub fn select_by_id<E: Entity>(id: Uuid) -> Statement {
    Statement::new(
        format!("SELECT * FROM {} WHERE {} = $1", E::TABLE, E::ID_COLUMN),
        vec![SqlValue::Uuid(id)],
    )
}

/// Builds a full scan ordered newest first, optionally bounded by `limit`.
#[must_use]
pub fn select_all<E: Entity>(limit: Option<i64>) -> Statement {
    let mut sql = format!(
        "SELECT * FROM {} ORDER BY {} DESC, {} DESC",
        E::TABLE,
        CREATED_AT_COLUMN,
        E::ID_COLUMN
    );

    match limit {
        Some(limit) => {
            sql.push_str(" LIMIT $1");
            Statement::new(sql, vec![SqlValue::BigInt(limit)])
        }
        None => Statement::new(sql, Vec::new()),
    }
}

/// Builds `INSERT INTO <table> (...) VALUES ($1, ...) RETURNING *`.
///
/// # Errors
/// Returns [`DbError::UnknownColumn`] if a column is not insertable.
pub fn build_insert<E: Entity>(values: Vec<(&'static str, SqlValue)>) -> Result<Statement, DbError> {
    let mut columns = Vec::with_capacity(values.len());
    let mut placeholders = Vec::with_capacity(values.len());
    let mut params = Vec::with_capacity(values.len());

    for (position, (column, value)) in values.into_iter().enumerate() {
        if !E::INSERT_COLUMNS.contains(&column) {
            return Err(DbError::UnknownColumn {
                table: E::TABLE,
                column: column.to_string(),
            });
        }
        columns.push(column);
        placeholders.push(format!("${}", position + 1));
        params.push(value);
    }

    let sql = format!(
        "INSERT INTO {} ({}) VALUES ({}) RETURNING *",
        E::TABLE,
        columns.join(", "),
        placeholders.join(", ")
    );

    Ok(Statement::new(sql, params))
}

/// Builds the dynamic `UPDATE ... SET ... WHERE <id> = $n RETURNING *`.
///
/// Every field must name one of the entity's mutable columns. The
/// `modified_at` assignment is always appended, so an empty map only
/// refreshes the modification time.
///
/// # Errors
/// Returns [`DbError::UnknownColumn`] for a field outside the allow-list.
pub fn build_update<E: Entity>(
    id: Uuid,
    fields: FieldMap,
    modified_at: DateTime<Utc>,
) -> Result<Statement, DbError> {
    let mut assignments = Vec::with_capacity(fields.len() + 1);
    let mut params = Vec::with_capacity(fields.len() + 2);

    for (field, value) in fields {
        let Some(column) = E::mutable_column(&field) else {
            return Err(DbError::UnknownColumn {
                table: E::TABLE,
                column: field,
            });
        };
        params.push(value);
        assignments.push(format!("{} = ${}", column.name, params.len()));
    }

    params.push(SqlValue::Timestamp(modified_at));
    assignments.push(format!("{} = ${}", MODIFIED_AT_COLUMN, params.len()));

    params.push(SqlValue::Uuid(id));
    let sql = format!(
        "UPDATE {} SET {} WHERE {} = ${} RETURNING *",
        E::TABLE,
        assignments.join(", "),
        E::ID_COLUMN,
        params.len()
    );

    Ok(Statement::new(sql, params))
}

/// Builds `DELETE FROM <table> WHERE <id> = $1`.
#[must_use]
pub fn build_delete<E: Entity>(id: Uuid) -> Statement {
    Statement::new(
        format!("DELETE FROM {} WHERE {} = $1", E::TABLE, E::ID_COLUMN),
        vec![SqlValue::Uuid(id)],
    )
}

// ============================================================================
// Executor Operations
// ============================================================================

/// Inserts a row and returns it as stored.
///
/// # Errors
/// Returns [`DbError::ConstraintViolation`] on uniqueness or foreign-key
/// conflicts, [`DbError::UnknownColumn`] for a non-insertable column.
pub async fn insert_returning<E: Entity>(
    conn: &mut PgConnection,
    values: Vec<(&'static str, SqlValue)>,
) -> Result<E, DbError> {
    let statement = build_insert::<E>(values)?;
    debug!(table = E::TABLE, sql = statement.sql(), "Inserting row");

    Ok(statement.query_as::<E>().fetch_one(conn).await?)
}

/// Runs a point lookup; `None` when no row matches.
///
/// # Errors
/// Returns an error only if the statement itself fails.
pub async fn fetch_one<E: Entity>(
    conn: &mut PgConnection,
    statement: &Statement,
) -> Result<Option<E>, DbError> {
    debug!(table = E::TABLE, sql = statement.sql(), "Fetching one row");

    Ok(statement.query_as::<E>().fetch_optional(conn).await?)
}

/// Runs a scan and returns every matching row in statement order.
///
/// # Errors
/// Returns an error if the statement fails.
pub async fn fetch_all<E: Entity>(
    conn: &mut PgConnection,
    statement: &Statement,
) -> Result<Vec<E>, DbError> {
    debug!(table = E::TABLE, sql = statement.sql(), "Fetching rows");

    Ok(statement.query_as::<E>().fetch_all(conn).await?)
}

/// Looks up a row by primary key.
///
/// # Errors
/// Returns an error if the statement fails.
pub async fn find_by_id<E: Entity>(conn: &mut PgConnection, id: Uuid) -> Result<Option<E>, DbError> {
    fetch_one::<E>(conn, &select_by_id::<E>(id)).await
}

/// Returns every row of the table, newest first.
///
/// # Errors
/// Returns an error if the statement fails.
pub async fn list_all<E: Entity>(conn: &mut PgConnection) -> Result<Vec<E>, DbError> {
    fetch_all::<E>(conn, &select_all::<E>(None)).await
}

/// Returns at most `limit` rows, newest first.
///
/// # Errors
/// Returns an error if the statement fails.
pub async fn fetch_page<E: Entity>(conn: &mut PgConnection, limit: i64) -> Result<Vec<E>, DbError> {
    fetch_all::<E>(conn, &select_all::<E>(Some(limit))).await
}

/// Returns `true` if a row with the given key exists.
///
/// # Errors
/// Returns an error if the statement fails.
pub async fn exists<E: Entity>(conn: &mut PgConnection, id: Uuid) -> Result<bool, DbError> {
    Ok(find_by_id::<E>(conn, id).await?.is_some())
}

/// Applies `fields` to the row with key `id` and returns the updated row, or
/// `None` if no row matched.
///
/// # Errors
/// Returns [`DbError::UnknownColumn`] before touching the database if a field
/// is outside the allow-list.
pub async fn update_returning<E: Entity>(
    conn: &mut PgConnection,
    id: Uuid,
    fields: FieldMap,
) -> Result<Option<E>, DbError> {
    let statement = build_update::<E>(id, fields, Utc::now())?;
    debug!(table = E::TABLE, sql = statement.sql(), "Updating row");

    Ok(statement.query_as::<E>().fetch_optional(conn).await?)
}

/// Deletes the row with key `id`; returns whether a row was removed.
///
/// # Errors
/// Returns an error if the statement fails.
pub async fn delete_by_id<E: Entity>(conn: &mut PgConnection, id: Uuid) -> Result<bool, DbError> {
    let statement = build_delete::<E>(id);
    debug!(table = E::TABLE, sql = statement.sql(), "Deleting row");

    let result = sqlx::query(statement.sql()).bind(id).execute(conn).await?;
    Ok(result.rows_affected() > 0)
}
