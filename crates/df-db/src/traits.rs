//! Engine trait definition and wire value model.

use crate::error::DbResult;
use async_trait::async_trait;
use std::collections::BTreeMap;

/// One scalar value as exchanged with the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlValue {
    /// SQL NULL
    Null,
    /// Any integer column; MySQL unsigned int fits in i64
    Integer(i64),
    /// Text column
    Text(String),
}

/// One result row, keyed by column name.
pub type Row = BTreeMap<String, SqlValue>;

/// Result of executing one statement.
#[derive(Debug, Clone, Default)]
pub struct QueryResult {
    /// Column names in the engine's native order; empty for DDL/DML
    pub columns: Vec<String>,
    /// Result rows; empty for DDL/DML
    pub rows: Vec<Row>,
}

/// One column as reported by table introspection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnInfo {
    /// Column name
    pub name: String,
    /// True when the column is part of the primary key
    pub primary_key: bool,
}

/// SQL execution engine abstraction consumed by the metadata layer.
///
/// Implementations must be Send + Sync for async operation.
#[async_trait]
pub trait SqlEngine: Send + Sync {
    /// Execute one statement, returning rows and column metadata.
    ///
    /// Failures carry the engine's machine-readable code and number.
    async fn execute(&self, sql: &str) -> DbResult<QueryResult>;

    /// List table names matching a LIKE-style pattern (existence check).
    async fn list_tables_matching(&self, pattern: &str) -> DbResult<Vec<String>>;

    /// Introspect a table's columns with their key roles.
    async fn describe_columns(&self, table: &str) -> DbResult<Vec<ColumnInfo>>;

    /// Quote an identifier for safe interpolation into DDL/DML.
    ///
    /// Used for configuration-supplied table and column names, not for
    /// untrusted input.
    fn quote_ident(&self, ident: &str) -> String;

    /// Quote a value literal for safe interpolation into DML.
    fn quote_value(&self, value: &SqlValue) -> String;

    /// Engine type identifier for logging
    fn engine_type(&self) -> &'static str;
}
