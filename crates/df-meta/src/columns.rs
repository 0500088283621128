//! Column classification and record-to-column alignment.

use crate::error::{MetaError, MetaResult};
use df_db::{ColumnInfo, Row, SqlValue};

/// Cached descriptor of a table's columns, split by key role.
///
/// Computed once per table name and never invalidated: a schema change to
/// the metadata table requires constructing a fresh store instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableColumns {
    /// All columns in the engine's native order
    pub all: Vec<String>,
    /// Primary-key columns
    pub pk: Vec<String>,
    /// Non-key value columns
    pub cols: Vec<String>,
}

impl TableColumns {
    /// Classify introspected columns by key role, preserving native order.
    pub fn classify(columns: &[ColumnInfo]) -> Self {
        let mut all = Vec::new();
        let mut pk = Vec::new();
        let mut cols = Vec::new();
        for column in columns {
            all.push(column.name.clone());
            if column.primary_key {
                pk.push(column.name.clone());
            } else {
                cols.push(column.name.clone());
            }
        }
        Self { all, pk, cols }
    }
}

/// Map an encoded row's fields onto a required column order.
///
/// Fails when the row and the column set disagree in either direction,
/// reporting every missing and every unknown field in one error rather than
/// stopping at the first.
pub fn align_columns(row: &Row, order: &[String]) -> MetaResult<Vec<SqlValue>> {
    let mut missing = Vec::new();
    let mut values = Vec::new();
    for column in order {
        match row.get(column) {
            Some(value) => values.push(value.clone()),
            None => missing.push(column.clone()),
        }
    }
    let unknown: Vec<String> = row
        .keys()
        .filter(|field| !order.contains(field))
        .cloned()
        .collect();

    if !missing.is_empty() || !unknown.is_empty() {
        return Err(MetaError::SchemaMismatch { missing, unknown });
    }
    Ok(values)
}

#[cfg(test)]
#[path = "columns_test.rs"]
mod tests;
