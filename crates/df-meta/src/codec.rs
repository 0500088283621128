//! Row codec: delta records to and from their stored form.
//!
//! The `delta` and `meta` payloads are opaque structures serialized as JSON
//! text; every other field is stored as-is. Decoding is structural, so any
//! value that round-trips through `serde_json` round-trips here.

use crate::error::{MetaError, MetaResult};
use df_core::{DeltaRecord, DeltaState, DeltaStateRow};
use df_db::{Row, SqlValue};

/// Columns holding JSON-serialized payloads.
const JSON_COLUMNS: &[&str] = &["delta", "meta"];

/// Serialize a record into a stored row.
pub fn encode(record: &DeltaRecord) -> Row {
    let mut row = Row::new();
    row.insert("name".to_string(), SqlValue::Text(record.name.clone()));
    row.insert(
        "sequence".to_string(),
        SqlValue::Integer(i64::from(record.sequence)),
    );
    row.insert(
        "state".to_string(),
        SqlValue::Text(record.state.as_str().to_string()),
    );
    for (column, payload) in JSON_COLUMNS.iter().zip([&record.delta, &record.meta]) {
        // Value serialization cannot fail for serde_json::Value
        let text = serde_json::to_string(payload).unwrap_or_else(|_| "null".to_string());
        row.insert(column.to_string(), SqlValue::Text(text));
    }
    row
}

/// Deserialize a stored row back into a record.
///
/// Fails with a decode error when a field is absent, has the wrong shape,
/// or a payload column does not contain valid JSON text.
pub fn decode(row: &Row) -> MetaResult<DeltaRecord> {
    Ok(DeltaRecord {
        name: text_field(row, "name")?,
        sequence: sequence_field(row)?,
        state: state_field(row)?,
        delta: json_field(row, "delta")?,
        meta: json_field(row, "meta")?,
    })
}

/// Deserialize a {name, sequence, state} projection row.
pub fn decode_state_row(row: &Row) -> MetaResult<DeltaStateRow> {
    Ok(DeltaStateRow {
        name: text_field(row, "name")?,
        sequence: sequence_field(row)?,
        state: state_field(row)?,
    })
}

fn decode_error(column: &str, message: impl Into<String>) -> MetaError {
    MetaError::Decode {
        column: column.to_string(),
        message: message.into(),
    }
}

fn text_field(row: &Row, column: &str) -> MetaResult<String> {
    match row.get(column) {
        Some(SqlValue::Text(s)) => Ok(s.clone()),
        Some(other) => Err(decode_error(column, format!("expected text, got {other:?}"))),
        None => Err(decode_error(column, "column absent")),
    }
}

fn sequence_field(row: &Row) -> MetaResult<u32> {
    match row.get("sequence") {
        Some(SqlValue::Integer(n)) => u32::try_from(*n)
            .map_err(|_| decode_error("sequence", format!("{n} out of range"))),
        Some(other) => Err(decode_error(
            "sequence",
            format!("expected integer, got {other:?}"),
        )),
        None => Err(decode_error("sequence", "column absent")),
    }
}

fn state_field(row: &Row) -> MetaResult<DeltaState> {
    text_field(row, "state")?
        .parse::<DeltaState>()
        .map_err(|e| decode_error("state", e.to_string()))
}

fn json_field(row: &Row, column: &str) -> MetaResult<serde_json::Value> {
    match row.get(column) {
        // Nullable payload columns decode SQL NULL as JSON null
        Some(SqlValue::Null) => Ok(serde_json::Value::Null),
        Some(SqlValue::Text(text)) => serde_json::from_str(text)
            .map_err(|e| decode_error(column, e.to_string())),
        Some(other) => Err(decode_error(column, format!("expected text, got {other:?}"))),
        None => Err(decode_error(column, "column absent")),
    }
}

#[cfg(test)]
#[path = "codec_test.rs"]
mod tests;
