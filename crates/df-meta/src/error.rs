//! Error types for df-meta

use thiserror::Error;

/// Metadata store errors
#[derive(Error, Debug)]
pub enum MetaError {
    /// Tokenizer rejected a script (M001)
    #[error("[M001] Script rejected: {0}")]
    Script(#[from] df_sql::SqlError),

    /// Engine failure, propagated as-is (M002)
    #[error("[M002] Engine failure: {0}")]
    Engine(#[from] df_db::DbError),

    /// Stored payload text is not valid serialized structure (M003)
    #[error("[M003] Cannot decode stored {column}: {message}")]
    Decode { column: String, message: String },

    /// Record fields do not align with table columns; both directions are
    /// reported together (M004)
    #[error("[M004] Record {}", mismatch_summary(.missing, .unknown))]
    SchemaMismatch {
        missing: Vec<String>,
        unknown: Vec<String>,
    },

    /// State transition requested for a nonexistent sequence (M005)
    #[error("[M005] Unknown delta: {0}")]
    UnknownDelta(u32),
}

fn mismatch_summary(missing: &[String], unknown: &[String]) -> String {
    let mut parts = Vec::new();
    if !missing.is_empty() {
        parts.push(format!("is missing field(s): {}", missing.join(", ")));
    }
    if !unknown.is_empty() {
        parts.push(format!("has unknown field(s): {}", unknown.join(", ")));
    }
    parts.join(" and ")
}

/// Result type alias for MetaError
pub type MetaResult<T> = Result<T, MetaError>;
