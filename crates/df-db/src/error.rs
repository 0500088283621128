//! Error types for df-db

use thiserror::Error;

/// Engine operation errors
#[derive(Error, Debug)]
pub enum DbError {
    /// Connection error (D001)
    #[error("[D001] Engine connection failed: {0}")]
    ConnectionError(String),

    /// Engine-reported failure with machine-readable code and number (D002)
    #[error("[D002] Engine error {code} ({number}): {message}")]
    Engine {
        code: String,
        number: u16,
        message: String,
    },
}

impl DbError {
    /// Build an engine failure from a MySQL-style symbolic code and errno.
    pub fn engine(code: &str, number: u16, message: impl Into<String>) -> Self {
        DbError::Engine {
            code: code.to_string(),
            number,
            message: message.into(),
        }
    }

    /// Unknown table (ER_NO_SUCH_TABLE).
    pub fn no_such_table(table: &str) -> Self {
        Self::engine("ER_NO_SUCH_TABLE", 1146, format!("Table '{table}' doesn't exist"))
    }

    /// Statement rejected by the engine's own parser (ER_PARSE_ERROR).
    pub fn parse_error(message: impl Into<String>) -> Self {
        Self::engine("ER_PARSE_ERROR", 1064, message)
    }

    /// Unknown column in a statement (ER_BAD_FIELD_ERROR).
    pub fn bad_field(column: &str) -> Self {
        Self::engine("ER_BAD_FIELD_ERROR", 1054, format!("Unknown column '{column}'"))
    }
}

/// Result type alias for DbError
pub type DbResult<T> = Result<T, DbError>;
