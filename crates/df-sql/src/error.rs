//! Error types for df-sql

use thiserror::Error;

/// Script tokenizer errors
#[derive(Error, Debug)]
pub enum SqlError {
    /// Syntax error (S001) — a line could not be matched by any grammar,
    /// e.g. a string literal left open at end of script
    #[error("[S001] Syntax error at line {line}: {message}")]
    Syntax { line: usize, message: String },

    /// Unterminated statement (S002) — script ended with no separator seen
    /// since the last flushed statement
    #[error("[S002] Missing statement separator at end of script: {0:?}")]
    UnterminatedStatement(String),
}

/// Result type alias for SqlError
pub type SqlResult<T> = Result<T, SqlError>;
