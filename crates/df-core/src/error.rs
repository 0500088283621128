//! Error types for df-core

use thiserror::Error;

/// Core error type for Deltaforge
#[derive(Error, Debug)]
pub enum CoreError {
    /// E001: Unknown delta lifecycle state
    #[error("[E001] Unknown delta state: {0}")]
    UnknownState(String),

    /// E002: Invalid configuration value
    #[error("[E002] Invalid config: {message}")]
    ConfigInvalid { message: String },
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;
