//! Store configuration.

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};

/// Default prefix for the metadata table name.
const DEFAULT_PREFIX: &str = "_df_meta_";

/// Configuration for a metadata store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoreConfig {
    /// Prefix prepended to the fixed `deltas` suffix to form the metadata
    /// table name. Must be a plain identifier; it is interpolated into DDL.
    #[serde(default = "default_prefix")]
    pub prefix: String,
}

fn default_prefix() -> String {
    DEFAULT_PREFIX.to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
        }
    }
}

impl StoreConfig {
    /// Create a config with a custom table prefix, validating that the
    /// prefix is usable as part of an identifier.
    pub fn with_prefix(prefix: impl Into<String>) -> CoreResult<Self> {
        let prefix = prefix.into();
        if prefix.is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "table prefix must not be empty".to_string(),
            });
        }
        if !prefix.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(CoreError::ConfigInvalid {
                message: format!("table prefix {prefix:?} contains non-identifier characters"),
            });
        }
        Ok(Self { prefix })
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
