//! Delta record types.
//!
//! A delta is one unit of schema change: a named, sequenced bundle of SQL
//! script content plus descriptive metadata and a lifecycle state. Records
//! are persisted in the metadata table by df-meta; the `delta` and `meta`
//! payloads are opaque JSON round-tripped structurally, never inspected.

use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle state of a delta.
///
/// Only `pending` and `deployed` exist; a delta becomes `deployed` once the
/// orchestrator has executed every statement of its script without error.
/// No transition back to `pending` is defined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeltaState {
    /// Authored but not yet executed against the target engine
    Pending,
    /// Every statement of the delta's script has been executed
    Deployed,
}

impl DeltaState {
    /// Stored textual form of the state.
    pub fn as_str(&self) -> &'static str {
        match self {
            DeltaState::Pending => "pending",
            DeltaState::Deployed => "deployed",
        }
    }
}

impl Default for DeltaState {
    fn default() -> Self {
        DeltaState::Pending
    }
}

impl fmt::Display for DeltaState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeltaState {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(DeltaState::Pending),
            "deployed" => Ok(DeltaState::Deployed),
            other => Err(CoreError::UnknownState(other.to_string())),
        }
    }
}

/// One schema-change record as stored in the metadata table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeltaRecord {
    /// Author-assigned unique identifier
    pub name: String,
    /// Unique sequence number defining deployment order
    pub sequence: u32,
    /// Lifecycle state
    pub state: DeltaState,
    /// Opaque script payload (e.g. the delta's script file contents)
    pub delta: serde_json::Value,
    /// Opaque descriptive metadata
    pub meta: serde_json::Value,
}

impl DeltaRecord {
    /// Create a new record in the default `pending` state with empty payloads.
    pub fn new(name: impl Into<String>, sequence: u32) -> Self {
        Self {
            name: name.into(),
            sequence,
            state: DeltaState::default(),
            delta: serde_json::Value::Object(serde_json::Map::new()),
            meta: serde_json::Value::Object(serde_json::Map::new()),
        }
    }
}

/// Projection of a delta record for status reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeltaStateRow {
    /// Delta identifier
    pub name: String,
    /// Deployment order key
    pub sequence: u32,
    /// Current lifecycle state
    pub state: DeltaState,
}

#[cfg(test)]
#[path = "delta_test.rs"]
mod tests;
