//! df-meta - Metadata store and delta state machine for Deltaforge
//!
//! Persists per-delta metadata (sequence, name, lifecycle state, payloads)
//! in a dedicated table inside the target engine, with idempotent bootstrap
//! of that table and read-modify-write state transitions. The store itself
//! is split across two impl blocks: `store` covers table bootstrap,
//! introspection, and script execution; `state` covers the delta
//! operations built on top.

pub mod codec;
pub mod columns;
pub mod error;
pub mod script;
pub mod state;
pub mod store;

pub use codec::{decode, encode};
pub use columns::{align_columns, TableColumns};
pub use error::{MetaError, MetaResult};
pub use script::run_script;
pub use store::{MetaStore, MetaTable};
