//! df-db - Engine abstraction layer for Deltaforge
//!
//! This crate provides the `SqlEngine` trait consumed by the metadata
//! layer, the wire value model, and an in-process `MemoryEngine`
//! implementation used for tests and local development.

pub mod error;
pub mod memory;
pub mod traits;

pub use error::{DbError, DbResult};
pub use memory::MemoryEngine;
pub use traits::{ColumnInfo, QueryResult, Row, SqlEngine, SqlValue};
