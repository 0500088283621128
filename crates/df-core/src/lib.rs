//! df-core - Core library for Deltaforge
//!
//! This crate provides the shared delta types, store configuration, and
//! error enum used across all Deltaforge components.

pub mod config;
pub mod delta;
pub mod error;

pub use config::StoreConfig;
pub use delta::{DeltaRecord, DeltaState, DeltaStateRow};
pub use error::{CoreError, CoreResult};
