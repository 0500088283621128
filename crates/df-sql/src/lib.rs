//! df-sql - Script tokenizer for Deltaforge
//!
//! This crate splits a raw multi-statement SQL script into individually
//! executable statements and inline documentation comments, handling string
//! literals, backslash escapes, and embedded statement separators.

pub mod error;
pub mod token;
pub mod tokenizer;

pub use error::{SqlError, SqlResult};
pub use token::Token;
pub use tokenizer::tokenize;
