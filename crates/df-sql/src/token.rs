//! Token types produced by the tokenizer.

use serde::{Deserialize, Serialize};

/// One unit of a tokenized script: either a single-line documentation
/// comment or an executable statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Token {
    /// A `--` annotation; text is the content after the marker, trimmed
    Comment { text: String },
    /// One executable unit, newlines collapsed to single spaces, trailing
    /// separator removed. May be empty for a bare separator.
    Statement { text: String },
}

impl Token {
    /// The token's text, regardless of kind.
    pub fn text(&self) -> &str {
        match self {
            Token::Comment { text } => text,
            Token::Statement { text } => text,
        }
    }

    /// True for statement tokens.
    pub fn is_statement(&self) -> bool {
        matches!(self, Token::Statement { .. })
    }
}
