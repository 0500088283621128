//! Line-oriented, quote-aware script tokenizer.
//!
//! Splits a human-authored script into [`Token`]s. Statements are terminated
//! by `;` outside string literals; fragments of a statement spanning several
//! lines are joined with single spaces. Single-line `--` comments become
//! comment tokens unless they appear between fragments of an open statement,
//! in which case they are accumulated as statement text.

use crate::error::{SqlError, SqlResult};
use crate::token::Token;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum QuoteState {
    None,
    Single,
    Double,
}

/// Scanner state carried across the lines of one `tokenize` call.
#[derive(Debug)]
struct Scanner {
    quote: QuoteState,
    /// A backslash was seen inside a literal; the next character is taken
    /// verbatim regardless of what it is.
    escaped: bool,
    /// Line on which the currently open literal started, for diagnostics.
    quote_line: usize,
    /// Fragment being accumulated on the current line.
    current: String,
    /// Fragments of the open statement, possibly from earlier lines.
    fragments: Vec<String>,
    tokens: Vec<Token>,
}

impl Scanner {
    fn new() -> Self {
        Self {
            quote: QuoteState::None,
            escaped: false,
            quote_line: 0,
            current: String::new(),
            fragments: Vec::new(),
            tokens: Vec::new(),
        }
    }

    /// True while buffered fragments exist since the last separator.
    fn statement_open(&self) -> bool {
        !self.fragments.is_empty() || !self.current.is_empty() || self.quote != QuoteState::None
    }

    fn scan_line(&mut self, line: &str, line_no: usize) {
        for ch in line.chars() {
            if self.escaped {
                self.current.push(ch);
                self.escaped = false;
                continue;
            }
            match (self.quote, ch) {
                (QuoteState::None, ';') => self.emit_statement(),
                (QuoteState::None, '\'') => {
                    self.quote = QuoteState::Single;
                    self.quote_line = line_no;
                    self.current.push(ch);
                }
                (QuoteState::None, '"') => {
                    self.quote = QuoteState::Double;
                    self.quote_line = line_no;
                    self.current.push(ch);
                }
                (QuoteState::Single, '\'') | (QuoteState::Double, '"') => {
                    self.quote = QuoteState::None;
                    self.current.push(ch);
                }
                (QuoteState::Single, '\\') | (QuoteState::Double, '\\') => {
                    self.escaped = true;
                    self.current.push(ch);
                }
                (_, other) => self.current.push(other),
            }
        }

        // End of line: inside a literal the line break is content; otherwise
        // the trailing fragment carries over to the next line.
        if self.quote == QuoteState::None {
            self.flush_fragment();
        } else {
            self.escaped = false;
            self.current.push(' ');
        }
    }

    /// Move the current fragment, trimmed, into the fragment buffer.
    fn flush_fragment(&mut self) {
        let fragment = self.current.trim();
        if !fragment.is_empty() {
            self.fragments.push(fragment.to_string());
        }
        self.current.clear();
    }

    /// Separator found: join buffered fragments with single spaces and emit.
    /// A separator with nothing buffered emits a zero-length statement.
    fn emit_statement(&mut self) {
        self.flush_fragment();
        let text = self.fragments.join(" ");
        self.fragments.clear();
        self.tokens.push(Token::Statement { text });
    }

    fn finish(self) -> SqlResult<Vec<Token>> {
        if self.quote != QuoteState::None {
            return Err(SqlError::Syntax {
                line: self.quote_line,
                message: "unterminated string literal".to_string(),
            });
        }
        if !self.fragments.is_empty() {
            return Err(SqlError::UnterminatedStatement(self.fragments.join(" ")));
        }
        Ok(self.tokens)
    }
}

/// Extract comment text if `line` matches the comment grammar.
fn comment_text(line: &str) -> Option<&str> {
    line.trim_start()
        .strip_prefix("--")
        .map(|rest| rest.trim())
}

/// Tokenize a raw script into comments and executable statements.
///
/// Fails with [`SqlError::Syntax`] when a string literal is left open and
/// with [`SqlError::UnterminatedStatement`] when the script ends while a
/// statement is still buffered. No partial token list is returned on error.
pub fn tokenize(script: &str) -> SqlResult<Vec<Token>> {
    let mut scanner = Scanner::new();

    for (idx, line) in script.lines().enumerate() {
        if scanner.quote == QuoteState::None && line.trim().is_empty() {
            continue;
        }
        if !scanner.statement_open() {
            if let Some(text) = comment_text(line) {
                scanner.tokens.push(Token::Comment {
                    text: text.to_string(),
                });
                continue;
            }
        }
        scanner.scan_line(line, idx + 1);
    }

    scanner.finish()
}

#[cfg(test)]
#[path = "tokenizer_test.rs"]
mod tests;
