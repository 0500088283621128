//! Serial script execution.
//!
//! A tokenized script runs as an explicit sequential loop: each statement is
//! submitted only after the previous one's result has arrived, and the first
//! failure aborts the remaining work. Comments whose text starts with `*`
//! are operator-facing progress markers and are logged.

use crate::error::MetaResult;
use df_db::SqlEngine;
use df_sql::{tokenize, Token};

/// Tokenize `script` and execute its statements one at a time, in order.
///
/// Tokenizer errors reject the script wholesale before anything executes.
pub async fn run_script(engine: &dyn SqlEngine, script: &str) -> MetaResult<()> {
    for token in tokenize(script)? {
        match token {
            Token::Comment { text } => {
                if let Some(marker) = text.strip_prefix('*') {
                    log::info!("{}", marker.trim_start());
                }
            }
            Token::Statement { text } => {
                engine.execute(&text).await?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "script_test.rs"]
mod tests;
