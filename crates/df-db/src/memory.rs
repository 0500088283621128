//! In-process engine implementation.
//!
//! `MemoryEngine` understands the narrow SQL surface the metadata layer
//! emits (CREATE TABLE, DROP TABLE IF EXISTS, REPLACE INTO, and simple
//! SELECTs) and keeps tables in process memory. Every executed statement is
//! recorded so tests can assert on write counts. Anything outside that
//! surface fails with ER_PARSE_ERROR, the same way a real engine would
//! reject it.

use crate::error::{DbError, DbResult};
use crate::traits::{ColumnInfo, QueryResult, Row, SqlEngine, SqlValue};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Mutex;

#[derive(Debug, Clone)]
struct ColumnDef {
    name: String,
    primary_key: bool,
    unique: bool,
}

#[derive(Debug, Default)]
struct TableDef {
    columns: Vec<ColumnDef>,
    rows: Vec<Row>,
}

impl TableDef {
    fn column(&self, name: &str) -> Option<&ColumnDef> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Columns whose values must be unique across rows (pk + unique keys).
    fn key_columns(&self) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|c| c.primary_key || c.unique)
            .map(|c| c.name.as_str())
            .collect()
    }
}

#[derive(Default)]
struct EngineState {
    tables: BTreeMap<String, TableDef>,
    executed: Vec<String>,
    describes: usize,
}

/// In-memory engine backend
pub struct MemoryEngine {
    state: Mutex<EngineState>,
}

impl Default for MemoryEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryEngine {
    /// Create an empty engine with no tables.
    pub fn new() -> Self {
        Self {
            state: Mutex::new(EngineState::default()),
        }
    }

    /// All statements executed so far, in order.
    pub fn executed_statements(&self) -> Vec<String> {
        self.state.lock().unwrap().executed.clone()
    }

    /// Number of `describe_columns` round-trips served so far.
    pub fn describe_count(&self) -> usize {
        self.state.lock().unwrap().describes
    }

    /// Count executed statements starting with `prefix` (case-insensitive).
    pub fn executed_matching(&self, prefix: &str) -> usize {
        self.state
            .lock()
            .unwrap()
            .executed
            .iter()
            .filter(|sql| starts_with_ci(sql.trim_start(), prefix))
            .count()
    }

    fn execute_sync(&self, sql: &str) -> DbResult<QueryResult> {
        let mut state = self.state.lock().unwrap();
        state.executed.push(sql.to_string());

        let trimmed = sql.trim();
        if let Some(rest) = strip_prefix_ci(trimmed, "DROP TABLE IF EXISTS ") {
            let table = parse_ident(rest)?.0;
            state.tables.remove(&table);
            Ok(QueryResult::default())
        } else if let Some(rest) = strip_prefix_ci(trimmed, "CREATE TABLE ") {
            create_table(&mut state, rest)
        } else if let Some(rest) = strip_prefix_ci(trimmed, "REPLACE INTO ") {
            replace_into(&mut state, rest)
        } else if let Some(rest) = strip_prefix_ci(trimmed, "SELECT ") {
            select(&state, rest)
        } else {
            Err(DbError::parse_error(format!(
                "unsupported statement: {trimmed}"
            )))
        }
    }
}

#[async_trait]
impl SqlEngine for MemoryEngine {
    async fn execute(&self, sql: &str) -> DbResult<QueryResult> {
        self.execute_sync(sql)
    }

    async fn list_tables_matching(&self, pattern: &str) -> DbResult<Vec<String>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .tables
            .keys()
            .filter(|name| like_match(pattern, name))
            .cloned()
            .collect())
    }

    async fn describe_columns(&self, table: &str) -> DbResult<Vec<ColumnInfo>> {
        let mut state = self.state.lock().unwrap();
        state.describes += 1;
        let def = state
            .tables
            .get(table)
            .ok_or_else(|| DbError::no_such_table(table))?;
        Ok(def
            .columns
            .iter()
            .map(|c| ColumnInfo {
                name: c.name.clone(),
                primary_key: c.primary_key,
            })
            .collect())
    }

    fn quote_ident(&self, ident: &str) -> String {
        format!("`{}`", ident.replace('`', "``"))
    }

    fn quote_value(&self, value: &SqlValue) -> String {
        match value {
            SqlValue::Null => "NULL".to_string(),
            SqlValue::Integer(n) => n.to_string(),
            SqlValue::Text(s) => {
                format!("'{}'", s.replace('\\', "\\\\").replace('\'', "\\'"))
            }
        }
    }

    fn engine_type(&self) -> &'static str {
        "memory"
    }
}

// --- statement handlers ---

fn create_table(state: &mut EngineState, rest: &str) -> DbResult<QueryResult> {
    let (table, rest) = parse_ident(rest)?;
    if state.tables.contains_key(&table) {
        return Err(DbError::engine(
            "ER_TABLE_EXISTS_ERROR",
            1050,
            format!("Table '{table}' already exists"),
        ));
    }

    let (body, _) = parenthesized(rest)?;
    let mut def = TableDef::default();
    for entry in split_top_level(&body, ',') {
        let entry = entry.trim();
        if entry.is_empty() {
            continue;
        }
        if let Some(keys) = strip_prefix_ci(entry, "PRIMARY KEY") {
            for key in parse_ident_list(keys)? {
                match def.columns.iter_mut().find(|c| c.name == key) {
                    Some(col) => col.primary_key = true,
                    None => return Err(DbError::bad_field(&key)),
                }
            }
        } else if let Some(keys) = strip_prefix_ci(entry, "UNIQUE KEY ") {
            // The index name before the column list is optional
            let keys = keys.trim_start();
            let keys = if keys.starts_with('(') {
                keys
            } else {
                parse_ident(keys)?.1
            };
            for key in parse_ident_list(keys)? {
                match def.columns.iter_mut().find(|c| c.name == key) {
                    Some(col) => col.unique = true,
                    None => return Err(DbError::bad_field(&key)),
                }
            }
        } else if starts_with_ci(entry, "KEY ") || starts_with_ci(entry, "INDEX ") {
            // Plain indexes carry no semantics here
        } else {
            let (name, _) = parse_ident(entry)?;
            def.columns.push(ColumnDef {
                name,
                primary_key: false,
                unique: false,
            });
        }
    }
    state.tables.insert(table, def);
    Ok(QueryResult::default())
}

fn replace_into(state: &mut EngineState, rest: &str) -> DbResult<QueryResult> {
    let (table, rest) = parse_ident(rest)?;
    let (col_list, rest) = parenthesized(rest)?;
    let rest = strip_prefix_ci(rest.trim_start(), "VALUES")
        .ok_or_else(|| DbError::parse_error("REPLACE INTO without VALUES"))?;
    let (val_list, _) = parenthesized(rest)?;

    let columns: Vec<String> = split_top_level(&col_list, ',')
        .iter()
        .map(|c| parse_ident(c).map(|(name, _)| name))
        .collect::<DbResult<_>>()?;
    let values: Vec<SqlValue> = split_top_level(&val_list, ',')
        .iter()
        .map(|v| parse_value(v.trim()))
        .collect::<DbResult<_>>()?;
    if columns.len() != values.len() {
        return Err(DbError::parse_error("column count does not match value count"));
    }

    let def = state
        .tables
        .get_mut(&table)
        .ok_or_else(|| DbError::no_such_table(&table))?;
    for column in &columns {
        if def.column(column).is_none() {
            return Err(DbError::bad_field(column));
        }
    }

    let mut row: Row = def
        .columns
        .iter()
        .map(|c| (c.name.clone(), SqlValue::Null))
        .collect();
    for (column, value) in columns.iter().zip(values) {
        row.insert(column.clone(), value);
    }

    // REPLACE semantics: drop every existing row that collides with the new
    // row on the primary key or any unique column, then insert.
    let keys: Vec<String> = def.key_columns().iter().map(|k| k.to_string()).collect();
    def.rows
        .retain(|existing| !keys.iter().any(|k| existing.get(k) == row.get(k)));
    def.rows.push(row);
    Ok(QueryResult::default())
}

fn select(state: &EngineState, rest: &str) -> DbResult<QueryResult> {
    let from = find_ci(rest, " FROM ")
        .ok_or_else(|| DbError::parse_error("SELECT without FROM"))?;
    let projection = rest[..from].trim().to_string();
    let rest = &rest[from + " FROM ".len()..];
    let (table, rest) = parse_ident(rest)?;

    let def = state
        .tables
        .get(&table)
        .ok_or_else(|| DbError::no_such_table(&table))?;

    let mut remainder = rest.trim();
    let mut filter: Option<(String, SqlValue)> = None;
    if let Some(cond) = strip_prefix_ci(remainder, "WHERE ") {
        let split = find_ci(cond, " ORDER BY ").unwrap_or(cond.len());
        let (clause, after) = cond.split_at(split);
        let eq = clause
            .find('=')
            .ok_or_else(|| DbError::parse_error("WHERE supports equality only"))?;
        let (column, _) = parse_ident(&clause[..eq])?;
        let value = parse_value(clause[eq + 1..].trim())?;
        if def.column(&column).is_none() {
            return Err(DbError::bad_field(&column));
        }
        filter = Some((column, value));
        remainder = after.trim();
    }

    let mut order: Option<String> = None;
    if let Some(by) = strip_prefix_ci(remainder, "ORDER BY ") {
        let (column, _) = parse_ident(by)?;
        if def.column(&column).is_none() {
            return Err(DbError::bad_field(&column));
        }
        order = Some(column);
    }

    let mut rows: Vec<Row> = def
        .rows
        .iter()
        .filter(|row| match &filter {
            Some((column, value)) => row.get(column) == Some(value),
            None => true,
        })
        .cloned()
        .collect();
    if let Some(column) = &order {
        rows.sort_by(|a, b| compare_values(a.get(column), b.get(column)));
    }

    let columns: Vec<String> = if projection == "*" {
        def.columns.iter().map(|c| c.name.clone()).collect()
    } else {
        split_top_level(&projection, ',')
            .iter()
            .map(|c| parse_ident(c).map(|(name, _)| name))
            .collect::<DbResult<_>>()?
    };
    for column in &columns {
        if def.column(column).is_none() {
            return Err(DbError::bad_field(column));
        }
    }

    let rows = rows
        .into_iter()
        .map(|row| {
            columns
                .iter()
                .map(|c| {
                    let value = row.get(c).cloned().unwrap_or(SqlValue::Null);
                    (c.clone(), value)
                })
                .collect()
        })
        .collect();

    Ok(QueryResult { columns, rows })
}

// --- parsing helpers ---

fn starts_with_ci(s: &str, prefix: &str) -> bool {
    s.get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

fn strip_prefix_ci<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    if starts_with_ci(s, prefix) {
        Some(&s[prefix.len()..])
    } else {
        None
    }
}

fn find_ci(haystack: &str, needle: &str) -> Option<usize> {
    if needle.len() > haystack.len() {
        return None;
    }
    (0..=haystack.len() - needle.len())
        .find(|&i| haystack.is_char_boundary(i) && starts_with_ci(&haystack[i..], needle))
}

/// Parse one identifier, backtick-quoted or bare, returning it together
/// with the unconsumed remainder.
fn parse_ident(s: &str) -> DbResult<(String, &str)> {
    let s = s.trim_start();
    if let Some(rest) = s.strip_prefix('`') {
        let mut name = String::new();
        let mut chars = rest.char_indices();
        while let Some((i, c)) = chars.next() {
            if c == '`' {
                // Doubled backtick is an escaped literal backtick
                if rest[i + 1..].starts_with('`') {
                    name.push('`');
                    chars.next();
                } else {
                    return Ok((name, &rest[i + 1..]));
                }
            } else {
                name.push(c);
            }
        }
        Err(DbError::parse_error("unterminated quoted identifier"))
    } else {
        let end = s
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .unwrap_or(s.len());
        if end == 0 {
            return Err(DbError::parse_error(format!("expected identifier at {s:?}")));
        }
        Ok((s[..end].to_string(), &s[end..]))
    }
}

/// Parse a parenthesized identifier list, e.g. `` (`a`, `b`) ``.
fn parse_ident_list(s: &str) -> DbResult<Vec<String>> {
    let (inner, _) = parenthesized(s)?;
    split_top_level(&inner, ',')
        .iter()
        .map(|part| parse_ident(part).map(|(name, _)| name))
        .collect()
}

/// Extract the contents of a balanced, quote-aware parenthesized group
/// starting at the front of `s`; returns (inner, remainder).
fn parenthesized(s: &str) -> DbResult<(String, &str)> {
    let s = s.trim_start();
    if !s.starts_with('(') {
        return Err(DbError::parse_error(format!("expected '(' at {s:?}")));
    }
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;
    for (i, c) in s.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match (quote, c) {
            (Some(q), '\\') if q != '`' => escaped = true,
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '\'') | (None, '"') | (None, '`') => quote = Some(c),
            (None, '(') => depth += 1,
            (None, ')') => {
                depth -= 1;
                if depth == 0 {
                    return Ok((s[1..i].to_string(), &s[i + 1..]));
                }
            }
            (None, _) => {}
        }
    }
    Err(DbError::parse_error("unbalanced parentheses"))
}

/// Split on `sep` outside quotes and parentheses.
fn split_top_level(s: &str, sep: char) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;
    for c in s.chars() {
        if escaped {
            current.push(c);
            escaped = false;
            continue;
        }
        match (quote, c) {
            (Some(q), '\\') if q != '`' => {
                escaped = true;
                current.push(c);
            }
            (Some(q), c) if c == q => {
                quote = None;
                current.push(c);
            }
            (Some(_), c) => current.push(c),
            (None, '\'') | (None, '"') | (None, '`') => {
                quote = Some(c);
                current.push(c);
            }
            (None, '(') => {
                depth += 1;
                current.push(c);
            }
            (None, ')') => {
                depth = depth.saturating_sub(1);
                current.push(c);
            }
            (None, c) if c == sep && depth == 0 => {
                parts.push(std::mem::take(&mut current));
            }
            (None, c) => current.push(c),
        }
    }
    if !current.trim().is_empty() || !parts.is_empty() {
        parts.push(current);
    }
    parts
}

/// Parse one value literal: NULL, an integer, or a single-quoted string.
fn parse_value(s: &str) -> DbResult<SqlValue> {
    if s.eq_ignore_ascii_case("NULL") {
        return Ok(SqlValue::Null);
    }
    if let Some(rest) = s.strip_prefix('\'') {
        let inner = rest
            .strip_suffix('\'')
            .ok_or_else(|| DbError::parse_error(format!("unterminated string {s:?}")))?;
        let mut out = String::new();
        let mut escaped = false;
        for c in inner.chars() {
            if escaped {
                out.push(c);
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else {
                out.push(c);
            }
        }
        return Ok(SqlValue::Text(out));
    }
    s.parse::<i64>()
        .map(SqlValue::Integer)
        .map_err(|_| DbError::parse_error(format!("unrecognized literal {s:?}")))
}

/// NULL sorts first, integers numerically, text lexicographically.
fn compare_values(a: Option<&SqlValue>, b: Option<&SqlValue>) -> std::cmp::Ordering {
    fn rank(v: Option<&SqlValue>) -> u8 {
        match v {
            None | Some(SqlValue::Null) => 0,
            Some(SqlValue::Integer(_)) => 1,
            Some(SqlValue::Text(_)) => 2,
        }
    }
    match (a, b) {
        (Some(SqlValue::Integer(x)), Some(SqlValue::Integer(y))) => x.cmp(y),
        (Some(SqlValue::Text(x)), Some(SqlValue::Text(y))) => x.cmp(y),
        _ => rank(a).cmp(&rank(b)),
    }
}

/// LIKE-style pattern match: `%` any run, `_` any single character.
fn like_match(pattern: &str, name: &str) -> bool {
    fn matches(p: &[char], n: &[char]) -> bool {
        match p.first() {
            None => n.is_empty(),
            Some('%') => matches(&p[1..], n) || (!n.is_empty() && matches(p, &n[1..])),
            Some('_') => !n.is_empty() && matches(&p[1..], &n[1..]),
            Some(c) => n.first() == Some(c) && matches(&p[1..], &n[1..]),
        }
    }
    let p: Vec<char> = pattern.chars().collect();
    let n: Vec<char> = name.chars().collect();
    matches(&p, &n)
}

#[cfg(test)]
#[path = "memory_test.rs"]
mod tests;
