//! Metadata store: bootstrap and introspection of the metadata table.
//!
//! The store owns exactly one engine session. Both caches (the resolved
//! metadata table and per-table column descriptors) are populated at most
//! once and never invalidated; replacing the engine via [`MetaStore::connect`]
//! discards them along with the old session.

use crate::columns::TableColumns;
use crate::error::MetaResult;
use crate::script::run_script;
use df_core::StoreConfig;
use df_db::SqlEngine;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OnceCell};

/// Fixed suffix of the metadata table name; the prefix comes from config.
const TABLE_SUFFIX: &str = "deltas";

/// The resolved metadata table: its name and classified columns.
#[derive(Debug, Clone)]
pub struct MetaTable {
    /// Full table name (prefix + suffix)
    pub name: String,
    /// Column descriptor in the engine's native order
    pub columns: Arc<TableColumns>,
}

/// Store for delta records, backed by a table inside the target engine.
pub struct MetaStore {
    engine: Arc<dyn SqlEngine>,
    config: StoreConfig,
    meta_table: OnceCell<MetaTable>,
    table_info: Mutex<HashMap<String, Arc<TableColumns>>>,
}

impl MetaStore {
    /// Create a store over an engine session.
    pub fn new(engine: Arc<dyn SqlEngine>, config: StoreConfig) -> Self {
        Self {
            engine,
            config,
            meta_table: OnceCell::new(),
            table_info: Mutex::new(HashMap::new()),
        }
    }

    /// Replace the engine session.
    ///
    /// Connect is not additive: the previous session is dropped first, and
    /// every cache bound to it is discarded.
    pub fn connect(&mut self, engine: Arc<dyn SqlEngine>) {
        self.engine = engine;
        self.meta_table = OnceCell::new();
        self.table_info = Mutex::new(HashMap::new());
    }

    /// The engine this store talks to.
    pub fn engine(&self) -> &dyn SqlEngine {
        self.engine.as_ref()
    }

    /// Name of the metadata table under the configured prefix.
    pub fn meta_table_name(&self) -> String {
        format!("{}{}", self.config.prefix, TABLE_SUFFIX)
    }

    /// Idempotently guarantee the metadata table exists and describe it.
    ///
    /// The first caller checks for the table, creates it when absent, and
    /// introspects its columns; concurrent and later callers share that one
    /// in-flight resolution instead of racing to create the table twice.
    pub async fn ensure_table(&self) -> MetaResult<&MetaTable> {
        self.meta_table
            .get_or_try_init(|| async {
                let table = self.meta_table_name();
                let existing = self.engine.list_tables_matching(&table).await?;
                if existing.is_empty() {
                    log::debug!("metadata table {table} absent, creating");
                    run_script(self.engine.as_ref(), &self.creation_script(&table)).await?;
                }
                let columns = self.describe_table(&table).await?;
                Ok(MetaTable {
                    name: table,
                    columns,
                })
            })
            .await
    }

    /// Introspect a table's columns, classified by key role.
    ///
    /// Memoized per table name; the cache lock is held across the engine
    /// round-trip so each table is introspected at most once.
    pub async fn describe_table(&self, table: &str) -> MetaResult<Arc<TableColumns>> {
        let mut cache = self.table_info.lock().await;
        if let Some(columns) = cache.get(table) {
            return Ok(columns.clone());
        }
        let described = self.engine.describe_columns(table).await?;
        let columns = Arc::new(TableColumns::classify(&described));
        cache.insert(table.to_string(), columns.clone());
        Ok(columns)
    }

    /// Tokenize and execute a script against this store's engine, one
    /// statement at a time.
    pub async fn run_script(&self, script: &str) -> MetaResult<()> {
        run_script(self.engine.as_ref(), script).await
    }

    /// Drop the metadata table. Administrative reset; meant for a fresh
    /// store whose caches have not yet resolved.
    pub async fn drop_meta_table(&self) -> MetaResult<()> {
        let table = self.engine.quote_ident(&self.meta_table_name());
        let script = format!("-- * Dropping {table}\nDROP TABLE IF EXISTS {table};");
        self.run_script(&script).await
    }

    fn creation_script(&self, table: &str) -> String {
        let table = self.engine.quote_ident(table);
        format!(
            "-- * Creating {table}\n\
             DROP TABLE IF EXISTS {table};\n\
             CREATE TABLE {table} (\n\
             \x20 `name` varchar(80) NOT NULL COMMENT 'The name of the delta',\n\
             \x20 `sequence` int(10) unsigned NOT NULL COMMENT 'The sequence number of the delta',\n\
             \x20 `state` varchar(20) NOT NULL DEFAULT 'pending' COMMENT 'The state of the delta',\n\
             \x20 `delta` mediumtext COMMENT 'JSON bundle of the scripts',\n\
             \x20 `meta` mediumtext COMMENT 'JSON metadata bundle',\n\
             \x20 PRIMARY KEY (`name`),\n\
             \x20 UNIQUE KEY `sequence` (`sequence`),\n\
             \x20 KEY `state` (`state`)\n\
             );"
        )
    }
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
