//! Delta state machine: persistence operations over delta records.
//!
//! All operations resolve the metadata table first via
//! [`MetaStore::ensure_table`]. Saves are whole-row replaces keyed by the
//! primary key; state transitions are read-then-write and idempotent. The
//! read-then-write in [`MetaStore::set_delta_state`] is not guarded by an
//! engine-level transaction, so concurrent orchestrators sharing one
//! metadata table can lose an update.

use crate::codec;
use crate::columns::align_columns;
use crate::error::{MetaError, MetaResult};
use crate::store::MetaStore;
use df_core::{DeltaRecord, DeltaState, DeltaStateRow};
use df_db::SqlValue;

impl MetaStore {
    /// Upsert a record by primary key, overwriting the stored row entirely.
    pub async fn save_delta(&self, record: &DeltaRecord) -> MetaResult<()> {
        let table = self.ensure_table().await?;
        let row = codec::encode(record);
        let values = align_columns(&row, &table.columns.all)?;

        let engine = self.engine();
        let columns = table
            .columns
            .all
            .iter()
            .map(|c| engine.quote_ident(c))
            .collect::<Vec<_>>()
            .join(", ");
        let values = values
            .iter()
            .map(|v| engine.quote_value(v))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "REPLACE INTO {} ({columns}) VALUES ({values})",
            engine.quote_ident(&table.name)
        );
        engine.execute(&sql).await?;
        Ok(())
    }

    /// Point lookup by sequence; `None` when no row matches.
    pub async fn load_delta(&self, sequence: u32) -> MetaResult<Option<DeltaRecord>> {
        let table = self.ensure_table().await?;
        let engine = self.engine();
        let sql = format!(
            "SELECT * FROM {} WHERE {} = {}",
            engine.quote_ident(&table.name),
            engine.quote_ident("sequence"),
            engine.quote_value(&SqlValue::Integer(i64::from(sequence)))
        );
        let result = engine.execute(&sql).await?;
        match result.rows.first() {
            Some(row) => Ok(Some(codec::decode(row)?)),
            None => Ok(None),
        }
    }

    /// All records in deployment order (ascending sequence).
    pub async fn load_deltas(&self) -> MetaResult<Vec<DeltaRecord>> {
        let table = self.ensure_table().await?;
        let engine = self.engine();
        let sql = format!(
            "SELECT * FROM {} ORDER BY {}",
            engine.quote_ident(&table.name),
            engine.quote_ident("sequence")
        );
        let result = engine.execute(&sql).await?;
        result.rows.iter().map(codec::decode).collect()
    }

    /// {name, sequence, state} projection in deployment order.
    pub async fn load_delta_states(&self) -> MetaResult<Vec<DeltaStateRow>> {
        let table = self.ensure_table().await?;
        let engine = self.engine();
        let projection = ["name", "sequence", "state"]
            .iter()
            .map(|c| engine.quote_ident(c))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "SELECT {projection} FROM {} ORDER BY {}",
            engine.quote_ident(&table.name),
            engine.quote_ident("sequence")
        );
        let result = engine.execute(&sql).await?;
        result.rows.iter().map(codec::decode_state_row).collect()
    }

    /// Transition a delta to `state`.
    ///
    /// Fails when the sequence is unknown; re-setting the current state is
    /// a no-op and issues no write.
    pub async fn set_delta_state(&self, sequence: u32, state: DeltaState) -> MetaResult<()> {
        let mut record = self
            .load_delta(sequence)
            .await?
            .ok_or(MetaError::UnknownDelta(sequence))?;
        if record.state == state {
            return Ok(());
        }
        record.state = state;
        self.save_delta(&record).await
    }
}

#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
