//! Engine types

use crate::types::UpsertOp;
use std::collections::BTreeMap;

/// Statistics from a sync operation
#[derive(Debug, Clone, Default)]
pub struct SyncStats {
    /// Total records synced
    pub records_synced: usize,
    /// Records synced per table
    pub per_table: BTreeMap<String, usize>,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

impl SyncStats {
    /// Create new stats
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one upsert
    pub fn record(&mut self, op: &UpsertOp) {
        self.records_synced += 1;
        *self.per_table.entry(op.table.clone()).or_default() += 1;
    }

    /// Records synced for one table
    pub fn table_count(&self, table: &str) -> usize {
        self.per_table.get(table).copied().unwrap_or(0)
    }

    /// Number of tables that produced at least one record
    pub fn tables_synced(&self) -> usize {
        self.per_table.len()
    }

    /// Set duration
    pub fn set_duration(&mut self, ms: u64) {
        self.duration_ms = ms;
    }
}
