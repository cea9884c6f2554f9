//! Common types used throughout the connector
//!
//! Shared type aliases plus the unit of output, [`UpsertOp`].

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

/// Generic key-value map with string keys and values
pub type StringMap = HashMap<String, String>;

/// Single-level record keyed by dotted paths
///
/// Ordered so that serializing the same record twice gives identical bytes.
pub type FlatRecord = BTreeMap<String, JsonValue>;

/// Persisted cross-run state handed to a sync.
///
/// Every run is a full refresh, so the connector accepts this and ignores it.
pub type State = JsonObject;

// ============================================================================
// Upsert
// ============================================================================

/// A single insert-or-update for the destination, keyed by the table's primary key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpsertOp {
    /// Destination table name
    pub table: String,
    /// Flattened record
    pub data: FlatRecord,
}

impl UpsertOp {
    /// Create a new upsert
    pub fn new(table: impl Into<String>, data: FlatRecord) -> Self {
        Self {
            table: table.into(),
            data,
        }
    }

    /// Look up a field of the flattened record
    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.data.get(key)
    }
}
