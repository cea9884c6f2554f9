//! Table registry module
//!
//! Declarative list of the tables the connector syncs. Each entry names the
//! destination table, its primary key and typed columns, and the API request
//! that produces its records.
//!
//! # Overview
//!
//! - [`TableRegistry::builtin`] - the Fleetio tables, built once per process
//! - [`TableRegistry::from_file`] - an alternative list loaded from YAML
//! - [`TableRegistry::schema`] - the destination-facing projection, which
//!   never includes request paths or parameters

mod builtin;
mod types;

pub use types::{ColumnType, ParamValue, RequestInfo, TableDefinition, TableRegistry, TableSchema};
