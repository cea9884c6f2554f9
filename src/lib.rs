// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]

//! # Fleetio Connector
//!
//! Pulls fleet-management data from the Fleetio REST API and turns it into a
//! stream of flat upserts, one destination table per endpoint.
//!
//! ## Features
//!
//! - **Table Registry**: Static list of tables, each mapped to an endpoint
//! - **Cursor Pagination**: Follows `next_cursor` until the API runs dry
//! - **Flattening**: Nested records become dotted keys, lists become JSON strings
//! - **Fail-soft Sync**: A failing endpoint ends its own table, never the run
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use fleetio_connector::{Configuration, Connector, ConnectorSettings, FleetioConnector, State};
//! use futures::StreamExt;
//!
//! #[tokio::main]
//! async fn main() -> fleetio_connector::Result<()> {
//!     let configuration = Configuration::load_or_default("configuration.json")?;
//!     let connector = FleetioConnector::from_configuration(&configuration, &ConnectorSettings::default())?;
//!
//!     // Tables to provision
//!     let schema = connector.schema();
//!
//!     // Upserts, lazily
//!     let mut upserts = connector.update(&State::new());
//!     while let Some(op) = upserts.next().await {
//!         // Apply op.data to op.table
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     Connector Interface                         │
//! │  schema() → Vec<TableSchema>    update(state) → Stream<Upsert>  │
//! └─────────────────────────────────────────────────────────────────┘
//!                                │
//! ┌────────────┬─────────────┬───┴─────────┬──────────┬────────────┐
//! │  Registry  │    HTTP     │  Paginate   │ Flatten  │   Output   │
//! ├────────────┼─────────────┼─────────────┼──────────┼────────────┤
//! │ Built-in   │ GET + JSON  │ Cursor      │ Dotted   │ JSON lines │
//! │ YAML file  │ Fixed hdrs  │             │ keys     │            │
//! └────────────┴─────────────┴─────────────┴──────────┴────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Table definitions and the built-in registry
pub mod registry;

/// HTTP client and request headers
pub mod http;

/// Pagination
pub mod pagination;

/// Record flattening
pub mod flatten;

/// Sync engine
pub mod engine;

/// User configuration and endpoint settings
pub mod config;

/// Connector trait and the Fleetio connector
pub mod connector;

/// JSON lines output
pub mod output;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use config::{Configuration, ConnectorSettings};
pub use connector::{Connector, FleetioConnector};
pub use engine::UpsertStream;
pub use flatten::flatten;
pub use registry::{TableDefinition, TableRegistry, TableSchema};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
