//! CLI module
//!
//! Command-line interface for running the connector locally.
//!
//! # Commands
//!
//! - `schema` - Print the tables the destination should provision
//! - `tables` - List table names and the endpoints they read from
//! - `sync` - Run a full sync and write upserts as JSON lines

mod commands;
mod runner;

pub use commands::{Cli, Commands};
pub use runner::{write_upserts, Runner};
