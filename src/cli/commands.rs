//! CLI commands and argument parsing

use crate::output::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Fleetio connector CLI
#[derive(Parser, Debug)]
#[command(name = "fleetio-connector")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (JSON), defaults to ./configuration.json when present
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Table registry file (YAML) replacing the built-in tables
    #[arg(long, global = true)]
    pub tables_file: Option<PathBuf>,

    /// API base URL
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Request timeout in seconds (none by default)
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the schema declaration
    Schema,

    /// List tables and their request paths
    Tables,

    /// Sync tables and write upserts
    Sync {
        /// Tables to sync (comma-separated, empty = all)
        #[arg(long)]
        tables: Option<String>,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "json")]
        format: OutputFormat,

        /// State file (JSON)
        #[arg(short, long, conflicts_with = "state_json")]
        state: Option<PathBuf>,

        /// Inline state JSON
        #[arg(long)]
        state_json: Option<String>,
    },
}
