//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands};
use crate::config::{Configuration, ConnectorSettings, DEFAULT_CONFIG_FILE};
use crate::connector::{Connector, FleetioConnector};
use crate::engine::{SyncStats, UpsertStream};
use crate::error::{Error, Result, ResultExt};
use crate::output::{JsonlWriter, OutputFormat};
use crate::registry::TableRegistry;
use crate::types::{JsonValue, State};
use futures::StreamExt;
use std::io::Write;
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::info;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Schema => self.schema(),
            Commands::Tables => self.tables(),
            Commands::Sync {
                tables,
                output,
                format,
                state,
                state_json,
            } => {
                let state = load_state(state.as_deref(), state_json.as_deref())?;
                self.sync(tables.as_deref(), output.as_deref(), *format, &state)
                    .await
            }
        }
    }

    /// Load the user configuration
    ///
    /// An explicit `--config` must exist; the default file is optional.
    fn load_configuration(&self) -> Result<Configuration> {
        match &self.cli.config {
            Some(path) => Configuration::from_file(path),
            None => Configuration::load_or_default(DEFAULT_CONFIG_FILE),
        }
    }

    /// Endpoint settings from global flags
    fn settings(&self) -> ConnectorSettings {
        let mut settings = ConnectorSettings::new();
        if let Some(base_url) = &self.cli.base_url {
            settings = settings.with_base_url(base_url);
        }
        if let Some(secs) = self.cli.timeout_secs {
            settings = settings.with_timeout(Duration::from_secs(secs));
        }
        settings
    }

    /// Table registry, narrowed to `tables` when given
    fn load_registry(&self, tables: Option<&str>) -> Result<TableRegistry> {
        let registry = match &self.cli.tables_file {
            Some(path) => TableRegistry::from_file(path)?,
            None => TableRegistry::builtin().clone(),
        };

        select_tables(registry, tables)
    }

    /// Print the schema declaration
    fn schema(&self) -> Result<()> {
        let registry = self.load_registry(None)?;
        let schema = serde_json::to_string_pretty(&registry.schema())?;
        println!("{schema}");
        Ok(())
    }

    /// List tables
    fn tables(&self) -> Result<()> {
        let registry = self.load_registry(None)?;
        for table in registry.tables() {
            println!("{}\t{}", table.name, table.request.path);
        }
        Ok(())
    }

    /// Run a sync
    async fn sync(
        &self,
        tables: Option<&str>,
        output: Option<&Path>,
        format: OutputFormat,
        state: &State,
    ) -> Result<()> {
        let sync_start = Instant::now();
        let configuration = self.load_configuration()?;
        let registry = self.load_registry(tables)?;

        let connector = FleetioConnector::from_configuration(&configuration, &self.settings())?
            .with_registry(registry);

        let mut stats = match output {
            Some(path) => {
                let writer = JsonlWriter::create(path, format)?;
                write_upserts(connector.update(state), writer).await?
            }
            None => write_upserts(connector.update(state), JsonlWriter::stdout(format)).await?,
        };
        stats.set_duration(sync_start.elapsed().as_millis() as u64);

        for table in connector.registry().tables() {
            info!(
                table = %table.name,
                records = stats.table_count(&table.name),
                "Table summary"
            );
        }
        info!(
            "Sync complete: {} records from {}/{} tables in {}ms",
            stats.records_synced,
            stats.tables_synced(),
            connector.registry().len(),
            stats.duration_ms
        );
        Ok(())
    }
}

/// Drain an upsert stream into a writer, counting what went through
pub async fn write_upserts<W: Write>(
    mut upserts: UpsertStream<'_>,
    mut writer: JsonlWriter<W>,
) -> Result<SyncStats> {
    let mut stats = SyncStats::new();
    while let Some(op) = upserts.next().await {
        stats.record(&op);
        writer.write_upsert(op)?;
    }
    writer.finish()?;
    Ok(stats)
}

/// Split a comma-separated table list, ignoring blanks
pub(crate) fn parse_table_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Narrow a registry to the listed tables; a blank list keeps every table
pub(crate) fn select_tables(
    registry: TableRegistry,
    tables: Option<&str>,
) -> Result<TableRegistry> {
    let names = tables.map(parse_table_list).unwrap_or_default();
    if names.is_empty() {
        return Ok(registry);
    }
    registry.select(names.as_slice())
}

/// Load state, inline JSON taking precedence over a file
pub(crate) fn load_state(path: Option<&Path>, inline: Option<&str>) -> Result<State> {
    let value: JsonValue = if let Some(json) = inline {
        serde_json::from_str(json).context("Invalid state JSON")?
    } else if let Some(path) = path {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read state file {}", path.display()))?;
        serde_json::from_str(&content).context("Invalid state JSON")?
    } else {
        return Ok(State::new());
    };

    match value {
        JsonValue::Object(state) => Ok(state),
        JsonValue::Null => Ok(State::new()),
        _ => Err(Error::config("State must be a JSON object")),
    }
}
