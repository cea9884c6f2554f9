//! Connector trait and the Fleetio connector
//!
//! A connector answers two questions for the destination harness: which
//! tables to provision ([`Connector::schema`]) and which upserts to apply
//! ([`Connector::update`]).

use crate::config::{Configuration, ConnectorSettings};
use crate::engine::{sync_registry, UpsertStream};
use crate::error::Result;
use crate::http::{compose_headers, Fetcher, HttpClient, HttpClientConfig};
use crate::pagination::CursorPaginator;
use crate::registry::{TableRegistry, TableSchema};
use crate::types::State;
use std::borrow::Cow;
use tracing::{debug, info};

// ============================================================================
// Connector Trait
// ============================================================================

/// Core trait for a source connector
pub trait Connector: Send + Sync {
    /// Tables the destination should provision before a sync
    fn schema(&self) -> Vec<TableSchema>;

    /// Full sync of every table as a lazy stream of upserts
    ///
    /// `state` is what the previous run left behind.
    fn update<'a>(&'a self, state: &State) -> UpsertStream<'a>;
}

// ============================================================================
// Fleetio Connector
// ============================================================================

/// Connector for the Fleetio API
pub struct FleetioConnector<F: Fetcher = HttpClient> {
    fetcher: F,
    paginator: CursorPaginator,
    registry: Cow<'static, TableRegistry>,
}

impl FleetioConnector<HttpClient> {
    /// Build a connector that talks to the API described by `settings`
    pub fn from_configuration(
        configuration: &Configuration,
        settings: &ConnectorSettings,
    ) -> Result<Self> {
        let mut http = HttpClientConfig::builder()
            .base_url(&settings.base_url)
            .headers(compose_headers(configuration.entries()));
        if let Some(timeout) = settings.timeout {
            http = http.timeout(timeout);
        }
        let client = HttpClient::with_config(http.build())?;

        Ok(Self::new(client)
            .with_paginator(CursorPaginator::default().with_cursor_param(&settings.cursor_param)))
    }
}

impl<F: Fetcher> FleetioConnector<F> {
    /// Create a connector over the built-in tables
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher,
            paginator: CursorPaginator::default(),
            registry: Cow::Borrowed(TableRegistry::builtin()),
        }
    }

    /// Sync a different set of tables
    #[must_use]
    pub fn with_registry(mut self, registry: TableRegistry) -> Self {
        self.registry = Cow::Owned(registry);
        self
    }

    /// Use a different paginator
    #[must_use]
    pub fn with_paginator(mut self, paginator: CursorPaginator) -> Self {
        self.paginator = paginator;
        self
    }

    /// The tables this connector syncs
    pub fn registry(&self) -> &TableRegistry {
        &self.registry
    }

    /// The underlying fetcher
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }
}

impl<F: Fetcher> Connector for FleetioConnector<F> {
    fn schema(&self) -> Vec<TableSchema> {
        info!("Loading schema for tables");
        self.registry.schema()
    }

    fn update<'a>(&'a self, state: &State) -> UpsertStream<'a> {
        info!("Starting Fleetio data sync!");
        if !state.is_empty() {
            debug!(
                "Ignoring {} state entries, every run is a full sync",
                state.len()
            );
        }
        sync_registry(&self.fetcher, &self.paginator, &self.registry)
    }
}

impl<F: Fetcher> std::fmt::Debug for FleetioConnector<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FleetioConnector")
            .field("paginator", &self.paginator)
            .field("tables", &self.registry.names())
            .finish_non_exhaustive()
    }
}
