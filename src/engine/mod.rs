//! Execution engine module
//!
//! Per-table sync loop and the registry-wide chain built from it.
//!
//! # Overview
//!
//! - [`TableSync`] - fetch, flatten and paginate one table as a lazy stream
//! - [`sync_registry`] - every table of a registry, one after the other
//! - [`SyncStats`] - counters a consumer can keep while draining a stream
//!
//! Nothing is prefetched: the next page is only requested once the consumer
//! has pulled every upsert of the current one, and dropping the stream stops
//! the sync.

mod types;

pub use types::SyncStats;

use crate::flatten::flatten;
use crate::http::Fetcher;
use crate::pagination::{Paginator, SyncState};
use crate::registry::{TableDefinition, TableRegistry};
use crate::types::{JsonValue, UpsertOp};
use futures::stream::{self, Stream, StreamExt};
use std::pin::Pin;
use tracing::{error, info, warn};

/// Response field holding the page's records
pub const RECORDS_FIELD: &str = "records";

/// Lazy stream of upserts
pub type UpsertStream<'a> = Pin<Box<dyn Stream<Item = UpsertOp> + Send + 'a>>;

/// Syncs a single table
#[derive(Clone, Copy)]
pub struct TableSync<'a> {
    fetcher: &'a dyn Fetcher,
    paginator: &'a dyn Paginator,
    table: &'a TableDefinition,
}

enum Phase {
    Fetching(SyncState),
    Emitting {
        records: std::vec::IntoIter<JsonValue>,
        state: SyncState,
    },
}

struct Driver<'a> {
    sync: TableSync<'a>,
    phase: Phase,
    emitted: usize,
}

impl<'a> TableSync<'a> {
    /// Create a sync for one table
    pub fn new(
        fetcher: &'a dyn Fetcher,
        paginator: &'a dyn Paginator,
        table: &'a TableDefinition,
    ) -> Self {
        Self {
            fetcher,
            paginator,
            table,
        }
    }

    /// Turn the sync into a stream of upserts
    ///
    /// The stream ends when the API reports no further cursor, when a page
    /// comes back empty, or when a fetch fails. A failed fetch is logged and
    /// never retried; it only ends this table.
    pub fn into_stream(self) -> UpsertStream<'a> {
        let driver = Driver {
            sync: self,
            phase: Phase::Fetching(SyncState::new(self.table.request.query_params())),
            emitted: 0,
        };

        Box::pin(stream::unfold(driver, |driver| driver.step()))
    }
}

impl<'a> Driver<'a> {
    async fn step(mut self) -> Option<(UpsertOp, Self)> {
        let table = self.sync.table;
        let path = table.request.path.as_str();

        loop {
            match self.phase {
                Phase::Fetching(mut state) => {
                    if !state.has_more {
                        info!(
                            "Completed sync for {}: {} records in {} pages",
                            table.name, self.emitted, state.pages
                        );
                        return None;
                    }

                    let mut response = match self.sync.fetcher.fetch(path, &state.params).await {
                        Ok(response) => response,
                        Err(e) => {
                            error!(
                                table = %table.name,
                                transport = e.is_transport(),
                                "API call failed: {e}"
                            );
                            return None;
                        }
                    };

                    let records = take_records(&mut response);
                    if records.is_empty() {
                        info!(
                            "Completed sync for {}: {} records in {} pages",
                            table.name, self.emitted, state.pages
                        );
                        return None;
                    }

                    info!("Processing data for {path}");
                    state.advance(self.sync.paginator.next_page(&response));
                    self.phase = Phase::Emitting {
                        records: records.into_iter(),
                        state,
                    };
                }
                Phase::Emitting { mut records, state } => match records.next() {
                    Some(JsonValue::Object(record)) => {
                        let op = UpsertOp::new(table.name.clone(), flatten(&record));
                        self.emitted += 1;
                        self.phase = Phase::Emitting { records, state };
                        return Some((op, self));
                    }
                    Some(other) => {
                        warn!(table = %table.name, "Skipping record that is not an object: {other}");
                        self.phase = Phase::Emitting { records, state };
                    }
                    None => self.phase = Phase::Fetching(state),
                },
            }
        }
    }
}

/// Take the records array out of a page; anything else is an empty page
fn take_records(response: &mut JsonValue) -> Vec<JsonValue> {
    match response.get_mut(RECORDS_FIELD).map(JsonValue::take) {
        Some(JsonValue::Array(records)) => records,
        _ => Vec::new(),
    }
}

/// Sync one table
pub fn sync_table<'a>(
    fetcher: &'a dyn Fetcher,
    paginator: &'a dyn Paginator,
    table: &'a TableDefinition,
) -> UpsertStream<'a> {
    TableSync::new(fetcher, paginator, table).into_stream()
}

/// Sync every table of a registry in registry order
///
/// Each table's stream is drained completely before the next table's first
/// request is made.
pub fn sync_registry<'a>(
    fetcher: &'a dyn Fetcher,
    paginator: &'a dyn Paginator,
    registry: &'a TableRegistry,
) -> UpsertStream<'a> {
    Box::pin(stream::iter(registry.tables()).flat_map(move |table| {
        info!("Starting sync for {}", table.name);
        sync_table(fetcher, paginator, table)
    }))
}
