//! Pagination types and traits

use crate::types::{JsonValue, StringMap};

/// Result of the next page computation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextPage {
    /// More pages available, fetched with exactly these parameters
    Continue {
        /// Query parameters for the next request (replace the previous ones)
        query_params: StringMap,
    },
    /// No more pages
    Done,
}

impl NextPage {
    /// Create a continuation with a single parameter
    pub fn with_param(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut params = StringMap::new();
        params.insert(key.into(), value.into());
        Self::Continue {
            query_params: params,
        }
    }

    /// Check if this is a done result
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Split into `(has_more, next_params)`
    pub fn into_parts(self) -> (bool, StringMap) {
        match self {
            Self::Continue { query_params } => (true, query_params),
            Self::Done => (false, StringMap::new()),
        }
    }
}

/// Core trait for pagination strategies
pub trait Paginator: Send + Sync {
    /// Inspect a response and determine if there's a next page
    fn next_page(&self, response: &JsonValue) -> NextPage;
}

/// Per-table pagination progress
///
/// Lives only for the duration of one table's sync.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncState {
    /// Parameters for the next request
    pub params: StringMap,
    /// Whether another request should be made
    pub has_more: bool,
    /// Pages fetched so far
    pub pages: usize,
}

impl SyncState {
    /// Start a sync with the table's declared parameters
    pub fn new(initial_params: StringMap) -> Self {
        Self {
            params: initial_params,
            has_more: true,
            pages: 0,
        }
    }

    /// Record a fetched page and move to whatever the paginator decided
    pub fn advance(&mut self, next: NextPage) {
        self.pages += 1;
        let (has_more, params) = next.into_parts();
        self.has_more = has_more;
        self.params = params;
    }

    /// Stop without another request
    pub fn finish(&mut self) {
        self.has_more = false;
        self.params.clear();
    }
}
