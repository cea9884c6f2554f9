//! Cursor pagination
//!
//! Every page carries an opaque `next_cursor` token. A non-null token means
//! another page exists and is fetched by sending the token back as the only
//! query parameter; the first page's parameters (e.g. `per_page`) are not
//! repeated.

use super::types::{NextPage, Paginator};
use crate::types::JsonValue;

/// Response field holding the continuation token
pub const DEFAULT_CURSOR_FIELD: &str = "next_cursor";

/// Query parameter that carries the token back
pub const DEFAULT_CURSOR_PARAM: &str = "next_cursor";

/// Cursor-based pagination
#[derive(Debug, Clone)]
pub struct CursorPaginator {
    /// Query parameter name for the cursor
    pub cursor_param: String,
    /// Top-level response field the cursor is read from
    pub cursor_field: String,
}

impl Default for CursorPaginator {
    fn default() -> Self {
        Self::new(DEFAULT_CURSOR_PARAM, DEFAULT_CURSOR_FIELD)
    }
}

impl CursorPaginator {
    /// Create a new cursor paginator
    pub fn new(cursor_param: impl Into<String>, cursor_field: impl Into<String>) -> Self {
        Self {
            cursor_param: cursor_param.into(),
            cursor_field: cursor_field.into(),
        }
    }

    /// Use a different query parameter for the cursor
    #[must_use]
    pub fn with_cursor_param(mut self, cursor_param: impl Into<String>) -> Self {
        self.cursor_param = cursor_param.into();
        self
    }
}

impl Paginator for CursorPaginator {
    fn next_page(&self, response: &JsonValue) -> NextPage {
        // Anything other than a string or number counts as "no cursor"
        match response.get(&self.cursor_field) {
            Some(JsonValue::String(cursor)) => NextPage::with_param(&self.cursor_param, cursor),
            Some(JsonValue::Number(cursor)) => {
                NextPage::with_param(&self.cursor_param, cursor.to_string())
            }
            _ => NextPage::Done,
        }
    }
}
