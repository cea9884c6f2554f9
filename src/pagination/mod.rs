//! Pagination module
//!
//! Cursor pagination over the `next_cursor` token returned with each page.
//!
//! # Overview
//!
//! A [`Paginator`] looks at one response and decides whether another page
//! exists and which query parameters fetch it. [`SyncState`] holds the
//! parameters for the next request while a single table is being synced.

mod cursor;
mod types;

pub use cursor::{CursorPaginator, DEFAULT_CURSOR_FIELD, DEFAULT_CURSOR_PARAM};
pub use types::{NextPage, Paginator, SyncState};

#[cfg(test)]
mod tests;
