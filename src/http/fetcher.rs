//! Page fetching seam
//!
//! The sync engine only needs "GET this path with these params and give me
//! JSON back". [`HttpClient`](super::HttpClient) implements it against the
//! real API; tests substitute scripted responses.

use crate::error::Result;
use crate::types::{JsonValue, StringMap};
use async_trait::async_trait;

/// Fetches one page of an endpoint
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// GET `path` with the given query params and return the parsed body
    async fn fetch(&self, path: &str, params: &StringMap) -> Result<JsonValue>;
}
