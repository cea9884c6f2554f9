//! HTTP module
//!
//! Fetches pages from the upstream API.
//!
//! # Features
//!
//! - **Single-shot GET**: one request per page, no retries or backoff
//! - **Fixed headers**: configuration entries plus the Fleetio client headers
//! - **Typed failures**: transport, status and decode errors stay inspectable

mod client;
mod fetcher;
mod headers;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, DEFAULT_BASE_URL};
pub use fetcher::Fetcher;
pub use headers::{compose_headers, API_VERSION, FIXED_HEADERS};
