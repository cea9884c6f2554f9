//! Output module
//!
//! Stands in for the destination harness in local runs by writing each
//! upsert as one JSON line.
//!
//! # Overview
//!
//! - [`UpsertMessage`] - the line format, an upsert plus its emit time
//! - [`JsonlWriter`] - writes messages to stdout, a file, or any `Write`

mod writer;

pub use writer::{JsonlWriter, OutputFormat, UpsertMessage};
