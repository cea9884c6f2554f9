//! JSON lines writer

use crate::error::{Error, Result};
use crate::types::{FlatRecord, UpsertOp};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// One JSON message per line
    #[default]
    Json,
    /// Indented JSON, for reading by eye
    Pretty,
}

/// A single upsert as written to the output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpsertMessage {
    /// Always `UPSERT`
    #[serde(rename = "type")]
    pub kind: String,
    /// Destination table
    pub table: String,
    /// Flattened record
    pub data: FlatRecord,
    /// When the upsert was produced
    pub emitted_at: DateTime<Utc>,
}

impl UpsertMessage {
    /// Wrap an upsert, stamping it with the current time
    pub fn new(op: UpsertOp) -> Self {
        Self {
            kind: "UPSERT".to_string(),
            table: op.table,
            data: op.data,
            emitted_at: Utc::now(),
        }
    }
}

/// Writes upserts as JSON messages
pub struct JsonlWriter<W: Write> {
    inner: W,
    format: OutputFormat,
    written: usize,
}

impl JsonlWriter<BufWriter<File>> {
    /// Create (or truncate) a file to write to
    pub fn create<P: AsRef<Path>>(path: P, format: OutputFormat) -> Result<Self> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| {
            Error::output(format!("Failed to create {}: {e}", path.display()))
        })?;
        Ok(Self::new(BufWriter::new(file), format))
    }
}

impl JsonlWriter<io::Stdout> {
    /// Write to standard output
    pub fn stdout(format: OutputFormat) -> Self {
        Self::new(io::stdout(), format)
    }
}

impl<W: Write> JsonlWriter<W> {
    /// Wrap any writer
    pub fn new(inner: W, format: OutputFormat) -> Self {
        Self {
            inner,
            format,
            written: 0,
        }
    }

    /// Write one upsert
    pub fn write_upsert(&mut self, op: UpsertOp) -> Result<()> {
        self.write_message(&UpsertMessage::new(op))
    }

    /// Write one message
    pub fn write_message(&mut self, message: &UpsertMessage) -> Result<()> {
        match self.format {
            OutputFormat::Json => serde_json::to_writer(&mut self.inner, message)?,
            OutputFormat::Pretty => serde_json::to_writer_pretty(&mut self.inner, message)?,
        }
        self.inner.write_all(b"\n")?;
        self.written += 1;
        Ok(())
    }

    /// Number of messages written so far
    pub fn written(&self) -> usize {
        self.written
    }

    /// Flush and hand back the underlying writer
    pub fn finish(mut self) -> Result<W> {
        self.inner.flush()?;
        Ok(self.inner)
    }
}

impl<W: Write> std::fmt::Debug for JsonlWriter<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonlWriter")
            .field("format", &self.format)
            .field("written", &self.written)
            .finish_non_exhaustive()
    }
}
