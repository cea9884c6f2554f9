//! Configuration for a connector run
//!
//! Two layers:
//!
//! - [`Configuration`] - the user-supplied `configuration.json`, a flat map of
//!   strings that is forwarded verbatim as request headers (API token,
//!   account token, ...)
//! - [`ConnectorSettings`] - where and how to talk to the API; defaults point
//!   at the production Fleetio API

use crate::error::{Error, Result};
use crate::http::DEFAULT_BASE_URL;
use crate::pagination::DEFAULT_CURSOR_PARAM;
use crate::types::JsonValue;
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;
use tracing::info;

/// Default configuration file looked up when none is given
pub const DEFAULT_CONFIG_FILE: &str = "configuration.json";

// ============================================================================
// Configuration
// ============================================================================

/// User configuration, every entry becomes a request header
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Configuration {
    entries: BTreeMap<String, String>,
}

impl Configuration {
    /// Create an empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON object of string values
    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: JsonValue = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    /// Convert a parsed JSON object, rejecting non-string values
    pub fn from_value(value: JsonValue) -> Result<Self> {
        let JsonValue::Object(object) = value else {
            return Err(Error::config("Configuration must be a JSON object"));
        };

        let mut entries = BTreeMap::new();
        for (key, value) in object {
            match value {
                JsonValue::String(s) => {
                    entries.insert(key, s);
                }
                other => {
                    return Err(Error::invalid_value(
                        key,
                        format!("expected a string, got {other}"),
                    ))
                }
            }
        }
        Ok(Self { entries })
    }

    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::config(format!("Failed to read config file: {e}")))?;
        Self::from_json_str(&content)
    }

    /// Load configuration from a file, or fall back to an empty one if it does not exist
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::from_file(path)
        } else {
            info!("Using empty configuration!");
            Ok(Self::new())
        }
    }

    /// Add an entry
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    /// Get an entry
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// All entries
    pub fn entries(&self) -> &BTreeMap<String, String> {
        &self.entries
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no entries are configured
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ============================================================================
// Connector Settings
// ============================================================================

/// API endpoint settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectorSettings {
    /// API base URL, table paths are appended to it
    pub base_url: String,
    /// Optional request timeout; unset leaves it to the HTTP transport
    pub timeout: Option<Duration>,
    /// Query parameter the pagination cursor is sent back in
    pub cursor_param: String,
}

impl Default for ConnectorSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
            cursor_param: DEFAULT_CURSOR_PARAM.to_string(),
        }
    }
}

impl ConnectorSettings {
    /// Create default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base URL
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set a request timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the cursor query parameter
    #[must_use]
    pub fn with_cursor_param(mut self, cursor_param: impl Into<String>) -> Self {
        self.cursor_param = cursor_param.into();
        self
    }
}
