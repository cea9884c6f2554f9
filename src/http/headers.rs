//! Request header composition
//!
//! Every configuration entry becomes a header as-is (typically the
//! `Authorization` and `Account-Token` credentials). The fixed Fleetio
//! headers are applied last and win on collision, compared
//! case-insensitively as HTTP header names are.

use std::collections::{BTreeMap, HashMap};

/// Fleetio API version the connector is written against
pub const API_VERSION: &str = "2024-03-15";

/// Headers sent with every request regardless of configuration
pub const FIXED_HEADERS: [(&str, &str); 4] = [
    ("Accept", "application/json"),
    ("X-Api-Version", API_VERSION),
    ("X-Client-Name", "data_connector"),
    ("X-Client-Platform", "fleetio_fivetran"),
];

/// Merge configuration entries with the fixed headers
pub fn compose_headers(configuration: &BTreeMap<String, String>) -> HashMap<String, String> {
    let mut headers: HashMap<String, String> = configuration
        .iter()
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();

    for (key, value) in FIXED_HEADERS {
        headers.retain(|k, _| !k.eq_ignore_ascii_case(key));
        headers.insert(key.to_string(), value.to_string());
    }

    headers
}
