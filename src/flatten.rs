//! Record flattening
//!
//! Turns a nested API record into a single-level [`FlatRecord`]:
//!
//! - nested objects are walked recursively and their keys joined with `.`
//! - arrays are never expanded; they are stored as a JSON string rendered with
//!   `", "` / `": "` separators, e.g. `[1, 2, 3]`
//! - an empty nested object is stored as the string `"{}"`
//! - scalars are kept as they are
//!
//! ```rust
//! use fleetio_connector::flatten::flatten;
//! use serde_json::json;
//!
//! let record = json!({"id": 1, "meter": {"value": 10}, "labels": ["a"]});
//! let flat = flatten(record.as_object().unwrap());
//! assert_eq!(flat["meter.value"], json!(10));
//! assert_eq!(flat["labels"], json!("[\"a\"]"));
//! ```

use crate::types::{FlatRecord, JsonObject, JsonValue};
use serde::Serialize;
use serde_json::ser::Formatter;
use std::io;

/// Separator between path segments
pub const SEPARATOR: &str = ".";

/// Flatten a record into dotted-path keys
pub fn flatten(record: &JsonObject) -> FlatRecord {
    let mut out = FlatRecord::new();
    flatten_into(&mut out, None, record);
    out
}

fn flatten_into(out: &mut FlatRecord, prefix: Option<&str>, object: &JsonObject) {
    for (key, value) in object {
        let path = match prefix {
            Some(p) => format!("{p}{SEPARATOR}{key}"),
            None => key.clone(),
        };

        match value {
            JsonValue::Object(nested) if nested.is_empty() => {
                out.insert(path, JsonValue::String("{}".to_string()));
            }
            JsonValue::Object(nested) => flatten_into(out, Some(&path), nested),
            JsonValue::Array(_) => {
                out.insert(path, JsonValue::String(to_json_string(value)));
            }
            scalar => {
                out.insert(path, scalar.clone());
            }
        }
    }
}

/// Serialize a value with `", "` and `": "` separators
pub fn to_json_string(value: &JsonValue) -> String {
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, SpacedFormatter);
    // Writing a Value into a Vec cannot fail
    if value.serialize(&mut ser).is_err() {
        return value.to_string();
    }
    String::from_utf8(buf).unwrap_or_else(|_| value.to_string())
}

/// Single-line formatter with a space after every `,` and `:`
#[derive(Debug, Clone, Copy, Default)]
struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }
}
