//! Table definition types
//!
//! A [`TableDefinition`] carries both the destination contract (name, primary
//! key, typed columns) and the request that fills it. Only the former is
//! exposed through [`TableSchema`].

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::path::Path;

/// Destination column type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ColumnType {
    /// True or false
    Boolean,
    /// 16-bit integer
    Short,
    /// 32-bit integer
    Int,
    /// 64-bit integer
    Long,
    /// Fixed-point decimal
    Decimal,
    /// 32-bit float
    Float,
    /// 64-bit float
    Double,
    /// Date without a time zone
    NaiveDate,
    /// Date and time without a time zone
    NaiveDatetime,
    /// Date and time in UTC
    UtcDatetime,
    /// Raw bytes
    Binary,
    /// XML document
    Xml,
    /// Text
    String,
    /// JSON document, stored as text
    Json,
}

/// Scalar query parameter value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Bool(b) => write!(f, "{b}"),
            ParamValue::Integer(i) => write!(f, "{i}"),
            ParamValue::Float(x) => write!(f, "{x}"),
            ParamValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// Where and how to fetch a table's records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestInfo {
    /// Path relative to the API base URL (e.g. `/v1/vehicles`)
    pub path: String,
    /// Query parameters for the first page
    #[serde(default)]
    pub params: BTreeMap<String, ParamValue>,
}

impl RequestInfo {
    /// Render the parameters as query string pairs
    pub fn query_params(&self) -> crate::types::StringMap {
        self.params
            .iter()
            .map(|(k, v)| (k.clone(), v.to_string()))
            .collect()
    }
}

/// A single destination table and the endpoint that fills it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableDefinition {
    /// Table name, unique in the registry
    #[serde(alias = "table")]
    pub name: String,

    /// Composite primary key, order significant
    pub primary_key: Vec<String>,

    /// Columns with an explicitly declared type
    #[serde(default)]
    pub columns: BTreeMap<String, ColumnType>,

    /// Request used to pull records
    #[serde(alias = "request_info")]
    pub request: RequestInfo,
}

impl TableDefinition {
    /// Create a table keyed by `id` with the default page size
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        let mut params = BTreeMap::new();
        params.insert("per_page".to_string(), ParamValue::Integer(100));
        Self {
            name: name.into(),
            primary_key: vec!["id".to_string()],
            columns: BTreeMap::new(),
            request: RequestInfo {
                path: path.into(),
                params,
            },
        }
    }

    /// Declare a column as JSON typed
    #[must_use]
    pub fn json_column(self, column: impl Into<String>) -> Self {
        self.column(column, ColumnType::Json)
    }

    /// Declare a typed column
    #[must_use]
    pub fn column(mut self, column: impl Into<String>, column_type: ColumnType) -> Self {
        self.columns.insert(column.into(), column_type);
        self
    }

    /// Replace the primary key
    #[must_use]
    pub fn with_primary_key<I, S>(mut self, key: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.primary_key = key.into_iter().map(Into::into).collect();
        self
    }

    /// Set a request parameter
    #[must_use]
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.request.params.insert(key.into(), value.into());
        self
    }

    /// Project to the schema exposed to the destination
    pub fn schema(&self) -> TableSchema {
        TableSchema {
            table: self.name.clone(),
            primary_key: self.primary_key.clone(),
            columns: self.columns.clone(),
        }
    }
}

/// Schema declaration for one table, as provisioned by the destination
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSchema {
    /// Table name
    pub table: String,
    /// Composite primary key
    pub primary_key: Vec<String>,
    /// Explicitly typed columns
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub columns: BTreeMap<String, ColumnType>,
}

/// Ordered, validated list of table definitions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableRegistry {
    tables: Vec<TableDefinition>,
}

impl TableRegistry {
    /// Build a registry, checking its invariants
    pub fn new(tables: Vec<TableDefinition>) -> Result<Self> {
        let registry = Self { tables };
        registry.validate()?;
        Ok(registry)
    }

    /// Wrap tables known to be valid (the built-in list, covered by tests)
    pub(super) fn from_trusted(tables: Vec<TableDefinition>) -> Self {
        Self { tables }
    }

    /// Load a registry from a YAML string (`tables: [...]`)
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let registry: Self = serde_yaml::from_str(yaml)?;
        registry.validate()?;
        Ok(registry)
    }

    /// Load a registry from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.display().to_string(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Check that names are unique, primary keys non-empty, and paths set
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for table in &self.tables {
            if table.name.is_empty() {
                return Err(Error::registry("table name must not be empty"));
            }
            if !seen.insert(table.name.as_str()) {
                return Err(Error::registry(format!(
                    "duplicate table name '{}'",
                    table.name
                )));
            }
            if table.primary_key.is_empty() || table.primary_key.iter().any(String::is_empty) {
                return Err(Error::registry(format!(
                    "table '{}' needs a non-empty primary key",
                    table.name
                )));
            }
            if table.request.path.is_empty() {
                return Err(Error::registry(format!(
                    "table '{}' has no request path",
                    table.name
                )));
            }
        }
        Ok(())
    }

    /// Tables in registry order
    pub fn tables(&self) -> &[TableDefinition] {
        &self.tables
    }

    /// Find a table by name
    pub fn get(&self, name: &str) -> Option<&TableDefinition> {
        self.tables.iter().find(|t| t.name == name)
    }

    /// Table names in registry order
    pub fn names(&self) -> Vec<&str> {
        self.tables.iter().map(|t| t.name.as_str()).collect()
    }

    /// Number of tables
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Whether the registry has no tables
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Schema declaration for every table, in registry order
    pub fn schema(&self) -> Vec<TableSchema> {
        self.tables.iter().map(TableDefinition::schema).collect()
    }

    /// Keep only the named tables, preserving registry order
    pub fn select<S: AsRef<str>>(&self, names: &[S]) -> Result<Self> {
        if let Some(unknown) = names
            .iter()
            .map(AsRef::as_ref)
            .find(|name| self.get(name).is_none())
        {
            return Err(Error::config(format!("Unknown table: {unknown}")));
        }

        let tables = self
            .tables
            .iter()
            .filter(|t| names.iter().any(|n| n.as_ref() == t.name))
            .cloned()
            .collect();
        Ok(Self { tables })
    }
}
