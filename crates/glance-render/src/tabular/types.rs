//! Core data types for table rendering: fields, rows, and value kinds.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// A column key used to look up a value within a row.
///
/// Rows built from objects use [`Field::Name`]; rows built from arrays use
/// [`Field::Index`]. [`Field::RowNumber`] is the synthetic leading column
/// added by the `number` option and never appears in input data.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Field {
    /// Positional key for array-shaped rows.
    Index(usize),
    /// Named key for object-shaped rows.
    Name(String),
    /// The synthetic row-number column.
    #[serde(skip)]
    RowNumber,
}

impl Field {
    /// Creates a named field.
    pub fn name(name: impl Into<String>) -> Self {
        Field::Name(name.into())
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Index(i) => write!(f, "{}", i),
            Field::Name(name) => f.write_str(name),
            Field::RowNumber => f.write_str("number"),
        }
    }
}

impl From<&str> for Field {
    fn from(name: &str) -> Self {
        Field::Name(name.to_string())
    }
}

impl From<String> for Field {
    fn from(name: String) -> Self {
        Field::Name(name)
    }
}

impl From<usize> for Field {
    fn from(index: usize) -> Self {
        Field::Index(index)
    }
}

/// A row of raw values keyed by field, in insertion order.
pub type Row = IndexMap<Field, Value>;

/// A row of stringified cells keyed by field.
pub type Cells = IndexMap<Field, String>;

/// Display width per field. Every field of a table has an entry.
pub type FieldLengths = IndexMap<Field, usize>;

/// Header label per field.
pub type Headers = IndexMap<Field, String>;

/// The runtime kind of a value, used to pick per-kind filters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
}

impl ValueKind {
    /// Classifies a JSON value.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Bool,
            Value::Number(_) => ValueKind::Number,
            Value::String(_) => ValueKind::String,
            Value::Array(_) => ValueKind::Array,
            Value::Object(_) => ValueKind::Object,
        }
    }

    /// The lowercase name of this kind (`"null"`, `"array"`, ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueKind::Null => "null",
            ValueKind::Bool => "bool",
            ValueKind::Number => "number",
            ValueKind::String => "string",
            ValueKind::Array => "array",
            ValueKind::Object => "object",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Converts a value to the text shown in a cell.
///
/// Strings are used verbatim, `null` becomes an empty string, and arrays or
/// objects are shown as compact JSON.
///
/// ```rust
/// use glance_render::tabular::stringify;
/// use serde_json::json;
///
/// assert_eq!(stringify(&json!("plain")), "plain");
/// assert_eq!(stringify(&json!(null)), "");
/// assert_eq!(stringify(&json!([1, 2])), "[1,2]");
/// ```
pub fn stringify(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}
