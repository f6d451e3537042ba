//! Normalizing arbitrary values into rows.

use serde_json::Value;

use super::types::{Field, Row};

/// Field used for rows built from scalars.
pub const VALUE_FIELD: &str = "value";

/// Converts a value into table rows.
///
/// - an array yields one row per element: objects are keyed by name,
///   arrays by index, and scalars become a single `value` field;
/// - a lone object is a single row;
/// - `null` is no rows;
/// - any other scalar is a single `value` row.
///
/// ```rust
/// use glance_render::tabular::{rows_from_value, Field};
/// use serde_json::json;
///
/// let rows = rows_from_value(&json!([[1, 2], [3, 4]]));
/// assert_eq!(rows.len(), 2);
/// assert_eq!(rows[1][&Field::Index(1)], json!(4));
/// ```
pub fn rows_from_value(value: &Value) -> Vec<Row> {
    match value {
        Value::Null => Vec::new(),
        Value::Array(items) => items.iter().map(row_from_item).collect(),
        other => vec![row_from_item(other)],
    }
}

fn row_from_item(item: &Value) -> Row {
    match item {
        Value::Object(map) => map
            .iter()
            .map(|(key, value)| (Field::name(key.as_str()), value.clone()))
            .collect(),
        Value::Array(values) => values
            .iter()
            .enumerate()
            .map(|(i, value)| (Field::Index(i), value.clone()))
            .collect(),
        scalar => {
            let mut row = Row::new();
            row.insert(Field::name(VALUE_FIELD), scalar.clone());
            row
        }
    }
}
