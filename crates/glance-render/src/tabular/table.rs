//! Table assembly and rendering.
//!
//! A [`Table`] is built fresh for each render from rows and
//! [`TableOptions`]. Building selects fields, applies filters, stringifies
//! cells, and fits field widths; rendering turns the result into lines.
//!
//! The convenience functions at the bottom of this module also emit the
//! too-many-fields warning and record the rendered table in
//! [`state`](crate::state).
//!
//! # Example
//!
//! ```rust
//! use glance_render::tabular::{render_auto, TableOptions};
//! use serde_json::json;
//!
//! let rows = json!([{"a": 1, "b": 2}, {"a": 3, "b": 4}]);
//! let output = render_auto(&rows, &TableOptions::new().max_width(80));
//!
//! assert_eq!(output, "\
//! +---+---+
//! | a | b |
//! +---+---+
//! | 1 | 2 |
//! | 3 | 4 |
//! +---+---+
//! 2 rows in set");
//! ```

use std::io::Write;

use console::Term;
use indexmap::IndexSet;
use serde::Serialize;
use serde_json::Value;

use super::decorator::{format_cell, BorderStyle};
use super::lengths::FieldLengthCalculator;
use super::options::{HeaderMode, TableOptions, TableStyle};
use super::resize::Resizer;
use super::rows::rows_from_value;
use super::types::{stringify, Cells, Field, FieldLengths, Headers, Row, ValueKind};
use super::vertical::render_vertical;
use crate::error::TableError;
use crate::state;

/// The footer line for `count` rows.
///
/// ```rust
/// use glance_render::tabular::rows_in_set;
///
/// assert_eq!(rows_in_set(1), "1 row in set");
/// assert_eq!(rows_in_set(3), "3 rows in set");
/// ```
pub fn rows_in_set(count: usize) -> String {
    if count == 1 {
        "1 row in set".to_string()
    } else {
        format!("{} rows in set", count)
    }
}

/// What was rendered last: field order and fitted widths.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableSnapshot {
    pub fields: Vec<Field>,
    pub field_lengths: FieldLengths,
    /// Header labels, or `None` when the header row was hidden.
    pub headers: Option<Headers>,
    pub style: TableStyle,
    pub row_count: usize,
    /// Set when the table fell back to vertical layout.
    pub warning: Option<String>,
}

/// A table ready to render.
#[derive(Clone, Debug)]
pub struct Table {
    fields: Vec<Field>,
    rows: Vec<Cells>,
    headers: Option<Headers>,
    field_lengths: FieldLengths,
    style: TableStyle,
    description: bool,
    hide_empty: bool,
    warning: Option<String>,
}

impl Table {
    /// Builds a table from rows.
    pub fn new(rows: Vec<Row>, options: &TableOptions) -> Self {
        let rows = match &options.change_fields {
            Some(change) => rows
                .into_iter()
                .map(|row| {
                    row.into_iter()
                        .map(|(field, value)| (change.renamed(&field).unwrap_or(field), value))
                        .collect()
                })
                .collect(),
            None => rows,
        };

        let mut fields = select_fields(&rows, options);

        let rows: Vec<Row> = match options.grep_fields.as_deref() {
            Some(pattern) => rows
                .into_iter()
                .filter(|row| {
                    fields.iter().any(|field| {
                        row.get(field)
                            .is_some_and(|value| stringify(value).contains(pattern))
                    })
                })
                .collect(),
            None => rows,
        };

        let max_width = options.resolved_max_width();
        let mut style = options.resolved_style();
        let mut warning = None;
        if style.border().is_some() {
            let count = fields.len();
            if count > options.field_count_limit()
                || (options.resize_enabled() && count * 3 > max_width)
            {
                warning = Some(format!(
                    "Warning: {} fields are too many for a table {} columns wide; displaying vertically",
                    count, max_width
                ));
                style = TableStyle::Vertical;
            }
        }

        let escape = options.escape_enabled();
        let mut cells: Vec<Cells> = rows
            .iter()
            .map(|row| {
                fields
                    .iter()
                    .map(|field| {
                        let text = row
                            .get(field)
                            .map(|value| stringify(&apply_filters(field, value, options)))
                            .unwrap_or_default();
                        let text = if escape { escape_special_chars(&text) } else { text };
                        (field.clone(), text)
                    })
                    .collect()
            })
            .collect();

        if options.number_enabled() {
            fields.insert(0, Field::RowNumber);
            for (i, row) in cells.iter_mut().enumerate() {
                row.shift_insert(0, Field::RowNumber, (i + 1).to_string());
            }
        }

        let headers = build_headers(&fields, options);
        let natural = FieldLengthCalculator::compute_with_headers(&cells, &fields, headers.as_ref());
        let field_lengths = match style.border() {
            Some(_) => fit_lengths(&fields, natural, max_width, options),
            None => natural,
        };

        Table {
            fields,
            rows: cells,
            headers,
            field_lengths,
            style,
            description: options.description_enabled(style),
            hide_empty: options.hide_empty_enabled(),
            warning,
        }
    }

    /// Fields in display order, including the row-number field.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn field_lengths(&self) -> &FieldLengths {
        &self.field_lengths
    }

    pub fn style(&self) -> TableStyle {
        self.style
    }

    /// The vertical-fallback warning, if the field count forced one.
    pub fn warning(&self) -> Option<&str> {
        self.warning.as_deref()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn snapshot(&self) -> TableSnapshot {
        TableSnapshot {
            fields: self.fields.clone(),
            field_lengths: self.field_lengths.clone(),
            headers: self.headers.clone(),
            style: self.style,
            row_count: self.rows.len(),
            warning: self.warning.clone(),
        }
    }

    /// Renders the table. An empty table is exactly `"0 rows in set"`.
    pub fn render(&self) -> String {
        if self.rows.is_empty() {
            return rows_in_set(0);
        }

        let mut lines = match self.style {
            TableStyle::Vertical => {
                let labels = self.headers.clone().unwrap_or_else(|| {
                    self.fields
                        .iter()
                        .map(|field| (field.clone(), field.to_string()))
                        .collect()
                });
                render_vertical(&self.rows, &self.fields, &labels, self.hide_empty)
            }
            TableStyle::Tab => self.tab_lines(),
            other => match other.border() {
                Some(border) => self.grid_lines(border),
                None => Vec::new(),
            },
        };

        if self.description {
            lines.push(rows_in_set(self.rows.len()));
        }
        lines.join("\n")
    }

    fn grid_lines(&self, border: BorderStyle) -> Vec<String> {
        let widths: Vec<usize> = self
            .fields
            .iter()
            .map(|field| self.field_lengths.get(field).copied().unwrap_or(1))
            .collect();
        let fitted = |texts: Vec<&str>| -> Vec<String> {
            texts
                .into_iter()
                .zip(&widths)
                .map(|(text, &width)| format_cell(text, width))
                .collect()
        };

        let mut lines = Vec::with_capacity(self.rows.len() + 4);
        if border.has_outer_lines() {
            lines.push(border.top_line(&widths));
        }
        if let Some(headers) = &self.headers {
            let labels = self
                .fields
                .iter()
                .map(|field| headers.get(field).map(String::as_str).unwrap_or(""))
                .collect();
            lines.push(border.row_line(&fitted(labels)));
            lines.push(border.middle_line(&widths));
        }
        for row in &self.rows {
            let texts = self
                .fields
                .iter()
                .map(|field| row.get(field).map(String::as_str).unwrap_or(""))
                .collect();
            lines.push(border.row_line(&fitted(texts)));
        }
        if border.has_outer_lines() {
            lines.push(border.bottom_line(&widths));
        }
        lines
    }

    fn tab_lines(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.rows.len() + 1);
        if let Some(headers) = &self.headers {
            lines.push(
                self.fields
                    .iter()
                    .map(|field| headers.get(field).map(String::as_str).unwrap_or(""))
                    .collect::<Vec<_>>()
                    .join("\t"),
            );
        }
        for row in &self.rows {
            lines.push(
                self.fields
                    .iter()
                    .map(|field| row.get(field).map(String::as_str).unwrap_or(""))
                    .collect::<Vec<_>>()
                    .join("\t"),
            );
        }
        lines
    }
}

fn select_fields(rows: &[Row], options: &TableOptions) -> Vec<Field> {
    if let Some(fields) = &options.fields {
        return fields.clone();
    }
    if options.all_fields_enabled() {
        let union: IndexSet<Field> = rows.iter().flat_map(|row| row.keys().cloned()).collect();
        return union.into_iter().collect();
    }
    rows.first()
        .map(|row| row.keys().cloned().collect())
        .unwrap_or_default()
}

fn apply_filters(field: &Field, value: &Value, options: &TableOptions) -> Value {
    let filter = options
        .filters
        .get(field)
        .or_else(|| options.filter_classes.get(&ValueKind::of(value)))
        .or(options.filter_any.as_ref());
    match filter {
        Some(filter) => filter(value),
        None => value.clone(),
    }
}

fn escape_special_chars(text: &str) -> String {
    if !text.contains(['\t', '\r', '\n']) {
        return text.to_string();
    }
    text.replace('\t', "\\t")
        .replace('\r', "\\r")
        .replace('\n', "\\n")
}

fn build_headers(fields: &[Field], options: &TableOptions) -> Option<Headers> {
    let overrides = match options.headers.as_ref() {
        Some(HeaderMode::Hidden) => return None,
        Some(HeaderMode::Labels(labels)) => Some(labels),
        None => None,
    };
    let headers = fields
        .iter()
        .map(|field| {
            let label = overrides
                .and_then(|labels| labels.get(field).cloned())
                .unwrap_or_else(|| field.to_string());
            let label = match &options.header_filter {
                Some(filter) => filter(&label),
                None => label,
            };
            (field.clone(), label)
        })
        .collect();
    Some(headers)
}

// The row-number column keeps its natural width; other fields share the rest.
fn fit_lengths(
    fields: &[Field],
    natural: FieldLengths,
    max_width: usize,
    options: &TableOptions,
) -> FieldLengths {
    let number_width = natural.get(&Field::RowNumber).copied();
    let budget = max_width
        .saturating_sub(BorderStyle::decoration_width(fields.len()))
        .saturating_sub(number_width.unwrap_or(0));
    let others: FieldLengths = natural
        .into_iter()
        .filter(|(field, _)| *field != Field::RowNumber)
        .collect();

    let resizer = Resizer::new(others, budget).caps(&options.max_fields);
    let mut fitted = if options.resize_enabled() {
        resizer.resize()
    } else {
        resizer.constrain()
    };
    if let Some(width) = number_width {
        fitted.shift_insert(0, Field::RowNumber, width);
    }
    fitted
}

fn write_warning(out: &mut impl Write, warning: &str) {
    if let Err(err) = writeln!(out, "{}", warning) {
        tracing::debug!(error = %err, "could not write fallback warning");
    }
}

/// Renders rows, reporting any vertical fallback and recording the result
/// as the last table.
pub fn render_rows(rows: Vec<Row>, options: &TableOptions) -> String {
    let table = Table::new(rows, options);
    if let Some(warning) = table.warning() {
        tracing::warn!(fields = table.fields().len(), "{}", warning);
        write_warning(&mut Term::stderr(), warning);
    }
    let output = table.render();
    state::record_last_table(table.snapshot());
    output
}

/// Renders any JSON value as a table.
///
/// Arrays of objects or arrays become one row per element, arrays of
/// scalars and lone scalars become a single `value` field, and a lone object
/// becomes a one-row table.
pub fn render_auto(value: &Value, options: &TableOptions) -> String {
    render_rows(rows_from_value(value), options)
}

/// Serializes `rows` and renders them with [`render_auto`].
pub fn render_table<T: Serialize + ?Sized>(
    rows: &T,
    options: &TableOptions,
) -> Result<String, TableError> {
    let value = serde_json::to_value(rows)?;
    Ok(render_auto(&value, options))
}

/// Renders serializable objects, reading only the fields named in options.
///
/// Objects carry no inherent field order, so `fields` is required.
///
/// ```rust
/// use glance_render::tabular::{render_objects, TableOptions};
/// use glance_render::TableError;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Entry { name: &'static str, size: u64, hidden: bool }
///
/// let entries = [Entry { name: "a.txt", size: 12, hidden: false }];
/// let options = TableOptions::new().fields(["name", "size"]).max_width(80);
/// let output = render_objects(&entries, &options).unwrap();
/// assert!(output.contains("| a.txt | 12   |"));
///
/// let missing = render_objects(&entries, &TableOptions::new());
/// assert!(matches!(missing, Err(TableError::MissingFields)));
/// ```
pub fn render_objects<T: Serialize>(
    items: &[T],
    options: &TableOptions,
) -> Result<String, TableError> {
    let fields = options.fields.as_ref().ok_or(TableError::MissingFields)?;
    let rows = items
        .iter()
        .map(|item| -> Result<Row, TableError> {
            let value = serde_json::to_value(item)?;
            Ok(fields
                .iter()
                .map(|field| {
                    let cell = match (field, &value) {
                        (Field::Name(name), Value::Object(map)) => map.get(name).cloned(),
                        (Field::Index(i), Value::Array(values)) => values.get(*i).cloned(),
                        _ => None,
                    };
                    (field.clone(), cell.unwrap_or(Value::Null))
                })
                .collect())
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(render_rows(rows, options))
}
