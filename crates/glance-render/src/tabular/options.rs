//! Rendering options for tables.
//!
//! [`TableOptions`] is an immutable value passed to each render call. Every
//! knob is optional so that option sets coming from different configuration
//! layers can be merged with [`TableOptions::with_defaults_from`]: whatever
//! the more specific layer sets wins, and unset knobs fall through.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

use super::decorator::BorderStyle;
use super::types::{Field, ValueKind};
use crate::state::default_width;

/// Transforms a raw value before it is stringified into a cell.
pub type ValueFilter = Arc<dyn Fn(&Value) -> Value + Send + Sync>;

/// Transforms a header label.
pub type HeaderFilter = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Default number of fields above which a grid falls back to a vertical table.
pub const DEFAULT_MAX_FIELD_COUNT: usize = 20;

/// Table layout variant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableStyle {
    /// `+-|` borders.
    #[default]
    Ascii,
    /// Light box-drawing borders.
    Unicode,
    /// Heavy box-drawing borders.
    Heavy,
    /// Double-line box-drawing borders.
    Double,
    /// Light borders with rounded corners.
    Rounded,
    /// A GitHub-flavored Markdown table.
    Markdown,
    /// Tab-separated lines without padding or borders.
    Tab,
    /// One labeled block per row.
    Vertical,
}

impl TableStyle {
    /// The border glyph set for grid styles, or `None` for tab and vertical.
    pub fn border(&self) -> Option<BorderStyle> {
        match self {
            TableStyle::Ascii => Some(BorderStyle::Ascii),
            TableStyle::Unicode => Some(BorderStyle::Unicode),
            TableStyle::Heavy => Some(BorderStyle::Heavy),
            TableStyle::Double => Some(BorderStyle::Double),
            TableStyle::Rounded => Some(BorderStyle::Rounded),
            TableStyle::Markdown => Some(BorderStyle::Markdown),
            TableStyle::Tab | TableStyle::Vertical => None,
        }
    }

    /// Whether the "N rows in set" footer is shown when not configured.
    pub fn default_description(&self) -> bool {
        !matches!(self, TableStyle::Markdown | TableStyle::Tab)
    }
}

/// Upper bound on a field's width.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FieldCap {
    /// An absolute width.
    Width(usize),
    /// A fraction of the width budget, between 0 and 1.
    Fraction(f64),
}

impl FieldCap {
    /// Builds a cap from a number: values below 1 are fractions of the budget.
    pub fn from_number(value: f64) -> Self {
        if value > 0.0 && value < 1.0 {
            FieldCap::Fraction(value)
        } else {
            FieldCap::Width(value.max(1.0) as usize)
        }
    }

    /// Resolves the cap to a width for the given budget. Never below 1.
    pub fn resolve(&self, budget: usize) -> usize {
        match self {
            FieldCap::Width(width) => (*width).max(1),
            FieldCap::Fraction(fraction) => ((budget as f64 * fraction) as usize).max(1),
        }
    }
}

/// Header row configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HeaderMode {
    /// Show headers; listed fields use the given labels, others their own name.
    Labels(IndexMap<Field, String>),
    /// Suppress the header row.
    Hidden,
}

impl Default for HeaderMode {
    fn default() -> Self {
        HeaderMode::Labels(IndexMap::new())
    }
}

/// Renames applied to row keys before fields are detected.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChangeFields {
    /// Old field to new field.
    Map(IndexMap<Field, Field>),
    /// New names for index fields, in index order.
    Names(Vec<String>),
}

impl ChangeFields {
    /// The new key for `field`, if it is renamed.
    pub fn renamed(&self, field: &Field) -> Option<Field> {
        match self {
            ChangeFields::Map(map) => map.get(field).cloned(),
            ChangeFields::Names(names) => match field {
                Field::Index(i) => names.get(*i).map(|name| Field::Name(name.clone())),
                _ => None,
            },
        }
    }
}

/// Options recognized by the table renderer.
///
/// # Example
///
/// ```rust
/// use glance_render::tabular::{TableOptions, TableStyle};
///
/// let options = TableOptions::new()
///     .fields(["name", "size"])
///     .max_width(80)
///     .number(true)
///     .style(TableStyle::Unicode);
///
/// assert_eq!(options.resolved_style(), TableStyle::Unicode);
/// ```
#[derive(Clone, Default)]
pub struct TableOptions {
    pub fields: Option<Vec<Field>>,
    pub headers: Option<HeaderMode>,
    pub max_fields: IndexMap<Field, FieldCap>,
    pub max_width: Option<usize>,
    pub resize: Option<bool>,
    pub number: Option<bool>,
    pub change_fields: Option<ChangeFields>,
    pub filters: IndexMap<Field, ValueFilter>,
    pub header_filter: Option<HeaderFilter>,
    pub filter_any: Option<ValueFilter>,
    pub filter_classes: IndexMap<ValueKind, ValueFilter>,
    pub vertical: Option<bool>,
    pub all_fields: Option<bool>,
    pub description: Option<bool>,
    pub escape_special_chars: Option<bool>,
    pub style: Option<TableStyle>,
    pub hide_empty: Option<bool>,
    pub unicode: Option<bool>,
    pub grep_fields: Option<String>,
    pub max_field_count: Option<usize>,
}

impl TableOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an explicit field order.
    pub fn fields<F: Into<Field>, I: IntoIterator<Item = F>>(mut self, fields: I) -> Self {
        self.fields = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    /// Overrides the header label of one field.
    pub fn header(mut self, field: impl Into<Field>, label: impl Into<String>) -> Self {
        match &mut self.headers {
            Some(HeaderMode::Labels(labels)) => {
                labels.insert(field.into(), label.into());
            }
            _ => {
                let mut labels = IndexMap::new();
                labels.insert(field.into(), label.into());
                self.headers = Some(HeaderMode::Labels(labels));
            }
        }
        self
    }

    /// Shows or hides the header row.
    pub fn show_headers(mut self, show: bool) -> Self {
        self.headers = Some(if show {
            HeaderMode::default()
        } else {
            HeaderMode::Hidden
        });
        self
    }

    /// Caps a field's width.
    pub fn max_field(mut self, field: impl Into<Field>, cap: FieldCap) -> Self {
        self.max_fields.insert(field.into(), cap);
        self
    }

    /// Sets the total table width, borders included.
    pub fn max_width(mut self, width: usize) -> Self {
        self.max_width = Some(width);
        self
    }

    pub fn resize(mut self, enable: bool) -> Self {
        self.resize = Some(enable);
        self
    }

    /// Adds a leading row-number column.
    pub fn number(mut self, enable: bool) -> Self {
        self.number = Some(enable);
        self
    }

    pub fn change_fields(mut self, change: ChangeFields) -> Self {
        self.change_fields = Some(change);
        self
    }

    /// Adds a filter for one field's raw values.
    pub fn filter<F>(mut self, field: impl Into<Field>, filter: F) -> Self
    where
        F: Fn(&Value) -> Value + Send + Sync + 'static,
    {
        self.filters.insert(field.into(), Arc::new(filter));
        self
    }

    pub fn header_filter<F>(mut self, filter: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.header_filter = Some(Arc::new(filter));
        self
    }

    /// Sets the filter used for values no field or kind filter handles.
    pub fn filter_any<F>(mut self, filter: F) -> Self
    where
        F: Fn(&Value) -> Value + Send + Sync + 'static,
    {
        self.filter_any = Some(Arc::new(filter));
        self
    }

    /// Adds a filter for every value of the given kind.
    pub fn filter_class<F>(mut self, kind: ValueKind, filter: F) -> Self
    where
        F: Fn(&Value) -> Value + Send + Sync + 'static,
    {
        self.filter_classes.insert(kind, Arc::new(filter));
        self
    }

    pub fn vertical(mut self, enable: bool) -> Self {
        self.vertical = Some(enable);
        self
    }

    /// Uses the union of all rows' fields instead of the first row's.
    pub fn all_fields(mut self, enable: bool) -> Self {
        self.all_fields = Some(enable);
        self
    }

    pub fn description(mut self, enable: bool) -> Self {
        self.description = Some(enable);
        self
    }

    pub fn escape_special_chars(mut self, enable: bool) -> Self {
        self.escape_special_chars = Some(enable);
        self
    }

    pub fn style(mut self, style: TableStyle) -> Self {
        self.style = Some(style);
        self
    }

    pub fn hide_empty(mut self, enable: bool) -> Self {
        self.hide_empty = Some(enable);
        self
    }

    pub fn unicode(mut self, enable: bool) -> Self {
        self.unicode = Some(enable);
        self
    }

    /// Keeps only rows where some cell contains `pattern`.
    pub fn grep_fields(mut self, pattern: impl Into<String>) -> Self {
        self.grep_fields = Some(pattern.into());
        self
    }

    pub fn max_field_count(mut self, count: usize) -> Self {
        self.max_field_count = Some(count);
        self
    }

    /// Fills every unset knob from `base`. Map entries present in both keep
    /// the value from `self`.
    pub fn with_defaults_from(mut self, base: &TableOptions) -> Self {
        fn fill<T: Clone>(slot: &mut Option<T>, base: &Option<T>) {
            if slot.is_none() {
                slot.clone_from(base);
            }
        }
        fn fill_map<K: Clone + Eq + std::hash::Hash, V: Clone>(
            map: &mut IndexMap<K, V>,
            base: &IndexMap<K, V>,
        ) {
            for (key, value) in base {
                map.entry(key.clone()).or_insert_with(|| value.clone());
            }
        }

        fill(&mut self.fields, &base.fields);
        fill(&mut self.headers, &base.headers);
        fill_map(&mut self.max_fields, &base.max_fields);
        fill(&mut self.max_width, &base.max_width);
        fill(&mut self.resize, &base.resize);
        fill(&mut self.number, &base.number);
        fill(&mut self.change_fields, &base.change_fields);
        fill_map(&mut self.filters, &base.filters);
        fill(&mut self.header_filter, &base.header_filter);
        fill(&mut self.filter_any, &base.filter_any);
        fill_map(&mut self.filter_classes, &base.filter_classes);
        fill(&mut self.vertical, &base.vertical);
        fill(&mut self.all_fields, &base.all_fields);
        fill(&mut self.description, &base.description);
        fill(&mut self.escape_special_chars, &base.escape_special_chars);
        fill(&mut self.style, &base.style);
        fill(&mut self.hide_empty, &base.hide_empty);
        fill(&mut self.unicode, &base.unicode);
        fill(&mut self.grep_fields, &base.grep_fields);
        fill(&mut self.max_field_count, &base.max_field_count);
        self
    }

    /// The layout to use: `vertical` wins, then an explicit style, then
    /// `unicode`, then ASCII.
    pub fn resolved_style(&self) -> TableStyle {
        if self.vertical.unwrap_or(false) {
            return TableStyle::Vertical;
        }
        match self.style {
            Some(style) => style,
            None if self.unicode.unwrap_or(false) => TableStyle::Unicode,
            None => TableStyle::Ascii,
        }
    }

    /// Total width budget, falling back to the process-wide default.
    pub fn resolved_max_width(&self) -> usize {
        self.max_width.unwrap_or_else(default_width)
    }

    pub(crate) fn resize_enabled(&self) -> bool {
        self.resize.unwrap_or(true)
    }

    pub(crate) fn number_enabled(&self) -> bool {
        self.number.unwrap_or(false)
    }

    pub(crate) fn all_fields_enabled(&self) -> bool {
        self.all_fields.unwrap_or(false)
    }

    pub(crate) fn escape_enabled(&self) -> bool {
        self.escape_special_chars.unwrap_or(true)
    }

    pub(crate) fn hide_empty_enabled(&self) -> bool {
        self.hide_empty.unwrap_or(false)
    }

    pub(crate) fn field_count_limit(&self) -> usize {
        self.max_field_count.unwrap_or(DEFAULT_MAX_FIELD_COUNT)
    }

    pub(crate) fn description_enabled(&self, style: TableStyle) -> bool {
        self.description.unwrap_or_else(|| style.default_description())
    }
}

impl fmt::Debug for TableOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableOptions")
            .field("fields", &self.fields)
            .field("headers", &self.headers)
            .field("max_fields", &self.max_fields)
            .field("max_width", &self.max_width)
            .field("resize", &self.resize)
            .field("number", &self.number)
            .field("change_fields", &self.change_fields)
            .field("filters", &self.filters.keys().collect::<Vec<_>>())
            .field("header_filter", &self.header_filter.is_some())
            .field("filter_any", &self.filter_any.is_some())
            .field("filter_classes", &self.filter_classes.keys().collect::<Vec<_>>())
            .field("vertical", &self.vertical)
            .field("all_fields", &self.all_fields)
            .field("description", &self.description)
            .field("escape_special_chars", &self.escape_special_chars)
            .field("style", &self.style)
            .field("hide_empty", &self.hide_empty)
            .field("unicode", &self.unicode)
            .field("grep_fields", &self.grep_fields)
            .field("max_field_count", &self.max_field_count)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn style_resolution_order() {
        assert_eq!(TableOptions::new().resolved_style(), TableStyle::Ascii);
        assert_eq!(
            TableOptions::new().unicode(true).resolved_style(),
            TableStyle::Unicode
        );
        assert_eq!(
            TableOptions::new()
                .unicode(true)
                .style(TableStyle::Markdown)
                .resolved_style(),
            TableStyle::Markdown
        );
        assert_eq!(
            TableOptions::new()
                .style(TableStyle::Tab)
                .vertical(true)
                .resolved_style(),
            TableStyle::Vertical
        );
    }

    #[test]
    fn field_cap_resolution() {
        assert_eq!(FieldCap::Width(12).resolve(100), 12);
        assert_eq!(FieldCap::Fraction(0.25).resolve(100), 25);
        assert_eq!(FieldCap::Fraction(0.001).resolve(100), 1);
        assert_eq!(FieldCap::from_number(0.5), FieldCap::Fraction(0.5));
        assert_eq!(FieldCap::from_number(30.0), FieldCap::Width(30));
    }

    #[test]
    fn change_fields_by_names() {
        let change = ChangeFields::Names(vec!["id".into(), "title".into()]);
        assert_eq!(change.renamed(&Field::Index(1)), Some(Field::name("title")));
        assert_eq!(change.renamed(&Field::Index(2)), None);
        assert_eq!(change.renamed(&Field::name("id")), None);
    }

    #[test]
    fn header_builder_accumulates() {
        let options = TableOptions::new().header("a", "Alpha").header("b", "Beta");
        match options.headers {
            Some(HeaderMode::Labels(labels)) => assert_eq!(labels.len(), 2),
            other => panic!("unexpected headers: {:?}", other),
        }
    }

    #[test]
    fn merge_prefers_specific_layer() {
        let base = TableOptions::new()
            .max_width(60)
            .number(true)
            .filter("a", |_| json!("base"))
            .filter("b", |_| json!("base"));
        let merged = TableOptions::new()
            .max_width(100)
            .filter("a", |_| json!("specific"))
            .with_defaults_from(&base);

        assert_eq!(merged.max_width, Some(100));
        assert_eq!(merged.number, Some(true));
        assert_eq!(merged.filters.len(), 2);
        let a = merged.filters.get(&Field::name("a")).unwrap();
        assert_eq!(a(&json!(1)), json!("specific"));
    }

    #[test]
    fn description_defaults_per_style() {
        let options = TableOptions::new();
        assert!(options.description_enabled(TableStyle::Ascii));
        assert!(!options.description_enabled(TableStyle::Markdown));
        assert!(options.description(true).description_enabled(TableStyle::Tab));
    }
}
