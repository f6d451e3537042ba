//! View configuration.
//!
//! [`GlanceConfig`] is plain serde data. Loading it from disk is left to the
//! caller; JSON can be read directly with [`GlanceConfig::from_json`].
//!
//! ```rust
//! use glance::{GlanceConfig, ViewKind};
//!
//! let config = GlanceConfig::from_json(r#"{
//!     "width": 100,
//!     "formatters": {
//!         "user": {
//!             "view": {"kind": "table", "style": "unicode"},
//!             "options": {"fields": ["id", "name"], "number": true}
//!         },
//!         "admin": {"inherits": ["user"]}
//!     }
//! }"#).unwrap();
//!
//! assert_eq!(config.width, Some(100));
//! assert!(config.enabled);
//! assert!(matches!(config.formatters["user"].view, Some(ViewKind::Table { .. })));
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::GlanceError;
use crate::registry::ViewKind;
use glance_render::tabular::{ChangeFields, FieldCap, HeaderMode, TableOptions, TableStyle};
use glance_render::Field;

fn default_true() -> bool {
    true
}

/// Top-level configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GlanceConfig {
    /// Total table width. Detected from the terminal when unset.
    #[serde(default)]
    pub width: Option<usize>,
    #[serde(default)]
    pub height: Option<usize>,
    /// When false, every value falls through to the default inspector.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Formatter per type tag.
    #[serde(default)]
    pub formatters: IndexMap<String, FormatterConfig>,
}

impl Default for GlanceConfig {
    fn default() -> Self {
        GlanceConfig {
            width: None,
            height: None,
            enabled: true,
            formatters: IndexMap::new(),
        }
    }
}

impl GlanceConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a JSON document.
    pub fn from_json(json: &str) -> Result<Self, GlanceError> {
        serde_json::from_str(json).map_err(|e| GlanceError::Config(e.to_string()))
    }

    pub fn width(mut self, width: usize) -> Self {
        self.width = Some(width);
        self
    }

    pub fn height(mut self, height: usize) -> Self {
        self.height = Some(height);
        self
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Adds or replaces the formatter for a type tag.
    pub fn formatter(mut self, tag: impl Into<String>, formatter: FormatterConfig) -> Self {
        self.formatters.insert(tag.into(), formatter);
        self
    }
}

/// How values with one type tag are shown.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatterConfig {
    /// The view to use. Unset views are taken from inherited formatters.
    pub view: Option<ViewKind>,
    pub options: TableOptionsConfig,
    /// Tags to fall back to, most specific first.
    pub inherits: Vec<String>,
    /// Whether tags inheriting from this one pick up its configuration.
    pub descendants: bool,
    /// Name of a registered transform applied to the value before viewing.
    pub output_method: Option<String>,
}

impl FormatterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(mut self, view: ViewKind) -> Self {
        self.view = Some(view);
        self
    }

    pub fn options(mut self, options: TableOptionsConfig) -> Self {
        self.options = options;
        self
    }

    pub fn inherits<S: Into<String>, I: IntoIterator<Item = S>>(mut self, tags: I) -> Self {
        self.inherits = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn descendants(mut self, enable: bool) -> Self {
        self.descendants = enable;
        self
    }

    pub fn output_method(mut self, name: impl Into<String>) -> Self {
        self.output_method = Some(name.into());
        self
    }
}

/// `headers` as written in configuration: `false` hides them, a map relabels.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HeadersConfig {
    Show(bool),
    Labels(IndexMap<String, String>),
}

/// `change_fields` as written in configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChangeFieldsConfig {
    Names(Vec<String>),
    Map(IndexMap<String, String>),
}

/// The serializable subset of [`TableOptions`]. Filters are code, so they
/// are registered on [`TableOptions`] directly rather than configured here.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableOptionsConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<Field>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<HeadersConfig>,
    /// Width caps; values below 1 are fractions of the width.
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub max_fields: IndexMap<String, f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_width: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resize: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change_fields: Option<ChangeFieldsConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vertical: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub all_fields: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub escape_special_chars: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<TableStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hide_empty: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unicode: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grep_fields: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_field_count: Option<usize>,
}

impl TableOptionsConfig {
    /// Converts to renderer options. Unset knobs stay unset.
    pub fn to_options(&self) -> TableOptions {
        let headers = self.headers.as_ref().map(|headers| match headers {
            HeadersConfig::Show(true) => HeaderMode::default(),
            HeadersConfig::Show(false) => HeaderMode::Hidden,
            HeadersConfig::Labels(labels) => HeaderMode::Labels(
                labels
                    .iter()
                    .map(|(field, label)| (config_field(field), label.clone()))
                    .collect(),
            ),
        });
        let change_fields = self.change_fields.as_ref().map(|change| match change {
            ChangeFieldsConfig::Names(names) => ChangeFields::Names(names.clone()),
            ChangeFieldsConfig::Map(map) => ChangeFields::Map(
                map.iter()
                    .map(|(from, to)| (config_field(from), Field::name(to.as_str())))
                    .collect(),
            ),
        });

        TableOptions {
            fields: self.fields.clone(),
            headers,
            max_fields: self
                .max_fields
                .iter()
                .map(|(field, cap)| (config_field(field), FieldCap::from_number(*cap)))
                .collect(),
            max_width: self.max_width,
            resize: self.resize,
            number: self.number,
            change_fields,
            vertical: self.vertical,
            all_fields: self.all_fields,
            description: self.description,
            escape_special_chars: self.escape_special_chars,
            style: self.style,
            hide_empty: self.hide_empty,
            unicode: self.unicode,
            grep_fields: self.grep_fields.clone(),
            max_field_count: self.max_field_count,
            ..TableOptions::default()
        }
    }
}

// Object keys are always strings; numeric ones name index fields.
fn config_field(key: &str) -> Field {
    key.parse::<usize>()
        .map(Field::Index)
        .unwrap_or_else(|_| Field::name(key))
}
