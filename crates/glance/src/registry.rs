//! Formatter registry.
//!
//! The registry maps type tags to [`FormatterConfig`]s. A tag without a
//! formatter of its own can fall back to the tags it declares in
//! `inherits`, much like a subclass picking up its parent's display
//! settings.
//!
//! # Resolution
//!
//! Resolving a tag walks the tag itself, then its `inherits` chain depth
//! first. Every formatter found along the way contributes, most specific
//! first:
//!
//! - the tag's own formatter always applies;
//! - an inherited formatter applies only if it was registered with
//!   `descendants: true`;
//! - the first `view` and `output_method` found win;
//! - table options merge knob by knob, the more specific layer winning.
//!
//! A tag with no applicable formatter is not handled, and the caller should
//! fall back to its default inspector.
//!
//! # Example
//!
//! ```rust
//! use glance::{FormatterConfig, Registry, ViewKind};
//!
//! let mut registry = Registry::new();
//! registry.register(
//!     "record",
//!     FormatterConfig::new()
//!         .view(ViewKind::Vertical)
//!         .descendants(true),
//! ).unwrap();
//! registry.register(
//!     "user",
//!     FormatterConfig::new().inherits(["record"]),
//! ).unwrap();
//!
//! let resolved = registry.resolve("user").unwrap();
//! assert_eq!(resolved.view, ViewKind::Vertical);
//! assert!(registry.resolve("unknown").is_none());
//! ```

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::config::{FormatterConfig, GlanceConfig};
use crate::error::GlanceError;
use glance_render::tabular::{TableOptions, TableStyle};
use glance_render::tree::{TreeStyle, DEFAULT_INDENT};

/// A view implemented in code and referenced from configuration by name.
pub type MethodFn = Arc<dyn Fn(&Value, &TableOptions) -> Result<String, GlanceError> + Send + Sync>;

/// A transform applied to a value before it is viewed.
pub type OutputFn = Arc<dyn Fn(Value) -> Value + Send + Sync>;

fn default_indent() -> usize {
    DEFAULT_INDENT
}

/// The closed set of views a formatter can select.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ViewKind {
    /// A grid table. `style` overrides the option-derived style.
    Table {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        style: Option<TableStyle>,
    },
    /// One labeled block per row.
    Vertical,
    /// An indented tree of `[level, value]` nodes.
    Tree {
        #[serde(default)]
        style: TreeStyle,
        #[serde(default = "default_indent")]
        indent: usize,
    },
    /// A table for arrays and objects; scalars are left to the inspector.
    #[default]
    Auto,
    /// A method registered with [`Registry::register_method`].
    Method { name: String },
}

/// The outcome of resolving a tag.
#[derive(Clone)]
pub struct Resolved {
    pub view: ViewKind,
    pub options: TableOptions,
    pub output_method: Option<String>,
    /// Tags whose formatters contributed, most specific first.
    pub sources: Vec<String>,
}

impl fmt::Debug for Resolved {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolved")
            .field("view", &self.view)
            .field("options", &self.options)
            .field("output_method", &self.output_method)
            .field("sources", &self.sources)
            .finish()
    }
}

/// Formatters by type tag, plus the code they can refer to.
#[derive(Clone, Default)]
pub struct Registry {
    formatters: IndexMap<String, FormatterConfig>,
    configured_options: IndexMap<String, TableOptions>,
    code_options: IndexMap<String, TableOptions>,
    methods: HashMap<String, MethodFn>,
    output_methods: HashMap<String, OutputFn>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a registry from every formatter in `config`.
    pub fn from_config(config: &GlanceConfig) -> Result<Self, GlanceError> {
        let mut registry = Registry::new();
        for (tag, formatter) in &config.formatters {
            registry.register(tag.clone(), formatter.clone())?;
        }
        Ok(registry)
    }

    /// Adds or replaces the formatter for `tag`.
    ///
    /// # Errors
    ///
    /// [`GlanceError::FallbackCycle`] if the formatter's `inherits` chain
    /// leads back to `tag`. The registry is left unchanged.
    pub fn register(
        &mut self,
        tag: impl Into<String>,
        formatter: FormatterConfig,
    ) -> Result<(), GlanceError> {
        let tag = tag.into();
        for parent in &formatter.inherits {
            let mut path = vec![tag.clone()];
            self.check_chain(&tag, parent, &mut path)?;
        }
        tracing::debug!(tag = %tag, inherits = ?formatter.inherits, "registered formatter");
        self.configured_options
            .insert(tag.clone(), formatter.options.to_options());
        self.formatters.insert(tag, formatter);
        Ok(())
    }

    // Existing formatters are acyclic, so a new cycle must pass through `origin`.
    fn check_chain(
        &self,
        origin: &str,
        current: &str,
        path: &mut Vec<String>,
    ) -> Result<(), GlanceError> {
        path.push(current.to_string());
        if current == origin {
            return Err(GlanceError::FallbackCycle { path: path.clone() });
        }
        if let Some(formatter) = self.formatters.get(current) {
            for parent in &formatter.inherits {
                self.check_chain(origin, parent, path)?;
            }
        }
        path.pop();
        Ok(())
    }

    /// Attaches code-level table options to a tag, such as value filters.
    /// Configured options take precedence over these, and later calls
    /// override earlier ones knob by knob.
    ///
    /// The options survive re-registering the tag. A tag without a
    /// formatter keeps them until one is registered.
    pub fn table_options(&mut self, tag: impl Into<String>, options: TableOptions) {
        let tag = tag.into();
        if !self.formatters.contains_key(&tag) {
            tracing::debug!(tag = %tag, "table options held for unregistered tag");
        }
        let merged = match self.code_options.get(&tag) {
            Some(earlier) => options.with_defaults_from(earlier),
            None => options,
        };
        self.code_options.insert(tag, merged);
    }

    // Configured knobs first, code-level ones filling the gaps.
    fn layer_options(&self, tag: &str) -> TableOptions {
        let configured = self.configured_options.get(tag).cloned().unwrap_or_default();
        match self.code_options.get(tag) {
            Some(code) => configured.with_defaults_from(code),
            None => configured,
        }
    }

    pub fn register_method<F>(&mut self, name: impl Into<String>, method: F)
    where
        F: Fn(&Value, &TableOptions) -> Result<String, GlanceError> + Send + Sync + 'static,
    {
        self.methods.insert(name.into(), Arc::new(method));
    }

    pub fn register_output_method<F>(&mut self, name: impl Into<String>, method: F)
    where
        F: Fn(Value) -> Value + Send + Sync + 'static,
    {
        self.output_methods.insert(name.into(), Arc::new(method));
    }

    pub fn method(&self, name: &str) -> Result<&MethodFn, GlanceError> {
        self.methods
            .get(name)
            .ok_or_else(|| GlanceError::UnknownMethod(name.to_string()))
    }

    pub fn output_method(&self, name: &str) -> Result<&OutputFn, GlanceError> {
        self.output_methods
            .get(name)
            .ok_or_else(|| GlanceError::UnknownOutputMethod(name.to_string()))
    }

    pub fn get(&self, tag: &str) -> Option<&FormatterConfig> {
        self.formatters.get(tag)
    }

    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.formatters.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.formatters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.formatters.is_empty()
    }

    /// The tag followed by its declared fallbacks, depth first, without repeats.
    pub fn chain(&self, tag: &str) -> Vec<String> {
        let mut seen = IndexSet::new();
        self.collect_chain(tag, &mut seen);
        seen.into_iter().collect()
    }

    fn collect_chain(&self, tag: &str, seen: &mut IndexSet<String>) {
        if !seen.insert(tag.to_string()) {
            return;
        }
        if let Some(formatter) = self.formatters.get(tag) {
            for parent in &formatter.inherits {
                self.collect_chain(parent, seen);
            }
        }
    }

    /// Resolves the view and merged options for `tag`.
    pub fn resolve(&self, tag: &str) -> Option<Resolved> {
        let applicable: Vec<(&String, &FormatterConfig)> = self
            .chain(tag)
            .into_iter()
            .filter_map(|name| self.formatters.get_key_value(name.as_str()))
            .filter(|(name, formatter)| name.as_str() == tag || formatter.descendants)
            .collect();
        if applicable.is_empty() {
            tracing::debug!(tag, "no formatter");
            return None;
        }

        let view = applicable
            .iter()
            .find_map(|(_, formatter)| formatter.view.clone())
            .unwrap_or_default();
        let output_method = applicable
            .iter()
            .find_map(|(_, formatter)| formatter.output_method.clone());
        let options = applicable
            .iter()
            .map(|(name, _)| self.layer_options(name))
            .fold(TableOptions::new(), |merged, layer| {
                merged.with_defaults_from(&layer)
            });
        let sources: Vec<String> = applicable.iter().map(|(name, _)| (*name).clone()).collect();

        tracing::debug!(tag, ?view, sources = ?sources, "resolved formatter");
        Some(Resolved {
            view,
            options,
            output_method,
            sources,
        })
    }
}
