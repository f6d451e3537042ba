//! The entry point used by shell integrations.

use serde_json::Value;

use crate::config::GlanceConfig;
use crate::error::GlanceError;
use crate::formattable::Formattable;
use crate::registry::{Registry, Resolved, ViewKind};
use crate::terminal::{terminal_height, terminal_width};
use glance_render::tabular::render_auto;
use glance_render::tree::{nodes_from_value, render_tree, TreeOptions};

/// Renders values through their configured formatters.
///
/// ```rust
/// use glance::{FormatterConfig, Glance, GlanceConfig, Tagged, ViewKind};
/// use serde_json::json;
///
/// let config = GlanceConfig::new()
///     .width(60)
///     .formatter("points", FormatterConfig::new().view(ViewKind::Table { style: None }));
/// let glance = Glance::new(config).unwrap();
///
/// let output = glance.view(&Tagged::new("points", json!([{"x": 1, "y": 2}]))).unwrap();
/// assert!(output.starts_with("+---+---+"));
///
/// // no formatter: the shell shows the value its own way
/// assert!(glance.view(&Tagged::new("other", json!(1))).is_none());
/// ```
pub struct Glance {
    registry: Registry,
    enabled: bool,
    height: usize,
}

impl Glance {
    /// Builds the registry from `config` and installs the configured or
    /// detected width as the process default.
    pub fn new(config: GlanceConfig) -> Result<Self, GlanceError> {
        let registry = Registry::from_config(&config)?;
        let width = config.width.unwrap_or_else(terminal_width);
        glance_render::set_default_width(width);
        tracing::debug!(width, formatters = registry.len(), "glance enabled");
        Ok(Glance {
            registry,
            enabled: config.enabled,
            height: config.height.unwrap_or_else(terminal_height),
        })
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn enable(&mut self) {
        self.enabled = true;
    }

    pub fn disable(&mut self) {
        self.enabled = false;
    }

    /// Rows available for output, for callers that page long views.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Renders `value`, or returns `None` when the shell should fall back to
    /// its default inspector. Rendering errors are logged and also yield
    /// `None`.
    pub fn view<T: Formattable + ?Sized>(&self, value: &T) -> Option<String> {
        match self.try_view(value) {
            Ok(output) => output,
            Err(err) => {
                tracing::warn!(tag = %value.type_tag(), error = %err, "view failed");
                None
            }
        }
    }

    /// Like [`view`](Self::view), but surfaces errors.
    pub fn try_view<T: Formattable + ?Sized>(
        &self,
        value: &T,
    ) -> Result<Option<String>, GlanceError> {
        if !self.enabled {
            return Ok(None);
        }
        let tag = value.type_tag();
        let Some(resolved) = self.registry.resolve(&tag) else {
            return Ok(None);
        };

        let mut data = value.to_value()?;
        if let Some(name) = &resolved.output_method {
            let transform = self.registry.output_method(name)?;
            data = transform(data);
        }
        self.render(&data, resolved)
    }

    fn render(&self, data: &Value, resolved: Resolved) -> Result<Option<String>, GlanceError> {
        let Resolved { view, options, .. } = resolved;
        let output = match view {
            ViewKind::Table { style } => {
                let options = match style {
                    Some(style) => options.style(style),
                    None => options,
                };
                render_auto(data, &options)
            }
            ViewKind::Vertical => render_auto(data, &options.vertical(true)),
            ViewKind::Tree { style, indent } => {
                let nodes = nodes_from_value(data)?;
                render_tree(&nodes, &TreeOptions::new().style(style).indent(indent))?
            }
            ViewKind::Auto => match data {
                Value::Array(_) | Value::Object(_) => render_auto(data, &options),
                _ => return Ok(None),
            },
            ViewKind::Method { name } => {
                let method = self.registry.method(&name)?;
                method(data, &options)?
            }
        };
        Ok(Some(output))
    }
}
