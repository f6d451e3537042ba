//! Error type for the glance facade.

use glance_render::{RenderError, TableError, TreeError};
use thiserror::Error;

/// Errors from configuring or running views.
#[derive(Debug, Error)]
pub enum GlanceError {
    /// The renderer rejected the value or options.
    #[error(transparent)]
    Render(#[from] RenderError),

    /// A value could not be converted to JSON for rendering.
    #[error("failed to convert value: {0}")]
    Conversion(#[from] serde_json::Error),

    /// A formatter names a method that was never registered.
    #[error("unknown view method: {0}")]
    UnknownMethod(String),

    /// A formatter names an output transform that was never registered.
    #[error("unknown output method: {0}")]
    UnknownOutputMethod(String),

    /// Declared `inherits` chains loop back on themselves.
    #[error("formatter fallback cycle: {}", path.join(" -> "))]
    FallbackCycle { path: Vec<String> },

    /// Configuration could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl From<TableError> for GlanceError {
    fn from(err: TableError) -> Self {
        GlanceError::Render(err.into())
    }
}

impl From<TreeError> for GlanceError {
    fn from(err: TreeError) -> Self {
        GlanceError::Render(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_message_shows_path() {
        let err = GlanceError::FallbackCycle {
            path: vec!["a".into(), "b".into(), "a".into()],
        };
        assert_eq!(err.to_string(), "formatter fallback cycle: a -> b -> a");
    }

    #[test]
    fn render_errors_pass_through() {
        let err: GlanceError = TreeError::NotAList.into();
        assert_eq!(err.to_string(), "tree input must be a list of nodes");
    }
}
