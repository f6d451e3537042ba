//! # Glance - Type-Driven Views for Interactive Shells
//!
//! Glance decides how a value about to be echoed by a read-eval-print shell
//! should look. Each value carries a *type tag*; a [`Registry`] maps tags to
//! formatters that render the value as a table, a vertical record list, a
//! tree, or through a method registered in code. Values without a formatter
//! are left to the shell's default inspector.
//!
//! The rendering itself lives in [`glance_render`], re-exported here as
//! [`tabular`], [`tree`] and [`width`].
//!
//! ## Core Concepts
//!
//! - [`GlanceConfig`]: serde configuration: width, enabled flag, formatters per tag
//! - [`FormatterConfig`]: a view, table options, and declared fallback tags
//! - [`ViewKind`]: the closed set of views
//! - [`Formattable`]: anything with a type tag and a JSON form, see [`Tagged`]
//! - [`Glance`]: the entry point: `view(&value) -> Option<String>`
//!
//! ## Quick Start
//!
//! ```rust
//! use glance::{Glance, GlanceConfig, Tagged};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Task {
//!     id: u32,
//!     title: &'static str,
//! }
//!
//! let config = GlanceConfig::from_json(r#"{
//!     "width": 80,
//!     "formatters": {
//!         "tasks": {"view": {"kind": "table", "style": "markdown"}}
//!     }
//! }"#).unwrap();
//! let glance = Glance::new(config).unwrap();
//!
//! let tasks = Tagged::new("tasks", vec![Task { id: 1, title: "Write docs" }]);
//! assert_eq!(
//!     glance.view(&tasks).unwrap(),
//!     "| id | title      |\n|----|------------|\n| 1  | Write docs |"
//! );
//! ```
//!
//! ## Fallback Chains
//!
//! Formatters declare the tags they fall back to with `inherits`. A parent's
//! configuration reaches its children only when the parent sets
//! `descendants: true`, and the most specific setting always wins. See
//! [`registry`] for the full rules.
//!
//! ## Logging
//!
//! Glance logs through `tracing`: formatter resolution at `debug`, failed
//! views at `warn`. Install a subscriber to see them.

pub mod config;
mod error;
mod formattable;
pub mod registry;
mod terminal;
mod view;

pub use config::{ChangeFieldsConfig, FormatterConfig, GlanceConfig, HeadersConfig, TableOptionsConfig};
pub use error::GlanceError;
pub use formattable::{Formattable, Tagged};
pub use registry::{MethodFn, OutputFn, Registry, Resolved, ViewKind};
pub use terminal::{terminal_height, terminal_width, DEFAULT_HEIGHT};
pub use view::Glance;

pub use glance_render::{last_table, tabular, tree, width, RenderError, TableSnapshot};
