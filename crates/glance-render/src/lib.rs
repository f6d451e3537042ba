//! # Glance Render - Width-Fitted Tables and Trees
//!
//! `glance-render` turns lists of values into terminal-friendly text: bordered
//! tables whose columns are fitted to a width budget, vertical record blocks,
//! and indented trees.
//!
//! This crate is the rendering core of `glance`, but it has no dependency on
//! any formatter registry and can be used on its own.
//!
//! ## Core Concepts
//!
//! - [`TableOptions`](tabular::TableOptions): immutable per-call options, builder style
//! - [`Table`](tabular::Table): fields, stringified cells and fitted widths for one render
//! - [`Resizer`](tabular::Resizer): shrinks long fields first, then hands back spare width
//! - [`render_tree`](tree::render_tree): basic, numbered and directory trees
//! - [`state`]: the process-wide default width and last rendered table
//!
//! ## Quick Start
//!
//! ```rust
//! use glance_render::tabular::{render_table, TableOptions};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Task {
//!     id: u32,
//!     title: String,
//! }
//!
//! let tasks = vec![
//!     Task { id: 1, title: "Write docs".into() },
//!     Task { id: 2, title: "Ship it".into() },
//! ];
//! let output = render_table(&tasks, &TableOptions::new().max_width(40)).unwrap();
//!
//! assert_eq!(output, "\
//! +----+------------+
//! | id | title      |
//! +----+------------+
//! | 1  | Write docs |
//! | 2  | Ship it    |
//! +----+------------+
//! 2 rows in set");
//! ```
//!
//! ## Width Fitting
//!
//! Widths are display columns, not bytes: CJK characters take two columns
//! and ANSI escape codes take none. When the natural widths exceed
//! `max_width`, disproportionately long fields are cut first and cells that
//! no longer fit end in `...`:
//!
//! ```rust
//! use glance_render::tabular::{render_auto, TableOptions};
//! use serde_json::json;
//!
//! let rows = json!([{"name": "abcdefghijklmnop"}]);
//! let output = render_auto(&rows, &TableOptions::new().max_width(12));
//!
//! assert_eq!(output, "\
//! +----------+
//! | name     |
//! +----------+
//! | abcde... |
//! +----------+
//! 1 row in set");
//! ```
//!
//! ## Logging
//!
//! The crate logs through [`tracing`]. Resizer decisions are emitted at
//! `debug` level and the vertical fallback at `warn`. No subscriber is
//! installed here.

mod error;
pub mod state;
pub mod tabular;
pub mod tree;
pub mod width;

pub use error::{RenderError, TableError, TreeError};
pub use state::{
    clear_last_table, default_width, last_table, reset_default_width, set_default_width,
    DEFAULT_MAX_WIDTH,
};
pub use tabular::{
    render_auto, render_objects, render_rows, render_table, Field, Table, TableOptions,
    TableSnapshot, TableStyle,
};
pub use tree::{nodes_from_value, render_tree, TreeNode, TreeOptions, TreeStyle};
pub use width::{display_width, ljust, rjust, slice_to_width};
