//! Width-fitted tables for terminal output.
//!
//! The pipeline is: rows → selected fields → filtered, stringified cells →
//! natural lengths ([`FieldLengthCalculator`]) → fitted lengths
//! ([`Resizer`]) → lines. Widths are measured in display columns, so CJK
//! text and ANSI-colored values line up.
//!
//! ## Layouts
//!
//! | Style | Output |
//! |-------|--------|
//! | [`TableStyle::Ascii`] | `+---+` borders (default) |
//! | [`TableStyle::Unicode`], `Heavy`, `Double`, `Rounded` | box-drawing borders |
//! | [`TableStyle::Markdown`] | pipe table with a `|---|` separator |
//! | [`TableStyle::Tab`] | tab-separated, no padding |
//! | [`TableStyle::Vertical`] | one labeled block per row |
//!
//! Grids with more fields than [`TableOptions::max_field_count`] (or too
//! many to give each field three columns) fall back to the vertical layout.
//!
//! ## Example
//!
//! ```rust
//! use glance_render::tabular::{render_auto, TableOptions, TableStyle};
//! use serde_json::json;
//!
//! let files = json!([
//!     {"name": "Cargo.toml", "size": 512},
//!     {"name": "README.md", "size": 2048},
//! ]);
//! let output = render_auto(&files, &TableOptions::new().style(TableStyle::Markdown));
//!
//! assert_eq!(output, "\
//! | name       | size |
//! |------------|------|
//! | Cargo.toml | 512  |
//! | README.md  | 2048 |");
//! ```

mod decorator;
mod lengths;
mod options;
mod resize;
mod rows;
mod table;
mod types;
mod vertical;

pub use decorator::{BorderStyle, ELLIPSIS};
pub use lengths::FieldLengthCalculator;
pub use options::{
    ChangeFields, FieldCap, HeaderFilter, HeaderMode, TableOptions, TableStyle, ValueFilter,
    DEFAULT_MAX_FIELD_COUNT,
};
pub use resize::{Resizer, MIN_FIELD_LENGTH};
pub use rows::{rows_from_value, VALUE_FIELD};
pub use table::{
    render_auto, render_objects, render_rows, render_table, rows_in_set, Table, TableSnapshot,
};
pub use types::{stringify, Cells, Field, FieldLengths, Headers, Row, ValueKind};
