//! Border glyphs and grid line assembly.
//!
//! A bordered grid is made of three kinds of lines:
//!
//! ```text
//! +-------+-----+     top
//! | name  | ext |     row
//! +-------+-----+     middle
//! | a.txt | txt |     row
//! +-------+-----+     bottom
//! ```
//!
//! Every cell is padded with one space on each side, so a field of width `w`
//! occupies `w + 2` columns plus one column per separator.

use serde::{Deserialize, Serialize};

use crate::width::{display_width, ljust, slice_to_width};

/// Marker appended to cells cut to fit their field.
pub const ELLIPSIS: &str = "...";

/// Fields narrower than this are hard-cut without an ellipsis.
const MIN_ELLIPSIS_WIDTH: usize = 5;

/// Border style for grid tables.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BorderStyle {
    /// ASCII borders: +, -, |
    #[default]
    Ascii,
    /// Light Unicode box-drawing characters: ┌, ─, ┐, │, └, ┘, ├, ┼, ┤, ┬, ┴
    Unicode,
    /// Heavy Unicode box-drawing characters: ┏, ━, ┓, ┃, ┗, ┛, ┣, ╋, ┫, ┳, ┻
    Heavy,
    /// Double-line Unicode box-drawing: ╔, ═, ╗, ║, ╚, ╝, ╠, ╬, ╣, ╦, ╩
    Double,
    /// Rounded corners with light lines: ╭, ─, ╮, │, ╰, ╯, ├, ┼, ┤, ┬, ┴
    Rounded,
    /// Markdown pipes with a `|---|` header separator and no outer lines.
    Markdown,
}

impl BorderStyle {
    pub(crate) fn chars(&self) -> BorderChars {
        match self {
            BorderStyle::Ascii => BorderChars::uniform('-', '|', '+'),
            BorderStyle::Unicode => BorderChars {
                horizontal: '─',
                vertical: '│',
                top: ['┌', '┬', '┐'],
                middle: ['├', '┼', '┤'],
                bottom: ['└', '┴', '┘'],
            },
            BorderStyle::Heavy => BorderChars {
                horizontal: '━',
                vertical: '┃',
                top: ['┏', '┳', '┓'],
                middle: ['┣', '╋', '┫'],
                bottom: ['┗', '┻', '┛'],
            },
            BorderStyle::Double => BorderChars {
                horizontal: '═',
                vertical: '║',
                top: ['╔', '╦', '╗'],
                middle: ['╠', '╬', '╣'],
                bottom: ['╚', '╩', '╝'],
            },
            BorderStyle::Rounded => BorderChars {
                horizontal: '─',
                vertical: '│',
                top: ['╭', '┬', '╮'],
                middle: ['├', '┼', '┤'],
                bottom: ['╰', '┴', '╯'],
            },
            BorderStyle::Markdown => BorderChars::uniform('-', '|', '|'),
        }
    }

    /// Whether the grid has top and bottom lines.
    pub fn has_outer_lines(&self) -> bool {
        !matches!(self, BorderStyle::Markdown)
    }

    /// Columns spent on borders and padding for `fields` fields.
    pub fn decoration_width(fields: usize) -> usize {
        3 * fields + 1
    }

    /// The line above the header.
    pub fn top_line(&self, widths: &[usize]) -> String {
        let chars = self.chars();
        chars.line(widths, chars.top)
    }

    /// The line between header and body.
    pub fn middle_line(&self, widths: &[usize]) -> String {
        let chars = self.chars();
        chars.line(widths, chars.middle)
    }

    /// The line below the body.
    pub fn bottom_line(&self, widths: &[usize]) -> String {
        let chars = self.chars();
        chars.line(widths, chars.bottom)
    }

    /// Joins already fitted cells into a bordered row.
    pub fn row_line<S: AsRef<str>>(&self, cells: &[S]) -> String {
        let v = self.chars().vertical;
        let sep = format!(" {} ", v);
        let body = cells
            .iter()
            .map(|cell| cell.as_ref())
            .collect::<Vec<_>>()
            .join(&sep);
        format!("{v} {body} {v}")
    }
}

/// Glyphs for one border style. Corners and joints are `[left, joint, right]`.
#[derive(Clone, Copy, Debug)]
pub(crate) struct BorderChars {
    pub horizontal: char,
    pub vertical: char,
    pub top: [char; 3],
    pub middle: [char; 3],
    pub bottom: [char; 3],
}

impl BorderChars {
    fn uniform(horizontal: char, vertical: char, joint: char) -> Self {
        BorderChars {
            horizontal,
            vertical,
            top: [joint; 3],
            middle: [joint; 3],
            bottom: [joint; 3],
        }
    }

    fn line(&self, widths: &[usize], [left, joint, right]: [char; 3]) -> String {
        let segments: Vec<String> = widths
            .iter()
            .map(|w| self.horizontal.to_string().repeat(w + 2))
            .collect();
        format!("{}{}{}", left, segments.join(&joint.to_string()), right)
    }
}

/// Fits `text` into exactly `width` columns.
///
/// Over-long text is cut to `width - 3` columns and marked with `...`; fields
/// narrower than 5 columns are hard-cut instead. The result is then padded.
pub(crate) fn format_cell(text: &str, width: usize) -> String {
    if display_width(text) <= width {
        return ljust(text, width);
    }
    let cut = if width < MIN_ELLIPSIS_WIDTH {
        slice_to_width(text, width)
    } else {
        format!("{}{}", slice_to_width(text, width - ELLIPSIS.len()), ELLIPSIS)
    };
    ljust(&cut, width)
}
