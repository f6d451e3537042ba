//! One labeled block per row.
//!
//! ```text
//! ****** 1. row ******
//! name: a.txt
//! size: 120
//!   id: 7
//! ```

use super::types::{Cells, Field, Headers};
use crate::width::{display_width, rjust};

/// Formats rows as labeled blocks. Every field of `fields` must have a label.
pub(crate) fn render_vertical(
    rows: &[Cells],
    fields: &[Field],
    labels: &Headers,
    hide_empty: bool,
) -> Vec<String> {
    let label_width = labels
        .values()
        .map(|label| display_width(label))
        .max()
        .unwrap_or(0);
    let stars = "*".repeat((label_width + label_width / 2).max(3));

    let mut lines = Vec::new();
    for (i, row) in rows.iter().enumerate() {
        lines.push(format!("{stars} {}. row {stars}", i + 1));
        for field in fields {
            let value = row.get(field).map(String::as_str).unwrap_or("");
            if hide_empty && value.is_empty() {
                continue;
            }
            let label = labels.get(field).map(String::as_str).unwrap_or("");
            lines.push(format!("{}: {}", rjust(label, label_width), value));
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (Vec<Cells>, Vec<Field>, Headers) {
        let fields = vec![Field::name("a"), Field::name("bb")];
        let labels: Headers = fields.iter().map(|f| (f.clone(), f.to_string())).collect();
        let row: Cells = [(Field::name("a"), "1".to_string()), (Field::name("bb"), String::new())]
            .into_iter()
            .collect();
        (vec![row], fields, labels)
    }

    #[test]
    fn labels_are_right_aligned() {
        let (rows, fields, labels) = setup();
        let lines = render_vertical(&rows, &fields, &labels, false);
        assert_eq!(lines, vec!["*** 1. row ***", " a: 1", "bb: "]);
    }

    #[test]
    fn empty_values_can_be_hidden() {
        let (rows, fields, labels) = setup();
        let lines = render_vertical(&rows, &fields, &labels, true);
        assert_eq!(lines, vec!["*** 1. row ***", " a: 1"]);
    }

    #[test]
    fn stars_scale_with_label_width() {
        let fields = vec![Field::name("modified")];
        let labels: Headers = fields.iter().map(|f| (f.clone(), f.to_string())).collect();
        let lines = render_vertical(&[Cells::new()], &fields, &labels, false);
        assert_eq!(lines[0], "************ 1. row ************");
    }
}
