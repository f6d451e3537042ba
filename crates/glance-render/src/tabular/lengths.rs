//! Natural (untruncated) field widths.

use super::types::{Cells, Field, FieldLengths, Headers};
use crate::width::display_width;

/// Computes how wide each field would need to be to show every cell in full.
pub struct FieldLengthCalculator;

impl FieldLengthCalculator {
    /// Natural length per field: the widest of the field's own name and
    /// every row's cell. Missing cells count as empty.
    ///
    /// Returns an empty map for an empty row set.
    ///
    /// ```rust
    /// use glance_render::tabular::{Cells, Field, FieldLengthCalculator};
    ///
    /// let mut row = Cells::new();
    /// row.insert(Field::name("id"), "12345".to_string());
    /// let lengths = FieldLengthCalculator::compute(&[row], &[Field::name("id"), Field::name("title")]);
    ///
    /// assert_eq!(lengths[&Field::name("id")], 5);
    /// assert_eq!(lengths[&Field::name("title")], 5);
    /// ```
    pub fn compute(rows: &[Cells], fields: &[Field]) -> FieldLengths {
        if rows.is_empty() {
            return FieldLengths::new();
        }
        let seeds = fields.iter().map(|f| display_width(&f.to_string()));
        Self::measure(rows, fields, seeds)
    }

    /// Like [`compute`](Self::compute), but seeded with the header labels
    /// that will actually be shown. Without headers each field starts at 1.
    pub fn compute_with_headers(
        rows: &[Cells],
        fields: &[Field],
        headers: Option<&Headers>,
    ) -> FieldLengths {
        if rows.is_empty() {
            return FieldLengths::new();
        }
        let seeds = fields.iter().map(|field| match headers {
            Some(labels) => labels
                .get(field)
                .map(|label| display_width(label))
                .unwrap_or_else(|| display_width(&field.to_string())),
            None => 1,
        });
        Self::measure(rows, fields, seeds)
    }

    fn measure(
        rows: &[Cells],
        fields: &[Field],
        seeds: impl Iterator<Item = usize>,
    ) -> FieldLengths {
        fields
            .iter()
            .zip(seeds)
            .map(|(field, seed)| {
                let widest = rows
                    .iter()
                    .filter_map(|row| row.get(field))
                    .map(|cell| display_width(cell))
                    .fold(seed, usize::max);
                (field.clone(), widest.max(1))
            })
            .collect()
    }
}
