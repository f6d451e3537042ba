//! Fitting natural field lengths into a width budget.
//!
//! Resizing runs in two phases:
//!
//! 1. **Shrink.** While the table is wider than the budget, fields longer
//!    than the average are cut down to their proportional share of it. If
//!    every field is the same length this cannot make progress, and the
//!    lengths are instead redistributed relative to the natural total (or,
//!    when that would leave fields unreadably narrow, split evenly).
//! 2. **Grow.** Leftover budget is handed to fields with room left: up to
//!    the cap where one is set, otherwise up to the natural length.
//!
//! Budgets here cover field content only; borders and padding are the
//! caller's concern.
//!
//! ```rust
//! use glance_render::tabular::{Field, FieldLengths, Resizer};
//!
//! let natural: FieldLengths = [("a", 135), ("b", 45), ("c", 4), ("d", 55)]
//!     .into_iter()
//!     .map(|(k, v)| (Field::name(k), v))
//!     .collect();
//! let fitted = Resizer::new(natural, 195).resize();
//!
//! assert_eq!(fitted[&Field::name("a")], 91);
//! assert_eq!(fitted.values().sum::<usize>(), 195);
//! ```

use indexmap::IndexMap;

use super::options::FieldCap;
use super::types::{Field, FieldLengths};

/// Fields are never split below this width when redistributing.
pub const MIN_FIELD_LENGTH: usize = 3;

/// Fits field lengths into a budget.
#[derive(Clone, Debug)]
pub struct Resizer {
    natural: FieldLengths,
    current: FieldLengths,
    caps: IndexMap<Field, usize>,
    budget: usize,
}

impl Resizer {
    pub fn new(natural: FieldLengths, budget: usize) -> Self {
        let natural: FieldLengths = natural
            .into_iter()
            .map(|(field, len)| (field, len.max(1)))
            .collect();
        Resizer {
            current: natural.clone(),
            natural,
            caps: IndexMap::new(),
            budget,
        }
    }

    /// Sets per-field caps. Caps on fields outside the table are ignored.
    pub fn caps(mut self, caps: &IndexMap<Field, FieldCap>) -> Self {
        self.caps = caps
            .iter()
            .filter(|(field, _)| self.natural.contains_key(*field))
            .map(|(field, cap)| (field.clone(), cap.resolve(self.budget)))
            .collect();
        self
    }

    /// The lengths as fitted so far.
    pub fn lengths(&self) -> &FieldLengths {
        &self.current
    }

    fn total(&self) -> usize {
        self.current.values().sum()
    }

    /// Repeatedly cuts above-average fields to their share of the budget.
    ///
    /// Returns `false` when the fields are uniform and still over budget, in
    /// which case [`default_restrict_field_lengths`](Self::default_restrict_field_lengths)
    /// must take over.
    pub fn adjust_long_fields(&mut self) -> bool {
        // Each pass shortens at least one field, so the natural total bounds the passes.
        let max_passes = self.natural.values().sum::<usize>() + 1;
        let mut passes = 0;

        while self.total() > self.budget {
            passes += 1;
            debug_assert!(passes <= max_passes, "long-field adjustment did not converge");
            if passes > max_passes {
                tracing::error!(passes, "long-field adjustment did not converge");
                return false;
            }

            let total = self.total();
            let average = total as f64 / self.current.len() as f64;
            let long: Vec<usize> = self
                .current
                .values()
                .copied()
                .filter(|&len| len as f64 > average)
                .collect();
            if long.is_empty() {
                return false;
            }

            let long_share = long.iter().sum::<usize>() * self.budget / total;
            let average_long = (long_share / long.len()).max(1);
            tracing::debug!(total, average, average_long, "shrinking long fields");

            for len in self.current.values_mut() {
                if *len > average_long {
                    *len = average_long;
                }
            }
        }
        true
    }

    /// Distributes the budget relative to natural lengths, or evenly when
    /// that would leave any field at [`MIN_FIELD_LENGTH`] or narrower.
    pub fn default_restrict_field_lengths(&mut self) {
        let natural_total = self.natural.values().sum::<usize>().max(1);
        let relative: FieldLengths = self
            .natural
            .iter()
            .map(|(field, &len)| {
                let share = len as f64 / natural_total as f64 * self.budget as f64;
                (field.clone(), share.floor() as usize)
            })
            .collect();

        let readable = relative.values().all(|&len| len > MIN_FIELD_LENGTH);
        if readable && relative.values().sum::<usize>() <= self.budget {
            tracing::debug!("using relative field lengths");
            self.current = relative;
        } else {
            let even = (self.budget / self.natural.len().max(1)).max(1);
            tracing::debug!(even, "splitting budget evenly");
            for len in self.current.values_mut() {
                *len = even;
            }
        }
    }

    /// Brings the total within budget.
    pub fn shrink(&mut self) {
        if self.current.is_empty() {
            return;
        }
        if !self.adjust_long_fields() {
            self.default_restrict_field_lengths();
        }
    }

    /// Reduces every capped field to its cap.
    pub fn enforce_field_constraints(&mut self) {
        for (field, &cap) in &self.caps {
            if let Some(len) = self.current.get_mut(field) {
                *len = (*len).min(cap);
            }
        }
    }

    /// Hands leftover budget to fields below their cap, or below their
    /// natural length when uncapped.
    pub fn add_extra_width(&mut self) {
        let total = self.total();
        if total >= self.budget {
            return;
        }
        let extra = self.budget - total;

        let mut growable: Vec<(Field, usize)> = self
            .current
            .iter()
            .filter_map(|(field, &len)| {
                let natural = self.natural.get(field).copied().unwrap_or(len);
                let limit = self.caps.get(field).copied().unwrap_or(natural);
                let room = limit.saturating_sub(len);
                (room > 0).then(|| (field.clone(), room))
            })
            .collect();
        growable.sort_by_key(|(field, _)| field.to_string());

        let count = growable.len();
        let mut added = 0;
        for (i, (field, room)) in growable.into_iter().enumerate() {
            let share = (extra - added) / (count - i);
            let grow = room.min(share);
            if let Some(len) = self.current.get_mut(&field) {
                *len += grow;
            }
            added += grow;
        }
        tracing::debug!(extra, added, "distributed extra width");
    }

    /// Runs every phase and returns the fitted lengths.
    pub fn resize(mut self) -> FieldLengths {
        self.shrink();
        self.enforce_field_constraints();
        self.add_extra_width();
        self.current
    }

    /// Applies caps only, leaving lengths otherwise natural.
    pub fn constrain(mut self) -> FieldLengths {
        self.enforce_field_constraints();
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lengths(pairs: &[(&str, usize)]) -> FieldLengths {
        pairs
            .iter()
            .map(|(k, v)| (Field::name(*k), *v))
            .collect()
    }

    #[test]
    fn within_budget_is_untouched() {
        let natural = lengths(&[("a", 5), ("b", 7)]);
        assert_eq!(Resizer::new(natural.clone(), 100).resize(), natural);
    }

    #[test]
    fn empty_input() {
        assert!(Resizer::new(FieldLengths::new(), 10).resize().is_empty());
    }

    #[test]
    fn long_field_absorbs_the_cut() {
        let natural = lengths(&[("a", 135), ("b", 45), ("c", 4), ("d", 55)]);
        let fitted = Resizer::new(natural, 195).resize();
        assert_eq!(fitted, lengths(&[("a", 91), ("b", 45), ("c", 4), ("d", 55)]));
    }

    #[test]
    fn uniform_fields_use_relative_lengths() {
        let natural = lengths(&[("a", 10), ("b", 10), ("c", 10)]);
        let fitted = Resizer::new(natural, 15).resize();
        assert_eq!(fitted, lengths(&[("a", 5), ("b", 5), ("c", 5)]));
    }

    #[test]
    fn narrow_relative_lengths_fall_back_to_even_split() {
        let natural = lengths(&[("a", 10), ("b", 10), ("c", 10), ("d", 10)]);
        let fitted = Resizer::new(natural, 12).resize();
        assert_eq!(fitted, lengths(&[("a", 3), ("b", 3), ("c", 3), ("d", 3)]));
    }

    #[test]
    fn zero_budget_clamps_to_one() {
        let natural = lengths(&[("a", 5), ("b", 7)]);
        let fitted = Resizer::new(natural, 0).resize();
        assert_eq!(fitted, lengths(&[("a", 1), ("b", 1)]));
    }

    #[test]
    fn caps_limit_fields_within_budget() {
        let natural = lengths(&[("a", 40), ("b", 10)]);
        let mut caps = IndexMap::new();
        caps.insert(Field::name("a"), FieldCap::Width(20));
        let fitted = Resizer::new(natural, 100).caps(&caps).resize();
        assert_eq!(fitted, lengths(&[("a", 20), ("b", 10)]));
    }

    #[test]
    fn fractional_caps_resolve_against_budget() {
        let natural = lengths(&[("a", 40), ("b", 10)]);
        let mut caps = IndexMap::new();
        caps.insert(Field::name("a"), FieldCap::Fraction(0.25));
        let fitted = Resizer::new(natural, 80).caps(&caps).resize();
        assert_eq!(fitted[&Field::name("a")], 20);
    }

    #[test]
    fn constrain_applies_caps_without_shrinking() {
        let natural = lengths(&[("a", 40), ("b", 90)]);
        let mut caps = IndexMap::new();
        caps.insert(Field::name("a"), FieldCap::Width(12));
        let fitted = Resizer::new(natural, 20).caps(&caps).constrain();
        assert_eq!(fitted, lengths(&[("a", 12), ("b", 90)]));
    }

    #[test]
    fn extra_width_goes_to_earlier_fields_first() {
        let mut resizer = Resizer::new(lengths(&[("b", 10), ("a", 10)]), 13);
        resizer.current = lengths(&[("b", 5), ("a", 5)]);
        resizer.add_extra_width();
        // 3 extra over two fields: "a" sorts first and gets floor(3 / 2)
        assert_eq!(resizer.lengths(), &lengths(&[("b", 7), ("a", 6)]));
    }

    #[test]
    fn caps_above_natural_length_leave_room_to_grow() {
        let natural = lengths(&[("a", 10), ("b", 100)]);
        let mut caps = IndexMap::new();
        caps.insert(Field::name("a"), FieldCap::Width(30));
        let fitted = Resizer::new(natural, 200).caps(&caps).resize();
        assert_eq!(fitted, lengths(&[("a", 30), ("b", 100)]));
    }

    #[test]
    fn extra_width_respects_natural_length() {
        let mut resizer = Resizer::new(lengths(&[("a", 6), ("b", 20)]), 30);
        resizer.current = lengths(&[("a", 4), ("b", 4)]);
        resizer.add_extra_width();
        assert_eq!(resizer.lengths(), &lengths(&[("a", 6), ("b", 20)]));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn natural_lengths() -> impl Strategy<Value = FieldLengths> {
        prop::collection::vec(1usize..200, 1..12).prop_map(|lens| {
            lens.into_iter()
                .enumerate()
                .map(|(i, len)| (Field::Index(i), len))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn fitted_total_within_budget(natural in natural_lengths(), budget in 0usize..400) {
            let count = natural.len();
            let fitted = Resizer::new(natural, budget).resize();
            prop_assert_eq!(fitted.len(), count);
            prop_assert!(fitted.values().all(|&len| len >= 1));
            prop_assert!(fitted.values().sum::<usize>() <= budget.max(count));
        }

        #[test]
        fn fitted_never_exceeds_natural(natural in natural_lengths(), budget in 0usize..400) {
            let fitted = Resizer::new(natural.clone(), budget).resize();
            for (field, len) in &fitted {
                prop_assert!(*len <= natural[field].max(1));
            }
        }

        #[test]
        fn shrinking_preserves_order(natural in natural_lengths(), budget in 0usize..400) {
            let mut resizer = Resizer::new(natural.clone(), budget);
            resizer.shrink();
            let shrunk = resizer.lengths();
            for (f, nf) in &natural {
                for (g, ng) in &natural {
                    if nf <= ng {
                        prop_assert!(shrunk[f] <= shrunk[g]);
                    }
                }
            }
        }
    }
}
