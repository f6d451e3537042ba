//! Process-wide rendering state.
//!
//! Two slots are shared across render calls:
//!
//! - the default total width, used when [`TableOptions`](crate::tabular::TableOptions)
//!   leave `max_width` unset;
//! - the last rendered table, so that menu-like consumers can map screen
//!   columns back to fields.
//!
//! Both are last-writer-wins. Tests that touch them should run with
//! `#[serial]`.
//!
//! ```rust
//! use glance_render::{default_width, reset_default_width, set_default_width};
//!
//! set_default_width(100);
//! assert_eq!(default_width(), 100);
//! reset_default_width();
//! assert_eq!(default_width(), 150);
//! ```

use once_cell::sync::Lazy;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::tabular::TableSnapshot;

/// Width used when nothing else has been configured.
pub const DEFAULT_MAX_WIDTH: usize = 150;

static DEFAULT_WIDTH: Lazy<Mutex<usize>> = Lazy::new(|| Mutex::new(DEFAULT_MAX_WIDTH));

static LAST_TABLE: Lazy<Mutex<Option<Arc<TableSnapshot>>>> = Lazy::new(|| Mutex::new(None));

// A panic while holding one of these locks leaves plain data behind.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Sets the process-wide default width. Zero is ignored.
pub fn set_default_width(width: usize) {
    if width == 0 {
        return;
    }
    *lock(&DEFAULT_WIDTH) = width;
}

/// The process-wide default width.
pub fn default_width() -> usize {
    *lock(&DEFAULT_WIDTH)
}

/// Restores [`DEFAULT_MAX_WIDTH`].
pub fn reset_default_width() {
    *lock(&DEFAULT_WIDTH) = DEFAULT_MAX_WIDTH;
}

/// The most recently rendered table, if any.
pub fn last_table() -> Option<Arc<TableSnapshot>> {
    lock(&LAST_TABLE).clone()
}

pub(crate) fn record_last_table(snapshot: TableSnapshot) {
    *lock(&LAST_TABLE) = Some(Arc::new(snapshot));
}

pub fn clear_last_table() {
    *lock(&LAST_TABLE) = None;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn default_width_round_trip() {
        set_default_width(80);
        assert_eq!(default_width(), 80);
        set_default_width(0);
        assert_eq!(default_width(), 80);
        reset_default_width();
        assert_eq!(default_width(), DEFAULT_MAX_WIDTH);
    }

    #[test]
    #[serial]
    fn last_table_starts_cleared() {
        clear_last_table();
        assert!(last_table().is_none());
    }
}
