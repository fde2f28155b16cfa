// ── Row selection ──
//
// `count` is a raw delta accumulator: `on_toggle(true)` adds one,
// `on_toggle(false)` subtracts one, and nothing clamps it. The selected-id
// set is layered on top for surfaces that know which row was toggled;
// driving the tracker only through `toggle` keeps `count` equal to the
// number of selected rows still in the listing.

use std::collections::HashSet;
use std::sync::Arc;

use crate::model::{StudentId, StudentRecord};

/// Tracks how many listed rows are marked selected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionTracker {
    count: i64,
    selected: HashSet<StudentId>,
}

impl SelectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current count. May be negative when toggles are reported out of
    /// order relative to the checkbox state.
    pub fn count(&self) -> i64 {
        self.count
    }

    /// Apply one checkbox event.
    pub fn on_toggle(&mut self, checked: bool) {
        if checked {
            self.count += 1;
        } else {
            self.count -= 1;
        }
    }

    /// Zero the count and forget every selected id.
    pub fn reset(&mut self) {
        self.count = 0;
        self.selected.clear();
    }

    /// Flip `id` in the selected set and report the new state through
    /// `on_toggle`. Returns whether `id` is now selected.
    pub fn toggle(&mut self, id: &StudentId) -> bool {
        let checked = if self.selected.remove(id) {
            false
        } else {
            self.selected.insert(id.clone());
            true
        };
        self.on_toggle(checked);
        checked
    }

    pub fn is_selected(&self, id: &StudentId) -> bool {
        self.selected.contains(id)
    }

    /// Selected ids, in no particular order.
    pub fn selected(&self) -> impl Iterator<Item = &StudentId> {
        self.selected.iter()
    }

    /// Drop selected ids that are no longer in `records`, unchecking each.
    /// Returns how many were dropped.
    pub fn retain_listed(&mut self, records: &[Arc<StudentRecord>]) -> usize {
        let listed: HashSet<&StudentId> = records.iter().map(|r| &r.id).collect();
        let before = self.selected.len();
        self.selected.retain(|id| listed.contains(id));
        let dropped = before - self.selected.len();
        for _ in 0..dropped {
            self.on_toggle(false);
        }
        dropped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str) -> Arc<StudentRecord> {
        Arc::new(StudentRecord {
            id: id.into(),
            name: format!("n{id}"),
            code: format!("c{id}"),
            active: true,
        })
    }

    #[test]
    fn toggle_on_then_off_restores_count() {
        let mut sel = SelectionTracker::new();
        sel.on_toggle(true);
        sel.on_toggle(false);
        assert_eq!(sel.count(), 0);
    }

    #[test]
    fn count_is_not_clamped() {
        let mut sel = SelectionTracker::new();
        sel.on_toggle(false);
        sel.on_toggle(false);
        assert_eq!(sel.count(), -2);
        sel.on_toggle(true);
        assert_eq!(sel.count(), -1);
    }

    #[test]
    fn reset_zeroes_count_and_set() {
        let mut sel = SelectionTracker::new();
        sel.toggle(&"1".into());
        sel.on_toggle(false);
        sel.on_toggle(false);
        sel.reset();
        assert_eq!(sel.count(), 0);
        assert!(!sel.is_selected(&"1".into()));
    }

    #[test]
    fn identity_toggle_tracks_membership() {
        let mut sel = SelectionTracker::new();
        let a = StudentId::from("a");
        let b = StudentId::from("b");

        assert!(sel.toggle(&a));
        assert!(sel.toggle(&b));
        assert_eq!(sel.count(), 2);
        assert!(!sel.toggle(&a));
        assert_eq!(sel.count(), 1);
        assert!(sel.is_selected(&b));
        assert!(!sel.is_selected(&a));
    }

    #[test]
    fn retain_listed_prunes_missing_rows() {
        let mut sel = SelectionTracker::new();
        sel.toggle(&"1".into());
        sel.toggle(&"2".into());
        sel.toggle(&"3".into());

        let dropped = sel.retain_listed(&[record("2")]);
        assert_eq!(dropped, 2);
        assert_eq!(sel.count(), 1);
        assert!(sel.is_selected(&"2".into()));
    }

    #[test]
    fn retain_listed_leaves_raw_deltas_alone() {
        let mut sel = SelectionTracker::new();
        sel.on_toggle(true);
        sel.on_toggle(true);
        assert_eq!(sel.retain_listed(&[]), 0);
        assert_eq!(sel.count(), 2);
    }
}
