#![forbid(unsafe_code)]

//! Expanded/collapsed state of pool groups.
//!
//! A plain set of group indices. Every group starts collapsed. The owner calls
//! [`GroupExpansionState::prune`] whenever the group count shrinks so that
//! stale indices never resurface as expanded when the list grows again.

use std::collections::BTreeSet;
use std::ops::Range;

/// Set of expanded pool group indices.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupExpansionState {
    expanded: BTreeSet<usize>,
}

impl GroupExpansionState {
    /// All groups collapsed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `index` expanded. Returns `true` if it was collapsed before.
    pub fn insert(&mut self, index: usize) -> bool {
        self.expanded.insert(index)
    }

    /// Mark `index` collapsed. Returns `true` if it was expanded before.
    pub fn remove(&mut self, index: usize) -> bool {
        self.expanded.remove(&index)
    }

    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        self.expanded.contains(&index)
    }

    /// Flip `index`. Returns the new state (`true` = expanded).
    pub fn toggle(&mut self, index: usize) -> bool {
        if self.expanded.remove(&index) {
            false
        } else {
            self.expanded.insert(index);
            true
        }
    }

    /// Drop every index outside `valid`. Returns how many were removed.
    pub fn prune(&mut self, valid: Range<usize>) -> usize {
        let before = self.expanded.len();
        self.expanded.retain(|index| valid.contains(index));
        let removed = before - self.expanded.len();
        if removed > 0 {
            poolview_core::debug!(
                target: "poolview.window",
                removed,
                valid_end = valid.end,
                "pruned stale group indices"
            );
        }
        removed
    }

    /// Collapse everything.
    pub fn clear(&mut self) {
        self.expanded.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.expanded.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.expanded.is_empty()
    }

    /// Expanded indices in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.expanded.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_collapsed() {
        let state = GroupExpansionState::new();
        assert!(state.is_empty());
        assert!(!state.contains(0));
    }

    #[test]
    fn insert_remove_report_change() {
        let mut state = GroupExpansionState::new();
        assert!(state.insert(2));
        assert!(!state.insert(2));
        assert!(state.contains(2));
        assert!(state.remove(2));
        assert!(!state.remove(2));
    }

    #[test]
    fn toggle_twice_restores_membership() {
        let mut state = GroupExpansionState::new();
        state.insert(4);
        assert!(!state.toggle(4));
        assert!(state.toggle(4));
        assert!(state.contains(4));

        assert!(state.toggle(1));
        assert!(!state.toggle(1));
        assert!(!state.contains(1));
    }

    #[test]
    fn prune_keeps_valid_indices() {
        let mut state = GroupExpansionState::new();
        for i in [0, 1, 3, 5, 8] {
            state.insert(i);
        }
        assert_eq!(state.prune(0..4), 2);
        assert_eq!(state.iter().collect::<Vec<_>>(), vec![0, 1, 3]);
        assert_eq!(state.prune(0..4), 0);
    }

    #[test]
    fn prune_to_empty_range_clears() {
        let mut state = GroupExpansionState::new();
        state.insert(0);
        state.prune(0..0);
        assert!(state.is_empty());
    }
}
