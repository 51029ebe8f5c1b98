#![forbid(unsafe_code)]

//! Full list layout: pinned section plus the pooled history window.
//!
//! Pinned entries live outside the scrolling list, above or below it
//! depending on [`PinPosition`]. A divider separates the two sections only
//! when both are populated and no search is active.
//!
//! [`ListLayout::rows`] flattens everything into the order a renderer draws
//! it, honoring the expansion state.

use poolview_core::{EntryId, HistoryEntry, PinPosition};

use crate::expansion::GroupExpansionState;
use crate::history_window::{HistoryWindow, Location, WindowShape};

/// Visible pinned entries in store order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PinnedSection {
    ids: Vec<EntryId>,
    position: PinPosition,
}

impl PinnedSection {
    /// Collect visible pinned entries from `entries`.
    pub fn collect(entries: &[HistoryEntry], position: PinPosition) -> Self {
        Self {
            ids: entries
                .iter()
                .filter(|e| e.is_visible() && e.is_pinned())
                .map(HistoryEntry::id)
                .collect(),
            position,
        }
    }

    #[must_use]
    pub fn ids(&self) -> &[EntryId] {
        &self.ids
    }

    #[must_use]
    pub fn position(&self) -> PinPosition {
        self.position
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Row of `id` inside the pinned section.
    #[must_use]
    pub fn row_of(&self, id: EntryId) -> Option<usize> {
        self.ids.iter().position(|&pinned| pinned == id)
    }
}

/// Where an entry is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// In the pinned section; always on screen.
    Pinned { row: usize },
    /// In the scrolling list.
    Listed(Location),
}

/// One drawable row, in render order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Row {
    Pinned {
        id: EntryId,
    },
    Separator,
    Head {
        id: EntryId,
        row: usize,
    },
    GroupHeader {
        group: usize,
        len: usize,
        expanded: bool,
    },
    PoolEntry {
        id: EntryId,
        group: usize,
        pool_index: usize,
        ordinal: usize,
        badge: Option<usize>,
    },
}

/// Pinned section plus history window, rebuilt on every store change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListLayout {
    window: HistoryWindow,
    pinned: PinnedSection,
    search_active: bool,
}

impl ListLayout {
    /// Split `entries` into the pinned section and the pooled window.
    pub fn build(entries: &[HistoryEntry], shape: WindowShape, pin_position: PinPosition) -> Self {
        Self {
            window: HistoryWindow::partition(entries, shape),
            pinned: PinnedSection::collect(entries, pin_position),
            search_active: false,
        }
    }

    /// A layout with nothing in it.
    #[must_use]
    pub fn empty(shape: WindowShape, pin_position: PinPosition) -> Self {
        Self {
            window: HistoryWindow::empty(shape),
            pinned: PinnedSection {
                ids: Vec::new(),
                position: pin_position,
            },
            search_active: false,
        }
    }

    #[must_use]
    pub fn with_search_active(mut self, active: bool) -> Self {
        self.search_active = active;
        self
    }

    pub fn set_search_active(&mut self, active: bool) {
        self.search_active = active;
    }

    #[must_use]
    pub fn search_active(&self) -> bool {
        self.search_active
    }

    #[must_use]
    pub fn window(&self) -> &HistoryWindow {
        &self.window
    }

    #[must_use]
    pub fn pinned(&self) -> &PinnedSection {
        &self.pinned
    }

    /// Divider between pinned and listed entries.
    #[must_use]
    pub fn show_pins_separator(&self) -> bool {
        !self.pinned.is_empty() && !self.window.is_empty() && !self.search_active
    }

    /// Where `id` is drawn, if it is drawn at all.
    #[must_use]
    pub fn placement(&self, id: EntryId) -> Option<Placement> {
        if let Some(location) = self.window.locate(id) {
            return Some(Placement::Listed(location));
        }
        self.pinned.row_of(id).map(|row| Placement::Pinned { row })
    }

    /// Default selection when the popup opens: first listed entry, otherwise
    /// the first pinned one.
    #[must_use]
    pub fn first_selectable(&self) -> Option<EntryId> {
        self.window
            .ids()
            .first()
            .or_else(|| self.pinned.ids().first())
            .copied()
    }

    /// Whether `other` occupies the same rows (ids may differ).
    #[must_use]
    pub fn same_structure(&self, other: &Self) -> bool {
        self.window.same_partition(&other.window)
            && self.pinned.len() == other.pinned.len()
            && self.pinned.position == other.pinned.position
            && self.show_pins_separator() == other.show_pins_separator()
    }

    /// Flatten into render order. Collapsed groups contribute only a header.
    #[must_use]
    pub fn rows(&self, expansion: &GroupExpansionState, badge_limit: usize) -> Vec<Row> {
        let mut rows = Vec::with_capacity(self.pinned.len() + self.window.len() + 1);

        if self.pinned.position == PinPosition::Top {
            self.push_pinned(&mut rows);
        }

        rows.extend(
            self.window
                .head()
                .iter()
                .enumerate()
                .map(|(row, &id)| Row::Head { id, row }),
        );

        for group in self.window.groups() {
            let expanded = expansion.contains(group.index());
            rows.push(Row::GroupHeader {
                group: group.index(),
                len: group.len(),
                expanded,
            });
            if !expanded {
                continue;
            }
            for (offset, &id) in group.entries().iter().enumerate() {
                let (Some(pool_index), Some(ordinal)) =
                    (group.pool_index(offset), group.ordinal(offset))
                else {
                    continue;
                };
                rows.push(Row::PoolEntry {
                    id,
                    group: group.index(),
                    pool_index,
                    ordinal,
                    badge: group.badge(offset, badge_limit),
                });
            }
        }

        if self.pinned.position == PinPosition::Bottom {
            self.push_pinned(&mut rows);
        }

        rows
    }

    fn push_pinned(&self, rows: &mut Vec<Row>) {
        let separator = self.show_pins_separator();
        if separator && self.pinned.position == PinPosition::Bottom {
            rows.push(Row::Separator);
        }
        rows.extend(self.pinned.ids.iter().map(|&id| Row::Pinned { id }));
        if separator && self.pinned.position == PinPosition::Top {
            rows.push(Row::Separator);
        }
    }
}
