#![forbid(unsafe_code)]

//! Clipboard history entries as seen by the windowing logic.
//!
//! Entries are owned by the external history store. The list logic only reads
//! them: it filters on [`HistoryEntry::is_visible`] and
//! [`HistoryEntry::is_pinned`] and keeps [`EntryId`]s, never the entries
//! themselves.

use std::fmt;

/// Opaque identifier of a history entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct EntryId(u64);

impl EntryId {
    /// Wrap a raw store identifier.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw store identifier.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for EntryId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "entry:{}", self.0)
    }
}

/// One clipboard history record.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HistoryEntry {
    id: EntryId,
    title: String,
    #[cfg_attr(feature = "serde", serde(default = "visible_by_default"))]
    visible: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pinned: bool,
}

#[cfg(feature = "serde")]
fn visible_by_default() -> bool {
    true
}

impl HistoryEntry {
    /// Create a visible, unpinned entry.
    pub fn new(id: impl Into<EntryId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            visible: true,
            pinned: false,
        }
    }

    /// Set whether the entry passes the store's current filter.
    #[must_use]
    pub fn visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// Set whether the entry is pinned.
    #[must_use]
    pub fn pinned(mut self, pinned: bool) -> Self {
        self.pinned = pinned;
        self
    }

    #[must_use]
    pub fn id(&self) -> EntryId {
        self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    #[must_use]
    pub fn is_pinned(&self) -> bool {
        self.pinned
    }

    /// Visible and not pinned: the entry belongs to the scrolling list.
    #[must_use]
    pub fn is_listed(&self) -> bool {
        self.visible && !self.pinned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_entry_is_visible_and_unpinned() {
        let entry = HistoryEntry::new(7, "hello");
        assert_eq!(entry.id(), EntryId::new(7));
        assert_eq!(entry.title(), "hello");
        assert!(entry.is_visible());
        assert!(!entry.is_pinned());
        assert!(entry.is_listed());
    }

    #[test]
    fn pinned_or_hidden_entries_are_not_listed() {
        assert!(!HistoryEntry::new(1, "a").pinned(true).is_listed());
        assert!(!HistoryEntry::new(2, "b").visible(false).is_listed());
    }

    #[test]
    fn entry_id_display() {
        assert_eq!(EntryId::new(42).to_string(), "entry:42");
        assert_eq!(EntryId::from(42).get(), 42);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn entry_deserializes_with_defaults() {
        let entry: HistoryEntry = serde_json::from_str(r#"{"id":3,"title":"x"}"#).unwrap();
        assert_eq!(entry, HistoryEntry::new(3, "x"));
    }
}
