#![forbid(unsafe_code)]

//! Head/pool-group partition of the listed history.
//!
//! A [`HistoryWindow`] takes the listed entries (visible and unpinned, in store
//! order) and splits them into:
//!
//! - a **head** of the first `K` entries, shown as plain rows, and
//! - consecutive **pool groups** of `G` entries each covering the rest; only
//!   the last group may be shorter.
//!
//! ```text
//!  N = 25, K = 10, G = 10
//!
//!  listed:  0 1 2 3 4 5 6 7 8 9 | 10 .. 19 | 20 .. 24
//!           \______ head ______/ \ group 0/ \group 1/
//! ```
//!
//! # Invariants
//!
//! - `head().len() == min(N, K)`
//! - `group_count() == ceil(max(0, N - K) / G)`
//! - every group but the last holds exactly `G` entries
//! - head followed by all groups reproduces the listed sequence
//! - partitioning is a pure function: the same input always yields the same
//!   boundaries
//!
//! The window stores [`EntryId`]s only; entries stay owned by the store.

use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::ops::Range;

use poolview_core::config::{DEFAULT_GROUP_SIZE, DEFAULT_HEAD_SIZE};
use poolview_core::{ConfigError, EntryId, HistoryEntry, ListConfig};

/// Partition constants: head size `K` and group size `G`, both non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowShape {
    head_size: NonZeroUsize,
    group_size: NonZeroUsize,
}

impl Default for WindowShape {
    fn default() -> Self {
        const HEAD: NonZeroUsize = NonZeroUsize::new(DEFAULT_HEAD_SIZE).unwrap();
        const GROUP: NonZeroUsize = NonZeroUsize::new(DEFAULT_GROUP_SIZE).unwrap();
        Self {
            head_size: HEAD,
            group_size: GROUP,
        }
    }
}

impl WindowShape {
    /// Build a shape, rejecting zero sizes.
    pub fn new(head_size: usize, group_size: usize) -> Result<Self, ConfigError> {
        Ok(Self {
            head_size: NonZeroUsize::new(head_size).ok_or(ConfigError::ZeroHeadSize)?,
            group_size: NonZeroUsize::new(group_size).ok_or(ConfigError::ZeroGroupSize)?,
        })
    }

    /// Take `head_size` and `group_size` from a [`ListConfig`].
    pub fn from_config(config: &ListConfig) -> Result<Self, ConfigError> {
        Self::new(config.head_size, config.group_size)
    }

    #[inline]
    #[must_use]
    pub fn head_size(&self) -> usize {
        self.head_size.get()
    }

    #[inline]
    #[must_use]
    pub fn group_size(&self) -> usize {
        self.group_size.get()
    }
}

/// Where a listed entry sits in the partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Location {
    /// Row `row` of the head segment.
    Head { row: usize },
    /// Position `offset` inside pool group `group`.
    Pool { group: usize, offset: usize },
}

impl Location {
    /// The pool group index, if the entry is pooled.
    #[must_use]
    pub const fn group(self) -> Option<usize> {
        match self {
            Self::Head { .. } => None,
            Self::Pool { group, .. } => Some(group),
        }
    }
}

/// Head/pool-group partition of the listed entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryWindow {
    ids: Vec<EntryId>,
    shape: WindowShape,
    head_len: usize,
    /// First position of each id in `ids`.
    positions: HashMap<EntryId, usize>,
}

impl HistoryWindow {
    /// An empty window.
    #[must_use]
    pub fn empty(shape: WindowShape) -> Self {
        Self {
            ids: Vec::new(),
            shape,
            head_len: 0,
            positions: HashMap::new(),
        }
    }

    /// Partition the listed (visible, unpinned) entries of `entries`.
    pub fn partition(entries: &[HistoryEntry], shape: WindowShape) -> Self {
        Self::from_ids(
            entries
                .iter()
                .filter(|e| e.is_listed())
                .map(HistoryEntry::id),
            shape,
        )
    }

    /// Partition an already-filtered id sequence.
    pub fn from_ids(ids: impl IntoIterator<Item = EntryId>, shape: WindowShape) -> Self {
        let ids: Vec<EntryId> = ids.into_iter().collect();
        let head_len = ids.len().min(shape.head_size());

        let mut positions = HashMap::with_capacity(ids.len());
        for (pos, id) in ids.iter().enumerate() {
            positions.entry(*id).or_insert(pos);
        }

        let window = Self {
            ids,
            shape,
            head_len,
            positions,
        };
        poolview_core::trace!(
            target: "poolview.window",
            listed = window.len(),
            head = window.head_len,
            groups = window.group_count(),
            "partitioned history"
        );
        window
    }

    #[inline]
    #[must_use]
    pub fn shape(&self) -> WindowShape {
        self.shape
    }

    /// Number of listed entries (head plus pool).
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// All listed ids in order.
    #[must_use]
    pub fn ids(&self) -> &[EntryId] {
        &self.ids
    }

    /// Head followed by every group, in listed order.
    pub fn iter(&self) -> impl Iterator<Item = EntryId> + '_ {
        self.ids.iter().copied()
    }

    /// The directly visible rows.
    #[must_use]
    pub fn head(&self) -> &[EntryId] {
        &self.ids[..self.head_len]
    }

    /// Entries past the head.
    #[must_use]
    pub fn pool(&self) -> &[EntryId] {
        &self.ids[self.head_len..]
    }

    /// Number of pool groups.
    #[must_use]
    pub fn group_count(&self) -> usize {
        self.pool().len().div_ceil(self.shape.group_size())
    }

    /// Group `index`, if it exists.
    #[must_use]
    pub fn group(&self, index: usize) -> Option<PoolGroup<'_>> {
        let pool = self.pool();
        let size = self.shape.group_size();
        let start = index.checked_mul(size)?;
        if start >= pool.len() {
            return None;
        }
        let end = start.saturating_add(size).min(pool.len());
        Some(PoolGroup {
            index,
            entries: &pool[start..end],
            pool_start: start,
            head_len: self.head_len,
        })
    }

    /// All pool groups in order.
    pub fn groups(&self) -> impl ExactSizeIterator<Item = PoolGroup<'_>> + '_ {
        let size = self.shape.group_size();
        let head_len = self.head_len;
        self.pool()
            .chunks(size)
            .enumerate()
            .map(move |(index, entries)| PoolGroup {
                index,
                entries,
                pool_start: index * size,
                head_len,
            })
    }

    /// Group boundaries as ranges into the listed sequence.
    #[must_use]
    pub fn group_ranges(&self) -> Vec<Range<usize>> {
        self.groups().map(|g| g.range()).collect()
    }

    #[must_use]
    pub fn contains(&self, id: EntryId) -> bool {
        self.positions.contains_key(&id)
    }

    /// Find where `id` sits. Duplicate ids resolve to their first position.
    #[must_use]
    pub fn locate(&self, id: EntryId) -> Option<Location> {
        let pos = *self.positions.get(&id)?;
        if pos < self.head_len {
            return Some(Location::Head { row: pos });
        }
        let pool_index = pos - self.head_len;
        let size = self.shape.group_size();
        Some(Location::Pool {
            group: pool_index / size,
            offset: pool_index % size,
        })
    }

    /// 1-based position of `id` in the listed sequence.
    #[must_use]
    pub fn ordinal(&self, id: EntryId) -> Option<usize> {
        self.positions.get(&id).map(|pos| pos + 1)
    }

    /// Whether `other` would lay out the same rows (same shape, same count).
    #[must_use]
    pub fn same_partition(&self, other: &Self) -> bool {
        self.shape == other.shape && self.ids.len() == other.ids.len()
    }
}

/// A borrowed view of one pool group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolGroup<'a> {
    index: usize,
    entries: &'a [EntryId],
    /// Pool index of the first entry.
    pool_start: usize,
    head_len: usize,
}

impl<'a> PoolGroup<'a> {
    #[inline]
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn entries(&self) -> &'a [EntryId] {
        self.entries
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Range of this group in the listed sequence.
    #[must_use]
    pub fn range(&self) -> Range<usize> {
        let start = self.head_len + self.pool_start;
        start..start + self.entries.len()
    }

    /// 0-based index across all pool entries.
    #[must_use]
    pub fn pool_index(&self, offset: usize) -> Option<usize> {
        (offset < self.entries.len()).then(|| self.pool_start + offset)
    }

    /// 1-based position in the whole listed sequence.
    #[must_use]
    pub fn ordinal(&self, offset: usize) -> Option<usize> {
        self.pool_index(offset)
            .map(|pool_index| self.head_len + pool_index + 1)
    }

    /// Ordinal to show as a badge; only the first `limit` pool entries get one.
    #[must_use]
    pub fn badge(&self, offset: usize, limit: usize) -> Option<usize> {
        let pool_index = self.pool_index(offset)?;
        if pool_index < limit {
            self.ordinal(offset)
        } else {
            None
        }
    }

    #[must_use]
    pub fn header_label(&self) -> String {
        format!("Pool Group {}", self.index + 1)
    }

    #[must_use]
    pub fn count_label(&self) -> String {
        format!("{} items", self.entries.len())
    }

    /// Tooltip text for the entry at `offset`.
    #[must_use]
    pub fn help_label(&self, offset: usize) -> Option<String> {
        self.ordinal(offset)
            .map(|ordinal| format!("History pool item #{ordinal}"))
    }
}
