#![forbid(unsafe_code)]

//! Selection to scroll coordination.
//!
//! Selecting an entry must bring it on screen. Where it lives decides how:
//!
//! | Location | Action |
//! |----------|--------|
//! | head, or an expanded group | scroll after `scroll_delay` |
//! | collapsed group | expand the group, scroll after `settle_delay` |
//! | pinned section | nothing, pinned rows are always visible |
//! | not in the layout | ignored |
//!
//! # Invariants
//!
//! - A scroll is never released for a row inside a collapsed group. The
//!   location is checked again when the pending scroll fires; if the group
//!   was collapsed in the meantime, or the entry vanished, the scroll is
//!   dropped.
//! - No scroll is released before the most recent expansion has settled.
//! - Last write wins: a new selection replaces the pending scroll.
//! - [`SelectionCoordinator::cancel`] discards the pending scroll with no
//!   other effect.
//! - The scroll target is fire-once: [`SelectionCoordinator::take_scroll_target`]
//!   hands it out a single time. A new selection discards an untaken target,
//!   and [`SelectionCoordinator::revalidate_target`] drops one whose row left
//!   the screen.

use std::time::{Duration, Instant};

use poolview_core::{EntryId, ListConfig};
use poolview_window::{GroupExpansionState, ListLayout, Placement};

use crate::deadline::Deadline;

/// Timing for selection-driven scrolls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionConfig {
    /// Wait after an expansion before scrolling (ms).
    pub settle_delay_ms: u64,
    /// Wait before scrolling to a row that is already laid out (ms).
    pub scroll_delay_ms: u64,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            settle_delay_ms: poolview_core::config::DEFAULT_SETTLE_DELAY_MS,
            scroll_delay_ms: poolview_core::config::DEFAULT_SCROLL_DELAY_MS,
        }
    }
}

impl SelectionConfig {
    #[must_use]
    pub fn from_list_config(config: &ListConfig) -> Self {
        Self {
            settle_delay_ms: config.settle_delay_ms,
            scroll_delay_ms: config.scroll_delay_ms,
        }
    }

    #[must_use]
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    #[must_use]
    pub fn scroll_delay(&self) -> Duration {
        Duration::from_millis(self.scroll_delay_ms)
    }
}

/// What [`SelectionCoordinator::select`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionOutcome {
    /// The row is laid out; a scroll is pending until `due`.
    ScrollScheduled { id: EntryId, due: Instant },
    /// The row's group was collapsed and has been expanded; a scroll is
    /// pending until `due`.
    ExpandedGroup {
        id: EntryId,
        group: usize,
        due: Instant,
    },
    /// Pinned rows are always visible.
    Pinned { id: EntryId },
    /// Not in the current layout.
    Unknown { id: EntryId },
}

/// Why a pending scroll was not released.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    /// The entry is no longer in the scrolling list.
    Vanished,
    /// The entry's group was collapsed before the scroll fired.
    Collapsed,
}

/// Result of a pending scroll firing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollResolution {
    /// The scroll target is ready to be taken.
    Scrolled(EntryId),
    /// The scroll was dropped.
    Dropped { id: EntryId, reason: DropReason },
}

/// Counters over the coordinator's lifetime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectionStats {
    pub expansions_requested: u64,
    pub scrolls_released: u64,
    pub superseded: u64,
    pub dropped: u64,
    pub cancelled: u64,
}

/// Maps selection changes to expansion and scroll requests.
#[derive(Debug, Clone)]
pub struct SelectionCoordinator {
    config: SelectionConfig,
    selected: Option<EntryId>,
    /// Entry waiting for its scroll deadline.
    pending: Option<EntryId>,
    deadline: Deadline,
    /// No scroll may be released before this point.
    settle_until: Option<Instant>,
    /// Released, not yet taken.
    scroll_target: Option<EntryId>,
    stats: SelectionStats,
}

impl SelectionCoordinator {
    #[must_use]
    pub fn new(config: SelectionConfig) -> Self {
        Self {
            config,
            selected: None,
            pending: None,
            deadline: Deadline::new(),
            settle_until: None,
            scroll_target: None,
            stats: SelectionStats::default(),
        }
    }

    /// Select `id`, expanding its group first when it is collapsed.
    pub fn select(
        &mut self,
        id: EntryId,
        layout: &ListLayout,
        expansion: &mut GroupExpansionState,
        now: Instant,
    ) -> SelectionOutcome {
        let Some(placement) = layout.placement(id) else {
            tracing::debug!(target: "poolview.selection", %id, "selection not in layout");
            return SelectionOutcome::Unknown { id };
        };

        self.selected = Some(id);
        if let Some(stale) = self.scroll_target.take() {
            self.stats.superseded += 1;
            tracing::trace!(
                target: "poolview.selection",
                %stale,
                %id,
                "untaken scroll target superseded"
            );
        }
        if let Some(previous) = self.pending.take() {
            self.deadline.cancel();
            self.stats.superseded += 1;
            tracing::trace!(
                target: "poolview.selection",
                %previous,
                %id,
                "pending scroll superseded"
            );
        }

        let location = match placement {
            Placement::Pinned { .. } => return SelectionOutcome::Pinned { id },
            Placement::Listed(location) => location,
        };

        let expanded_group = match location.group() {
            Some(group) if !expansion.contains(group) => {
                expansion.insert(group);
                self.stats.expansions_requested += 1;
                self.note_expansion_change(now);
                Some(group)
            }
            _ => None,
        };

        let due = self.release_time(now);
        self.pending = Some(id);
        self.deadline.arm_at(due);

        match expanded_group {
            Some(group) => {
                tracing::debug!(
                    target: "poolview.selection",
                    %id,
                    group,
                    "expanded collapsed group for selection"
                );
                SelectionOutcome::ExpandedGroup { id, group, due }
            }
            None => SelectionOutcome::ScrollScheduled { id, due },
        }
    }

    /// Record that some group started animating open or closed. Pending and
    /// future scrolls wait until it settles.
    pub fn note_expansion_change(&mut self, now: Instant) {
        let until = now + self.config.settle_delay();
        self.settle_until = Some(self.settle_until.map_or(until, |s| s.max(until)));

        if self.pending.is_some()
            && let Some(due) = self.deadline.due()
            && due < until
        {
            self.deadline.arm_at(until);
        }
    }

    /// Fire the pending scroll if it is due.
    pub fn tick(
        &mut self,
        layout: &ListLayout,
        expansion: &GroupExpansionState,
        now: Instant,
    ) -> Option<ScrollResolution> {
        if !self.deadline.fire_if_due(now) {
            return None;
        }
        let id = self.pending.take()?;

        if let Some(reason) = unreachable_reason(id, layout, expansion) {
            self.stats.dropped += 1;
            tracing::debug!(target: "poolview.selection", %id, ?reason, "pending scroll dropped");
            return Some(ScrollResolution::Dropped { id, reason });
        }

        self.scroll_target = Some(id);
        self.stats.scrolls_released += 1;
        tracing::debug!(target: "poolview.selection", %id, "scroll_release");
        Some(ScrollResolution::Scrolled(id))
    }

    /// Discard the pending scroll. Returns `true` if one was pending.
    pub fn cancel(&mut self) -> bool {
        self.deadline.cancel();
        if self.pending.take().is_some() {
            self.stats.cancelled += 1;
            true
        } else {
            false
        }
    }

    /// Forget the selection if its entry left the layout.
    pub fn retain_selection(&mut self, layout: &ListLayout) {
        if self.selected.is_some_and(|id| layout.placement(id).is_none()) {
            self.selected = None;
        }
    }

    /// Drop a released but untaken scroll target whose row is no longer on
    /// screen. Call after the layout or expansion set changed.
    pub fn revalidate_target(
        &mut self,
        layout: &ListLayout,
        expansion: &GroupExpansionState,
    ) -> Option<ScrollResolution> {
        let id = self.scroll_target?;
        let reason = unreachable_reason(id, layout, expansion)?;
        self.scroll_target = None;
        self.stats.dropped += 1;
        tracing::debug!(target: "poolview.selection", %id, ?reason, "released scroll target dropped");
        Some(ScrollResolution::Dropped { id, reason })
    }

    /// Hand out the released scroll target once.
    pub fn take_scroll_target(&mut self) -> Option<EntryId> {
        self.scroll_target.take()
    }

    /// Drop a released but untaken scroll target.
    pub fn clear_scroll_target(&mut self) {
        self.scroll_target = None;
    }

    /// Peek at the released scroll target without consuming it.
    #[must_use]
    pub fn scroll_target(&self) -> Option<EntryId> {
        self.scroll_target
    }

    #[must_use]
    pub fn selected(&self) -> Option<EntryId> {
        self.selected
    }

    /// Entry waiting for its scroll.
    #[must_use]
    pub fn pending(&self) -> Option<EntryId> {
        self.pending
    }

    #[must_use]
    pub fn time_until_scroll(&self, now: Instant) -> Option<Duration> {
        self.pending.and(self.deadline.remaining(now))
    }

    #[must_use]
    pub fn config(&self) -> SelectionConfig {
        self.config
    }

    #[must_use]
    pub fn stats(&self) -> SelectionStats {
        self.stats
    }

    fn release_time(&self, now: Instant) -> Instant {
        let earliest = now + self.config.scroll_delay();
        match self.settle_until {
            Some(settle) if settle > earliest => settle,
            _ => earliest,
        }
    }
}

/// Why `id` cannot be scrolled to under `layout`/`expansion`, if it cannot.
fn unreachable_reason(
    id: EntryId,
    layout: &ListLayout,
    expansion: &GroupExpansionState,
) -> Option<DropReason> {
    match layout.window().locate(id) {
        None => Some(DropReason::Vanished),
        Some(location) => location
            .group()
            .filter(|&group| !expansion.contains(group))
            .map(|_| DropReason::Collapsed),
    }
}
