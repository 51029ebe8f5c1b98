#![forbid(unsafe_code)]

//! The pooled history list controller.
//!
//! [`HistoryList`] is the single owner of the layout, the expansion set, the
//! selection coordinator and the resize debouncer. The host feeds it events
//! one at a time, each stamped with the current time:
//!
//! ```text
//!  store change ──► set_entries ─┐
//!  header click ──► toggle_group ├──► layout / expansion / pending timers
//!  selection    ──► select ──────┘             │
//!  measurement  ──► measure_*                  ▼
//!  frame/timer  ──► tick ─────────► take_scroll_target / take_resize
//! ```
//!
//! Nothing blocks. [`HistoryList::next_wakeup`] tells the host how long it may
//! sleep before the next `tick` has work to do. In a multi-threaded host, keep
//! the list inside one task and send it events.

use std::time::{Duration, Instant};

use poolview_core::{ConfigError, EntryId, HistoryEntry, ListConfig};
use poolview_window::{GroupExpansionState, ListLayout, Row, WindowShape};

use crate::hooks::ListHooks;
use crate::resize_debouncer::{
    DebounceAction, DebounceConfig, DebouncerStats, ResizeDebouncer, ResizeRequest,
};
use crate::selection::{
    ScrollResolution, SelectionConfig, SelectionCoordinator, SelectionOutcome, SelectionStats,
};

/// Read-only snapshot for the rendering layer.
#[derive(Debug, Clone, Copy)]
pub struct ListView<'a> {
    pub layout: &'a ListLayout,
    pub expansion: &'a GroupExpansionState,
    pub selected: Option<EntryId>,
    /// Released scroll target, not yet taken.
    pub scroll_target: Option<EntryId>,
    /// A scroll is waiting for its delay.
    pub scroll_pending: bool,
    /// Ready resize, not yet taken.
    pub resize: Option<ResizeRequest>,
    /// A resize is waiting for its debounce window.
    pub resize_pending: bool,
    /// Bumped on every observable change.
    pub revision: u64,
    badge_limit: usize,
}

impl ListView<'_> {
    /// Rows in render order.
    #[must_use]
    pub fn rows(&self) -> Vec<Row> {
        self.layout.rows(self.expansion, self.badge_limit)
    }
}

/// Pooled history list state, driven by host events.
#[derive(Debug)]
pub struct HistoryList {
    config: ListConfig,
    shape: WindowShape,
    layout: ListLayout,
    expansion: GroupExpansionState,
    selection: SelectionCoordinator,
    debouncer: ResizeDebouncer,
    /// Applied by the debouncer, waiting for the host.
    ready_resize: Option<ResizeRequest>,
    hooks: ListHooks,
    revision: u64,
    active: bool,
    /// Latest time passed in by the host.
    clock: Option<Instant>,
}

impl HistoryList {
    /// Build an empty list. Fails if `config` has a zero head or group size.
    pub fn new(config: ListConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let shape = WindowShape::from_config(&config)?;
        Ok(Self {
            layout: ListLayout::empty(shape, config.pin_position),
            expansion: GroupExpansionState::new(),
            selection: SelectionCoordinator::new(SelectionConfig::from_list_config(&config)),
            debouncer: ResizeDebouncer::new(DebounceConfig::from_list_config(&config)),
            ready_resize: None,
            hooks: ListHooks::new(),
            revision: 0,
            active: false,
            clock: None,
            shape,
            config,
        })
    }

    /// Attach observer callbacks.
    #[must_use]
    pub fn with_hooks(mut self, hooks: ListHooks) -> Self {
        self.hooks = hooks;
        self
    }

    /// Replace the entry sequence after any store change.
    ///
    /// Re-partitions, prunes expansion indices past the new group count and
    /// signals a resize when the row structure changed. Returns `true` if
    /// anything visible changed.
    pub fn set_entries(&mut self, entries: &[HistoryEntry], now: Instant) -> bool {
        self.clock = Some(now);
        let layout = ListLayout::build(entries, self.shape, self.config.pin_position)
            .with_search_active(self.layout.search_active());
        if layout == self.layout {
            return false;
        }

        let old_groups = self.layout.window().group_count();
        let new_groups = layout.window().group_count();
        let structure_changed = !self.layout.same_structure(&layout);

        self.layout = layout;
        if new_groups < old_groups {
            self.expansion.prune(0..new_groups);
        }
        self.selection.retain_selection(&self.layout);
        self.selection.revalidate_target(&self.layout, &self.expansion);

        tracing::debug!(
            target: "poolview.list",
            listed = self.layout.window().len(),
            pinned = self.layout.pinned().len(),
            groups = new_groups,
            structure_changed,
            "entries updated"
        );

        self.bump();
        self.hooks.fire_layout_changed(&self.layout);
        if structure_changed {
            self.signal_resize(now);
        }
        true
    }

    /// Open or close pool group `index`. Out-of-range indices are ignored.
    ///
    /// Returns the new state (`true` = expanded).
    pub fn toggle_group(&mut self, index: usize, now: Instant) -> Option<bool> {
        if index >= self.layout.window().group_count() {
            tracing::trace!(target: "poolview.list", index, "toggle of stale group ignored");
            return None;
        }
        self.clock = Some(now);
        let expanded = self.expansion.toggle(index);
        self.selection.note_expansion_change(now);
        self.selection.revalidate_target(&self.layout, &self.expansion);
        tracing::debug!(target: "poolview.list", index, expanded, "group toggled");

        self.bump();
        self.hooks.fire_expansion_changed(index, expanded);
        self.signal_resize(now);
        Some(expanded)
    }

    /// Select `id`, expanding its group when needed.
    pub fn select(&mut self, id: EntryId, now: Instant) -> SelectionOutcome {
        self.clock = Some(now);
        let outcome = self
            .selection
            .select(id, &self.layout, &mut self.expansion, now);

        match outcome {
            SelectionOutcome::Unknown { .. } => return outcome,
            SelectionOutcome::ExpandedGroup { group, .. } => {
                self.hooks.fire_expansion_changed(group, true);
                self.signal_resize(now);
            }
            SelectionOutcome::ScrollScheduled { .. } | SelectionOutcome::Pinned { .. } => {}
        }

        self.bump();
        self.hooks.fire_selection_changed(id);
        outcome
    }

    /// The popup became active: select the first listed entry, else the
    /// first pinned one.
    pub fn activate(&mut self, now: Instant) -> Option<SelectionOutcome> {
        self.active = true;
        let first = self.layout.first_selectable()?;
        Some(self.select(first, now))
    }

    /// The popup went inactive. Any pending scroll is dropped.
    pub fn deactivate(&mut self) {
        self.active = false;
        self.selection.cancel();
    }

    /// Whether a search filter is applied; hides the pins separator.
    pub fn set_search_active(&mut self, active: bool, now: Instant) {
        self.clock = Some(now);
        if self.layout.search_active() == active {
            return;
        }
        let separator_before = self.layout.show_pins_separator();
        self.layout.set_search_active(active);
        self.bump();
        self.hooks.fire_layout_changed(&self.layout);
        if separator_before != self.layout.show_pins_separator() {
            self.signal_resize(now);
        }
    }

    /// Latest measured height of the scrolling list.
    pub fn measure_content_height(&mut self, height: f64) {
        self.debouncer.measure_content(height);
    }

    /// Latest measured height of the pinned section.
    pub fn measure_pinned_height(&mut self, height: f64) {
        self.debouncer.measure_pinned(height);
    }

    /// Release whatever is due. Returns `true` if a scroll target or resize
    /// became ready.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.clock = Some(now);
        let mut ready = false;

        if let Some(ScrollResolution::Scrolled(id)) =
            self.selection.tick(&self.layout, &self.expansion, now)
        {
            self.bump();
            self.hooks.fire_scroll_ready(id);
            ready = true;
        }

        if let DebounceAction::Apply(request) = self.debouncer.tick_at(now) {
            self.resize_ready(request);
            ready = true;
        }

        ready
    }

    /// Consume the released scroll target.
    pub fn take_scroll_target(&mut self) -> Option<EntryId> {
        self.selection.take_scroll_target()
    }

    /// Consume the ready resize.
    pub fn take_resize(&mut self) -> Option<ResizeRequest> {
        self.ready_resize.take()
    }

    /// How long the host may wait before the next `tick` has work.
    #[must_use]
    pub fn next_wakeup(&self, now: Instant) -> Option<Duration> {
        match (
            self.selection.time_until_scroll(now),
            self.debouncer.time_until_apply(now),
        ) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Tear down: cancel every pending timer, drop unconsumed requests and
    /// collapse all groups. Nothing fires afterwards until new events arrive.
    pub fn dismiss(&mut self) {
        let scroll_cancelled = self.selection.cancel();
        self.selection.clear_scroll_target();
        // A resize can only be pending after a timestamped signal.
        let resize_cancelled = self
            .clock
            .is_some_and(|now| self.debouncer.cancel_at(now));
        self.ready_resize = None;
        self.expansion.clear();
        self.active = false;
        tracing::debug!(
            target: "poolview.list",
            scroll_cancelled,
            resize_cancelled,
            "list dismissed"
        );
        self.bump();
    }

    /// Snapshot for rendering.
    #[must_use]
    pub fn view(&self) -> ListView<'_> {
        ListView {
            layout: &self.layout,
            expansion: &self.expansion,
            selected: self.selection.selected(),
            scroll_target: self.selection.scroll_target(),
            scroll_pending: self.selection.pending().is_some(),
            resize: self.ready_resize,
            resize_pending: self.debouncer.is_pending(),
            revision: self.revision,
            badge_limit: self.config.badge_limit,
        }
    }

    #[must_use]
    pub fn layout(&self) -> &ListLayout {
        &self.layout
    }

    #[must_use]
    pub fn expansion(&self) -> &GroupExpansionState {
        &self.expansion
    }

    #[must_use]
    pub fn config(&self) -> &ListConfig {
        &self.config
    }

    #[must_use]
    pub fn selected(&self) -> Option<EntryId> {
        self.selection.selected()
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    #[must_use]
    pub fn selection_stats(&self) -> SelectionStats {
        self.selection.stats()
    }

    #[must_use]
    pub fn resize_stats(&self) -> DebouncerStats {
        self.debouncer.stats()
    }

    fn signal_resize(&mut self, now: Instant) {
        if let DebounceAction::Apply(request) = self.debouncer.signal_at(now) {
            self.resize_ready(request);
        }
    }

    fn resize_ready(&mut self, request: ResizeRequest) {
        self.ready_resize = Some(request);
        self.bump();
        self.hooks.fire_resize_ready(&request);
    }

    fn bump(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}
