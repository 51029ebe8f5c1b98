#![forbid(unsafe_code)]

//! Observer callbacks for the rendering layer.
//!
//! The renderer owns none of the list state. It registers callbacks here and
//! redraws from [`HistoryList::view`](crate::list::HistoryList::view) when one
//! fires.
//!
//! ```
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use poolview_runtime::ListHooks;
//!
//! let redraws = Arc::new(AtomicUsize::new(0));
//! let counter = Arc::clone(&redraws);
//! let hooks = ListHooks::new()
//!     .on_layout_changed(move |_| { counter.fetch_add(1, Ordering::Relaxed); })
//!     .on_scroll_ready(|id| println!("scroll to {id}"));
//! assert!(hooks.has_layout_changed());
//! ```

use poolview_core::EntryId;
use poolview_window::ListLayout;

use crate::resize_debouncer::ResizeRequest;

type OnLayoutChanged = Box<dyn Fn(&ListLayout) + Send + Sync>;
type OnExpansionChanged = Box<dyn Fn(usize, bool) + Send + Sync>;
type OnSelectionChanged = Box<dyn Fn(EntryId) + Send + Sync>;
type OnScrollReady = Box<dyn Fn(EntryId) + Send + Sync>;
type OnResizeReady = Box<dyn Fn(&ResizeRequest) + Send + Sync>;

/// Callbacks fired by [`HistoryList`](crate::list::HistoryList).
#[derive(Default)]
pub struct ListHooks {
    on_layout_changed: Option<OnLayoutChanged>,
    on_expansion_changed: Option<OnExpansionChanged>,
    on_selection_changed: Option<OnSelectionChanged>,
    on_scroll_ready: Option<OnScrollReady>,
    on_resize_ready: Option<OnResizeReady>,
}

impl std::fmt::Debug for ListHooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListHooks")
            .field("on_layout_changed", &self.on_layout_changed.is_some())
            .field("on_expansion_changed", &self.on_expansion_changed.is_some())
            .field("on_selection_changed", &self.on_selection_changed.is_some())
            .field("on_scroll_ready", &self.on_scroll_ready.is_some())
            .field("on_resize_ready", &self.on_resize_ready.is_some())
            .finish()
    }
}

impl ListHooks {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Called after the entry list was re-partitioned.
    #[must_use]
    pub fn on_layout_changed<F>(mut self, callback: F) -> Self
    where
        F: Fn(&ListLayout) + Send + Sync + 'static,
    {
        self.on_layout_changed = Some(Box::new(callback));
        self
    }

    /// Called with `(group, expanded)` whenever a group opens or closes.
    #[must_use]
    pub fn on_expansion_changed<F>(mut self, callback: F) -> Self
    where
        F: Fn(usize, bool) + Send + Sync + 'static,
    {
        self.on_expansion_changed = Some(Box::new(callback));
        self
    }

    #[must_use]
    pub fn on_selection_changed<F>(mut self, callback: F) -> Self
    where
        F: Fn(EntryId) + Send + Sync + 'static,
    {
        self.on_selection_changed = Some(Box::new(callback));
        self
    }

    /// Called when a scroll target has been released.
    #[must_use]
    pub fn on_scroll_ready<F>(mut self, callback: F) -> Self
    where
        F: Fn(EntryId) + Send + Sync + 'static,
    {
        self.on_scroll_ready = Some(Box::new(callback));
        self
    }

    /// Called when a debounced resize is ready to apply.
    #[must_use]
    pub fn on_resize_ready<F>(mut self, callback: F) -> Self
    where
        F: Fn(&ResizeRequest) + Send + Sync + 'static,
    {
        self.on_resize_ready = Some(Box::new(callback));
        self
    }

    #[must_use]
    pub fn has_layout_changed(&self) -> bool {
        self.on_layout_changed.is_some()
    }

    pub(crate) fn fire_layout_changed(&self, layout: &ListLayout) {
        if let Some(ref cb) = self.on_layout_changed {
            cb(layout);
        }
    }

    pub(crate) fn fire_expansion_changed(&self, group: usize, expanded: bool) {
        if let Some(ref cb) = self.on_expansion_changed {
            cb(group, expanded);
        }
    }

    pub(crate) fn fire_selection_changed(&self, id: EntryId) {
        if let Some(ref cb) = self.on_selection_changed {
            cb(id);
        }
    }

    pub(crate) fn fire_scroll_ready(&self, id: EntryId) {
        if let Some(ref cb) = self.on_scroll_ready {
            cb(id);
        }
    }

    pub(crate) fn fire_resize_ready(&self, request: &ResizeRequest) {
        if let Some(ref cb) = self.on_resize_ready {
            cb(request);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_lists_registered_callbacks() {
        let hooks = ListHooks::new().on_scroll_ready(|_| {});
        assert!(!hooks.has_layout_changed());
        let debug = format!("{hooks:?}");
        assert!(debug.contains("on_scroll_ready: true"));
        assert!(debug.contains("on_resize_ready: false"));
    }
}
