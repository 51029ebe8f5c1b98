#![forbid(unsafe_code)]

//! Windowing for the pooled clipboard history list.
//!
//! Pure data: [`HistoryWindow`] partitions listed entries into a head and pool
//! groups, [`GroupExpansionState`] remembers which groups are open, and
//! [`ListLayout`] adds the pinned section and flattens everything into
//! render rows. Nothing here keeps time; see `poolview-runtime` for that.

pub mod expansion;
pub mod history_window;
pub mod layout;

pub use expansion::GroupExpansionState;
pub use history_window::{HistoryWindow, Location, PoolGroup, WindowShape};
pub use layout::{ListLayout, PinnedSection, Placement, Row};
