#![forbid(unsafe_code)]

//! Time-driven coordination for the pooled history list.
//!
//! Every type here is a deterministic state machine: operations take the
//! current [`Instant`](std::time::Instant) and nothing sleeps or spawns.
//! [`ResizeDebouncer`]'s argument-free `signal`, `tick` and `cancel` read the
//! wall clock as shorthands for their `*_at` forms; [`HistoryList`] only uses
//! the `*_at` forms and never reads the clock itself. The host polls
//! [`HistoryList::tick`] when [`HistoryList::next_wakeup`] says something is
//! due.
//!
//! | Type | Role |
//! |------|------|
//! | [`HistoryList`] | owns everything, entry point for host events |
//! | [`SelectionCoordinator`] | selection to expand-then-scroll |
//! | [`ResizeDebouncer`] | coalesces "needs resize" signals |
//! | [`Deadline`] | restartable one-shot timer |
//! | [`ListHooks`] | observer callbacks for the renderer |

pub mod deadline;
pub mod hooks;
pub mod list;
pub mod resize_debouncer;
pub mod selection;

pub use deadline::Deadline;
pub use hooks::ListHooks;
pub use list::{HistoryList, ListView};
pub use resize_debouncer::{
    DebounceAction, DebounceConfig, DebounceLog, DebouncerStats, ResizeDebouncer, ResizeRequest,
};
pub use selection::{
    DropReason, ScrollResolution, SelectionConfig, SelectionCoordinator, SelectionOutcome,
    SelectionStats,
};
