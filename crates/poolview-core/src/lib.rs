#![forbid(unsafe_code)]

//! Core: history entries, list configuration, and the logging shim.

pub mod config;
pub mod entry;
pub mod logging;

pub use config::{ConfigError, ListConfig, PinPosition};
pub use entry::{EntryId, HistoryEntry};

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};
