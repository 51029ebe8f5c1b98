#![forbid(unsafe_code)]

//! Pooled clipboard history list.
//!
//! Headless state for a history popup that shows the newest entries flat and
//! folds the rest into fixed-size, individually collapsible pool groups. This
//! crate re-exports the stable surface of the internal crates and offers a
//! prelude for everyday use.
//!
//! ```
//! use std::time::{Duration, Instant};
//! use poolview::prelude::*;
//!
//! let entries: Vec<HistoryEntry> = (0..25)
//!     .map(|i| HistoryEntry::new(i, format!("clip {i}")))
//!     .collect();
//!
//! let mut list = HistoryList::new(ListConfig::default())?;
//! let now = Instant::now();
//! list.set_entries(&entries, now);
//!
//! // Entry 22 sits in the second pool group, collapsed.
//! list.select(EntryId::new(22), now);
//! assert!(list.expansion().contains(1));
//!
//! list.tick(now + Duration::from_millis(250));
//! assert_eq!(list.take_scroll_target(), Some(EntryId::new(22)));
//! # Ok::<(), poolview::Error>(())
//! ```

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use poolview_core::{ConfigError, EntryId, HistoryEntry, ListConfig, PinPosition};

#[cfg(feature = "tracing-json")]
pub use poolview_core::logging::init_json_logging;

// --- Window re-exports -----------------------------------------------------

pub use poolview_window::{
    GroupExpansionState, HistoryWindow, ListLayout, Location, PinnedSection, Placement, PoolGroup,
    Row, WindowShape,
};

// --- Runtime re-exports ----------------------------------------------------

#[cfg(feature = "runtime")]
pub use poolview_runtime::{
    DebounceAction, DebounceConfig, Deadline, DropReason, HistoryList, ListHooks, ListView,
    ResizeDebouncer, ResizeRequest, ScrollResolution, SelectionConfig, SelectionCoordinator,
    SelectionOutcome,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for poolview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Invalid list configuration.
    Config(ConfigError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(err) => write!(f, "invalid configuration: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

/// Standard result type for poolview APIs.
pub type Result<T> = std::result::Result<T, Error>;

/// Build a list configured from `POOLVIEW_*` environment variables.
#[cfg(feature = "runtime")]
pub fn list_from_env() -> Result<HistoryList> {
    let config = ListConfig::from_env()?;
    Ok(HistoryList::new(config)?)
}

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        EntryId, Error, GroupExpansionState, HistoryEntry, ListConfig, ListLayout, PinPosition,
        Result, Row,
    };

    #[cfg(feature = "runtime")]
    pub use crate::{HistoryList, ListHooks, ListView, ResizeRequest, SelectionOutcome};

    pub use crate::{core, window};

    #[cfg(feature = "runtime")]
    pub use crate::runtime;
}

pub use poolview_core as core;
#[cfg(feature = "runtime")]
pub use poolview_runtime as runtime;
pub use poolview_window as window;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_converts_and_displays() {
        let err: Error = ConfigError::ZeroHeadSize.into();
        assert!(err.to_string().starts_with("invalid configuration:"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[cfg(feature = "runtime")]
    #[test]
    fn invalid_config_surfaces_as_facade_error() {
        fn build() -> Result<HistoryList> {
            Ok(HistoryList::new(ListConfig::default().with_head_size(0))?)
        }
        assert_eq!(
            build().unwrap_err(),
            Error::Config(ConfigError::ZeroHeadSize)
        );
    }
}
