#![forbid(unsafe_code)]

//! Resize request debouncer.
//!
//! Toggling a pool group changes the list's content height over a short
//! animation. Resizing the popup on every intermediate measurement makes it
//! thrash, so resize signals are debounced:
//!
//! - **Restart on signal**: each signal pushes the apply point to
//!   `delay` after the latest signal (true debounce, not throttle).
//! - **Latest height wins**: the applied height is whatever was measured
//!   last when the window closes, never an intermediate value.
//! - **At most one apply per window**.
//! - **Optional bounded latency**: with `max_wait` set, a continuous stream
//!   still applies once `max_wait` has passed since the window opened.
//!
//! # Usage
//!
//! ```
//! use std::time::{Duration, Instant};
//! use poolview_runtime::resize_debouncer::{DebounceAction, DebounceConfig, ResizeDebouncer};
//!
//! let mut debouncer = ResizeDebouncer::new(DebounceConfig::default());
//! let t0 = Instant::now();
//!
//! debouncer.signal_at(t0);
//! debouncer.measure_content(180.0);
//! debouncer.signal_at(t0 + Duration::from_millis(100));
//! debouncer.measure_content(240.0);
//!
//! assert_eq!(debouncer.tick_at(t0 + Duration::from_millis(300)), DebounceAction::None);
//! match debouncer.tick_at(t0 + Duration::from_millis(350)) {
//!     DebounceAction::Apply(request) => assert_eq!(request.height, 240.0),
//!     DebounceAction::None => unreachable!(),
//! }
//! ```
//!
//! # Failure Modes
//!
//! | Condition | Behavior |
//! |-----------|----------|
//! | window closes with no height ever measured | pending cleared, nothing applied |
//! | non-finite or negative measurement | ignored |
//! | `delay = 0` | applies on the next tick |
//! | cancelled mid-window | pending cleared silently |

use std::time::{Duration, Instant};

use poolview_core::ListConfig;

use crate::deadline::{Deadline, duration_since_or_zero};

/// Configuration for the resize debouncer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebounceConfig {
    /// Quiet period after the last signal (ms).
    pub delay_ms: u64,

    /// Hard upper bound on how long signals can keep deferring (ms).
    pub max_wait_ms: Option<u64>,

    /// Keep a [`DebounceLog`] entry per decision.
    pub enable_logging: bool,
}

impl Default for DebounceConfig {
    fn default() -> Self {
        Self {
            delay_ms: poolview_core::config::DEFAULT_RESIZE_DEBOUNCE_MS,
            max_wait_ms: None,
            enable_logging: false,
        }
    }
}

impl DebounceConfig {
    /// Resize fields of a [`ListConfig`].
    #[must_use]
    pub fn from_list_config(config: &ListConfig) -> Self {
        Self {
            delay_ms: config.resize_debounce_ms,
            max_wait_ms: config.resize_max_wait_ms,
            enable_logging: false,
        }
    }

    #[must_use]
    pub fn with_logging(mut self, enabled: bool) -> Self {
        self.enable_logging = enabled;
        self
    }

    #[must_use]
    pub fn with_max_wait_ms(mut self, max_wait_ms: Option<u64>) -> Self {
        self.max_wait_ms = max_wait_ms;
        self
    }
}

/// A resize the host should apply now.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeRequest {
    /// Total height to resize to (`content_height + pinned_height`).
    pub height: f64,
    /// Measured height of the scrolling list.
    pub content_height: f64,
    /// Measured height of the pinned section.
    pub pinned_height: f64,
    /// Signals folded into this request.
    pub coalesced: u32,
    /// Time between the first signal and the apply.
    pub waited: Duration,
    /// Whether `max_wait` forced the apply.
    pub forced_by_deadline: bool,
}

/// Action returned by the debouncer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DebounceAction {
    /// Nothing to do yet.
    None,
    /// Apply this resize.
    Apply(ResizeRequest),
}

/// One decision, kept when logging is enabled.
#[derive(Debug, Clone, PartialEq)]
pub struct DebounceLog {
    pub timestamp: Instant,
    /// `signal`, `apply`, `apply_forced`, `skip_unmeasured` or `cancel`.
    pub action: &'static str,
    pub signals_in_window: u32,
    pub height: Option<f64>,
}

/// Counters over the debouncer's lifetime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DebouncerStats {
    pub signal_count: u64,
    pub apply_count: u64,
    pub forced_count: u64,
    pub skipped_count: u64,
    pub cancel_count: u64,
}

/// Debounces "needs resize" signals into single applies.
#[derive(Debug)]
pub struct ResizeDebouncer {
    config: DebounceConfig,

    /// Fires `delay` after the latest signal.
    quiet: Deadline,

    /// First signal of the current window.
    window_start: Option<Instant>,

    signals_in_window: u32,

    /// Latest measured list height.
    content_height: Option<f64>,

    /// Latest measured pinned-section height.
    pinned_height: f64,

    last_applied: Option<f64>,

    stats: DebouncerStats,

    logs: Vec<DebounceLog>,
}

impl ResizeDebouncer {
    #[must_use]
    pub fn new(config: DebounceConfig) -> Self {
        Self {
            config,
            quiet: Deadline::new(),
            window_start: None,
            signals_in_window: 0,
            content_height: None,
            pinned_height: 0.0,
            last_applied: None,
            stats: DebouncerStats::default(),
            logs: Vec::new(),
        }
    }

    /// Record a "needs resize" signal.
    pub fn signal(&mut self) -> DebounceAction {
        self.signal_at(Instant::now())
    }

    /// Record a "needs resize" signal at `now`.
    ///
    /// Restarts the quiet period. Only returns an apply when `max_wait` has
    /// already run out for the current window.
    pub fn signal_at(&mut self, now: Instant) -> DebounceAction {
        self.stats.signal_count += 1;
        self.signals_in_window = self.signals_in_window.saturating_add(1);
        if self.window_start.is_none() {
            self.window_start = Some(now);
        }
        self.quiet
            .arm(now, Duration::from_millis(self.config.delay_ms));
        self.log_decision(now, "signal", None);

        if self.max_wait_expired(now) {
            return self.apply_at(now, true);
        }
        DebounceAction::None
    }

    /// Record the current list height. Non-finite or negative values are ignored.
    pub fn measure_content(&mut self, height: f64) {
        if height.is_finite() && height >= 0.0 {
            self.content_height = Some(height);
        }
    }

    /// Record the current pinned-section height. Non-finite or negative values
    /// are ignored.
    pub fn measure_pinned(&mut self, height: f64) {
        if height.is_finite() && height >= 0.0 {
            self.pinned_height = height;
        }
    }

    /// Poll the debouncer.
    pub fn tick(&mut self) -> DebounceAction {
        self.tick_at(Instant::now())
    }

    /// Poll the debouncer at `now`.
    pub fn tick_at(&mut self, now: Instant) -> DebounceAction {
        if !self.is_pending() {
            return DebounceAction::None;
        }
        if self.max_wait_expired(now) {
            return self.apply_at(now, true);
        }
        if self.quiet.is_due(now) {
            return self.apply_at(now, false);
        }
        DebounceAction::None
    }

    /// Drop the pending resize without applying it.
    pub fn cancel(&mut self) -> bool {
        self.cancel_at(Instant::now())
    }

    /// Drop the pending resize at `now` without applying it.
    pub fn cancel_at(&mut self, now: Instant) -> bool {
        if !self.is_pending() {
            return false;
        }
        self.log_decision(now, "cancel", None);
        self.stats.cancel_count += 1;
        self.reset_window();
        true
    }

    /// Whether a resize is waiting for its window to close.
    #[inline]
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.quiet.is_armed()
    }

    /// Height that would be applied if the window closed now.
    #[must_use]
    pub fn target_height(&self) -> Option<f64> {
        self.content_height.map(|h| h + self.pinned_height)
    }

    #[must_use]
    pub fn last_applied(&self) -> Option<f64> {
        self.last_applied
    }

    /// Time until the pending resize would apply.
    #[must_use]
    pub fn time_until_apply(&self, now: Instant) -> Option<Duration> {
        let quiet = self.quiet.remaining(now)?;
        let forced = self.config.max_wait_ms.zip(self.window_start).map(|(ms, start)| {
            Duration::from_millis(ms).saturating_sub(duration_since_or_zero(now, start))
        });
        Some(forced.map_or(quiet, |f| f.min(quiet)))
    }

    #[must_use]
    pub fn config(&self) -> &DebounceConfig {
        &self.config
    }

    #[must_use]
    pub fn stats(&self) -> DebouncerStats {
        self.stats
    }

    #[must_use]
    pub fn logs(&self) -> &[DebounceLog] {
        &self.logs
    }

    pub fn clear_logs(&mut self) {
        self.logs.clear();
    }

    fn max_wait_expired(&self, now: Instant) -> bool {
        match (self.config.max_wait_ms, self.window_start) {
            (Some(ms), Some(start)) => {
                duration_since_or_zero(now, start) >= Duration::from_millis(ms)
            }
            _ => false,
        }
    }

    fn apply_at(&mut self, now: Instant, forced: bool) -> DebounceAction {
        let waited = self
            .window_start
            .map(|start| duration_since_or_zero(now, start))
            .unwrap_or(Duration::ZERO);
        let coalesced = self.signals_in_window;

        let Some(content_height) = self.content_height else {
            self.log_decision(now, "skip_unmeasured", None);
            self.stats.skipped_count += 1;
            tracing::debug!(
                target: "poolview.resize",
                coalesced,
                "resize window closed before any height was measured"
            );
            self.reset_window();
            return DebounceAction::None;
        };

        let request = ResizeRequest {
            height: content_height + self.pinned_height,
            content_height,
            pinned_height: self.pinned_height,
            coalesced,
            waited,
            forced_by_deadline: forced,
        };

        self.last_applied = Some(request.height);
        self.stats.apply_count += 1;
        if forced {
            self.stats.forced_count += 1;
        }
        self.log_decision(
            now,
            if forced { "apply_forced" } else { "apply" },
            Some(request.height),
        );
        tracing::debug!(
            target: "poolview.resize",
            height = request.height,
            coalesced,
            waited_ms = waited.as_millis() as u64,
            forced,
            "resize_apply"
        );

        self.reset_window();
        DebounceAction::Apply(request)
    }

    fn reset_window(&mut self) {
        self.quiet.cancel();
        self.window_start = None;
        self.signals_in_window = 0;
    }

    fn log_decision(&mut self, now: Instant, action: &'static str, height: Option<f64>) {
        if !self.config.enable_logging {
            return;
        }
        self.logs.push(DebounceLog {
            timestamp: now,
            action,
            signals_in_window: self.signals_in_window,
            height,
        });
    }
}
