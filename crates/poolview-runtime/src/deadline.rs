#![forbid(unsafe_code)]

//! Restartable one-shot deadline.
//!
//! The list never sleeps or spawns. Every wait is a [`Deadline`] that the
//! owner polls with the current time, the same way the host polls
//! [`ResizeDebouncer::tick_at`](crate::resize_debouncer::ResizeDebouncer::tick_at).
//!
//! - Arming an armed deadline restarts it (last write wins).
//! - Cancelling is always safe, armed or not.
//! - [`Deadline::fire_if_due`] returns `true` exactly once per arming.

use std::time::{Duration, Instant};

#[inline]
pub(crate) fn duration_since_or_zero(now: Instant, earlier: Instant) -> Duration {
    now.checked_duration_since(earlier)
        .unwrap_or(Duration::ZERO)
}

/// A cancellable, fire-once point in time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Deadline {
    due: Option<Instant>,
}

impl Deadline {
    /// A disarmed deadline.
    #[must_use]
    pub const fn new() -> Self {
        Self { due: None }
    }

    /// Fire `delay` after `now`, replacing any previous arming.
    pub fn arm(&mut self, now: Instant, delay: Duration) {
        self.due = Some(now + delay);
    }

    /// Fire at `at`, replacing any previous arming.
    pub fn arm_at(&mut self, at: Instant) {
        self.due = Some(at);
    }

    /// Disarm. Returns `true` if it was armed.
    pub fn cancel(&mut self) -> bool {
        self.due.take().is_some()
    }

    #[inline]
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.due.is_some()
    }

    #[must_use]
    pub fn due(&self) -> Option<Instant> {
        self.due
    }

    /// Time left until firing; zero once due, `None` when disarmed.
    #[must_use]
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.due.map(|due| duration_since_or_zero(due, now))
    }

    #[must_use]
    pub fn is_due(&self, now: Instant) -> bool {
        self.due.is_some_and(|due| now >= due)
    }

    /// Disarm and return `true` if due at `now`.
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        if self.is_due(now) {
            self.due = None;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn new_deadline_is_disarmed() {
        let base = Instant::now();
        let mut d = Deadline::new();
        assert!(!d.is_armed());
        assert_eq!(d.remaining(base), None);
        assert!(!d.fire_if_due(base + 1000 * MS));
    }

    #[test]
    fn fires_once_when_due() {
        let base = Instant::now();
        let mut d = Deadline::new();
        d.arm(base, 250 * MS);
        assert!(!d.fire_if_due(base + 249 * MS));
        assert!(d.fire_if_due(base + 250 * MS));
        assert!(!d.fire_if_due(base + 251 * MS));
        assert!(!d.is_armed());
    }

    #[test]
    fn rearm_restarts_wait() {
        let base = Instant::now();
        let mut d = Deadline::new();
        d.arm(base, 250 * MS);
        d.arm(base + 200 * MS, 250 * MS);
        assert!(!d.fire_if_due(base + 300 * MS));
        assert!(d.fire_if_due(base + 450 * MS));
    }

    #[test]
    fn cancel_is_safe_and_prevents_firing() {
        let base = Instant::now();
        let mut d = Deadline::new();
        assert!(!d.cancel());
        d.arm(base, 10 * MS);
        assert!(d.cancel());
        assert!(!d.fire_if_due(base + 20 * MS));
    }

    #[test]
    fn remaining_saturates_at_zero() {
        let base = Instant::now();
        let mut d = Deadline::new();
        d.arm_at(base + 100 * MS);
        assert_eq!(d.remaining(base + 40 * MS), Some(60 * MS));
        assert_eq!(d.remaining(base + 400 * MS), Some(Duration::ZERO));
    }
}
