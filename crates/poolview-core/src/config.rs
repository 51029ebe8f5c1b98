#![forbid(unsafe_code)]

//! Configuration for the pooled history list.
//!
//! Every knob has a default matching the stock popup: ten entries in the head,
//! pool groups of ten, and a 250ms settle/debounce window (the group toggle
//! animation runs for 200ms, plus a buffer).
//!
//! # Environment overrides
//!
//! | Variable | Field |
//! |----------|-------|
//! | `POOLVIEW_HEAD_SIZE` | `head_size` |
//! | `POOLVIEW_GROUP_SIZE` | `group_size` |
//! | `POOLVIEW_BADGE_LIMIT` | `badge_limit` |
//! | `POOLVIEW_PIN_POSITION` | `pin_position` (`top` / `bottom`) |
//! | `POOLVIEW_SETTLE_DELAY_MS` | `settle_delay_ms` |
//! | `POOLVIEW_SCROLL_DELAY_MS` | `scroll_delay_ms` |
//! | `POOLVIEW_RESIZE_DEBOUNCE_MS` | `resize_debounce_ms` |
//! | `POOLVIEW_RESIZE_MAX_WAIT_MS` | `resize_max_wait_ms` (`none` disables) |

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Default number of entries shown without grouping.
pub const DEFAULT_HEAD_SIZE: usize = 10;
/// Default number of entries per pool group.
pub const DEFAULT_GROUP_SIZE: usize = 10;
/// Default number of pool entries that carry an ordinal badge.
pub const DEFAULT_BADGE_LIMIT: usize = 9;
/// Default wait after an expand/collapse before scrolling.
pub const DEFAULT_SETTLE_DELAY_MS: u64 = 250;
/// Default wait before scrolling to an already visible row.
pub const DEFAULT_SCROLL_DELAY_MS: u64 = 10;
/// Default resize debounce window.
pub const DEFAULT_RESIZE_DEBOUNCE_MS: u64 = 250;

/// Where pinned entries sit relative to the scrolling list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PinPosition {
    #[default]
    Top,
    Bottom,
}

impl PinPosition {
    /// Get the stable string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
        }
    }
}

impl FromStr for PinPosition {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("top") {
            Ok(Self::Top)
        } else if s.eq_ignore_ascii_case("bottom") {
            Ok(Self::Bottom)
        } else {
            Err(())
        }
    }
}

/// Errors from building or validating a [`ListConfig`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// `head_size` must be at least one.
    ZeroHeadSize,
    /// `group_size` must be at least one.
    ZeroGroupSize,
    /// An environment variable held a value that could not be parsed.
    InvalidEnv { key: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroHeadSize => write!(f, "head size must be greater than zero"),
            Self::ZeroGroupSize => write!(f, "group size must be greater than zero"),
            Self::InvalidEnv { key, value } => {
                write!(f, "invalid value for {key}: {value:?}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Configuration for the pooled history list.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ListConfig {
    /// Entries shown directly before the first pool group (K).
    pub head_size: usize,

    /// Entries per pool group (G). The last group may be shorter.
    pub group_size: usize,

    /// Pool entries with a pool index below this get an ordinal badge.
    pub badge_limit: usize,

    /// Placement of the pinned section.
    pub pin_position: PinPosition,

    /// Wait after an expansion before a scroll may be released (ms).
    pub settle_delay_ms: u64,

    /// Wait before scrolling to a row that is already laid out (ms).
    pub scroll_delay_ms: u64,

    /// Quiet period after the last resize signal before applying (ms).
    pub resize_debounce_ms: u64,

    /// Upper bound on how long a stream of resize signals can defer an apply.
    /// `None` keeps pure debounce semantics.
    pub resize_max_wait_ms: Option<u64>,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            head_size: DEFAULT_HEAD_SIZE,
            group_size: DEFAULT_GROUP_SIZE,
            badge_limit: DEFAULT_BADGE_LIMIT,
            pin_position: PinPosition::Top,
            settle_delay_ms: DEFAULT_SETTLE_DELAY_MS,
            scroll_delay_ms: DEFAULT_SCROLL_DELAY_MS,
            resize_debounce_ms: DEFAULT_RESIZE_DEBOUNCE_MS,
            resize_max_wait_ms: None,
        }
    }
}

impl ListConfig {
    #[must_use]
    pub fn with_head_size(mut self, head_size: usize) -> Self {
        self.head_size = head_size;
        self
    }

    #[must_use]
    pub fn with_group_size(mut self, group_size: usize) -> Self {
        self.group_size = group_size;
        self
    }

    #[must_use]
    pub fn with_badge_limit(mut self, badge_limit: usize) -> Self {
        self.badge_limit = badge_limit;
        self
    }

    #[must_use]
    pub fn with_pin_position(mut self, position: PinPosition) -> Self {
        self.pin_position = position;
        self
    }

    #[must_use]
    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay_ms = duration_ms(delay);
        self
    }

    #[must_use]
    pub fn with_scroll_delay(mut self, delay: Duration) -> Self {
        self.scroll_delay_ms = duration_ms(delay);
        self
    }

    #[must_use]
    pub fn with_resize_debounce(mut self, delay: Duration) -> Self {
        self.resize_debounce_ms = duration_ms(delay);
        self
    }

    #[must_use]
    pub fn with_resize_max_wait(mut self, max_wait: Option<Duration>) -> Self {
        self.resize_max_wait_ms = max_wait.map(duration_ms);
        self
    }

    #[must_use]
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    #[must_use]
    pub fn scroll_delay(&self) -> Duration {
        Duration::from_millis(self.scroll_delay_ms)
    }

    #[must_use]
    pub fn resize_debounce(&self) -> Duration {
        Duration::from_millis(self.resize_debounce_ms)
    }

    #[must_use]
    pub fn resize_max_wait(&self) -> Option<Duration> {
        self.resize_max_wait_ms.map(Duration::from_millis)
    }

    /// Check structural constraints (K, G > 0).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.head_size == 0 {
            return Err(ConfigError::ZeroHeadSize);
        }
        if self.group_size == 0 {
            return Err(ConfigError::ZeroGroupSize);
        }
        Ok(())
    }

    /// Defaults overridden by `POOLVIEW_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each
    /// `POOLVIEW_*` key. The result is validated.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(v) = parse_var(&lookup, "POOLVIEW_HEAD_SIZE")? {
            config.head_size = v;
        }
        if let Some(v) = parse_var(&lookup, "POOLVIEW_GROUP_SIZE")? {
            config.group_size = v;
        }
        if let Some(v) = parse_var(&lookup, "POOLVIEW_BADGE_LIMIT")? {
            config.badge_limit = v;
        }
        if let Some(v) = parse_var(&lookup, "POOLVIEW_PIN_POSITION")? {
            config.pin_position = v;
        }
        if let Some(v) = parse_var(&lookup, "POOLVIEW_SETTLE_DELAY_MS")? {
            config.settle_delay_ms = v;
        }
        if let Some(v) = parse_var(&lookup, "POOLVIEW_SCROLL_DELAY_MS")? {
            config.scroll_delay_ms = v;
        }
        if let Some(v) = parse_var(&lookup, "POOLVIEW_RESIZE_DEBOUNCE_MS")? {
            config.resize_debounce_ms = v;
        }
        if let Some(raw) = lookup("POOLVIEW_RESIZE_MAX_WAIT_MS") {
            let raw = raw.trim();
            config.resize_max_wait_ms = if raw.eq_ignore_ascii_case("none") || raw.is_empty() {
                None
            } else {
                Some(raw.parse().map_err(|_| ConfigError::InvalidEnv {
                    key: "POOLVIEW_RESIZE_MAX_WAIT_MS",
                    value: raw.to_string(),
                })?)
            };
        }

        config.validate()?;
        Ok(config)
    }
}

fn parse_var<F, T>(lookup: &F, key: &'static str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidEnv { key, value: raw }),
    }
}

fn duration_ms(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_match_popup() {
        let config = ListConfig::default();
        assert_eq!(config.head_size, 10);
        assert_eq!(config.group_size, 10);
        assert_eq!(config.badge_limit, 9);
        assert_eq!(config.settle_delay(), Duration::from_millis(250));
        assert_eq!(config.resize_debounce(), Duration::from_millis(250));
        assert_eq!(config.scroll_delay(), Duration::from_millis(10));
        assert_eq!(config.resize_max_wait(), None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_sizes_rejected() {
        assert_eq!(
            ListConfig::default().with_head_size(0).validate(),
            Err(ConfigError::ZeroHeadSize)
        );
        assert_eq!(
            ListConfig::default().with_group_size(0).validate(),
            Err(ConfigError::ZeroGroupSize)
        );
    }

    #[test]
    fn builders_round_durations_to_millis() {
        let config = ListConfig::default()
            .with_settle_delay(Duration::from_micros(100_900))
            .with_resize_max_wait(Some(Duration::from_secs(1)));
        assert_eq!(config.settle_delay_ms, 100);
        assert_eq!(config.resize_max_wait_ms, Some(1000));
    }

    #[test]
    fn lookup_overrides_fields() {
        let config = ListConfig::from_lookup(lookup_from(&[
            ("POOLVIEW_HEAD_SIZE", "5"),
            ("POOLVIEW_GROUP_SIZE", " 20 "),
            ("POOLVIEW_PIN_POSITION", "Bottom"),
            ("POOLVIEW_SETTLE_DELAY_MS", "300"),
            ("POOLVIEW_RESIZE_MAX_WAIT_MS", "1000"),
        ]))
        .unwrap();
        assert_eq!(config.head_size, 5);
        assert_eq!(config.group_size, 20);
        assert_eq!(config.pin_position, PinPosition::Bottom);
        assert_eq!(config.settle_delay_ms, 300);
        assert_eq!(config.resize_max_wait_ms, Some(1000));
        assert_eq!(config.badge_limit, DEFAULT_BADGE_LIMIT);
    }

    #[test]
    fn lookup_max_wait_none_disables() {
        let config =
            ListConfig::from_lookup(lookup_from(&[("POOLVIEW_RESIZE_MAX_WAIT_MS", "none")]))
                .unwrap();
        assert_eq!(config.resize_max_wait_ms, None);
    }

    #[test]
    fn lookup_rejects_garbage() {
        let err = ListConfig::from_lookup(lookup_from(&[("POOLVIEW_GROUP_SIZE", "ten")]))
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidEnv {
                key: "POOLVIEW_GROUP_SIZE",
                value: "ten".to_string()
            }
        );
        assert!(err.to_string().contains("POOLVIEW_GROUP_SIZE"));
    }

    #[test]
    fn lookup_validates_result() {
        let err =
            ListConfig::from_lookup(lookup_from(&[("POOLVIEW_HEAD_SIZE", "0")])).unwrap_err();
        assert_eq!(err, ConfigError::ZeroHeadSize);
    }

    #[test]
    fn pin_position_parses_case_insensitively() {
        assert_eq!("TOP".parse::<PinPosition>(), Ok(PinPosition::Top));
        assert_eq!("bottom".parse::<PinPosition>(), Ok(PinPosition::Bottom));
        assert!("left".parse::<PinPosition>().is_err());
        assert_eq!(PinPosition::Bottom.as_str(), "bottom");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn partial_json_uses_defaults() {
        let config: ListConfig =
            serde_json::from_str(r#"{"group_size":5,"pin_position":"bottom"}"#).unwrap();
        assert_eq!(config.group_size, 5);
        assert_eq!(config.pin_position, PinPosition::Bottom);
        assert_eq!(config.head_size, DEFAULT_HEAD_SIZE);
    }

    mod property {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Any in-range numeric override is read back unchanged.
            #[test]
            fn numeric_overrides_round_trip(
                head in 1usize..10_000,
                group in 1usize..10_000,
                settle in any::<u64>(),
                debounce in any::<u64>(),
                max_wait in proptest::option::of(any::<u64>()),
            ) {
                let head_s = head.to_string();
                let group_s = group.to_string();
                let settle_s = settle.to_string();
                let debounce_s = debounce.to_string();
                let max_wait_s = max_wait.map_or_else(|| "none".to_string(), |v| v.to_string());
                let config = ListConfig::from_lookup(lookup_from(&[
                    ("POOLVIEW_HEAD_SIZE", head_s.as_str()),
                    ("POOLVIEW_GROUP_SIZE", group_s.as_str()),
                    ("POOLVIEW_SETTLE_DELAY_MS", settle_s.as_str()),
                    ("POOLVIEW_RESIZE_DEBOUNCE_MS", debounce_s.as_str()),
                    ("POOLVIEW_RESIZE_MAX_WAIT_MS", max_wait_s.as_str()),
                ]))
                .unwrap();
                prop_assert_eq!(config.head_size, head);
                prop_assert_eq!(config.group_size, group);
                prop_assert_eq!(config.settle_delay_ms, settle);
                prop_assert_eq!(config.resize_debounce_ms, debounce);
                prop_assert_eq!(config.resize_max_wait_ms, max_wait);
            }

            /// Non-numeric values are rejected with the offending key.
            #[test]
            fn non_numeric_head_size_rejected(raw in "[a-z]{1,8}") {
                let err = ListConfig::from_lookup(lookup_from(&[("POOLVIEW_HEAD_SIZE", raw.as_str())]))
                    .unwrap_err();
                prop_assert_eq!(
                    err,
                    ConfigError::InvalidEnv { key: "POOLVIEW_HEAD_SIZE", value: raw.clone() }
                );
            }
        }
    }
}
