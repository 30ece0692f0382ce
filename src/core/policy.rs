//! Rate limit rules: a bound over a rolling time window
//!
//! This module provides the [`WindowPolicy`] value type which describes how
//! many admissions a key allows ([`bound`](WindowPolicy::bound)) within a
//! rolling window of time, and [`WindowUnit`] for the window's granularity.

use super::ThrottleError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

const NANOS_PER_SEC: i64 = 1_000_000_000;

/// Granularity of a policy's time window
///
/// Parsed from configuration strings with [`FromStr`]; unrecognized units are
/// rejected rather than silently collapsing to a zero-length window.
///
/// ```
/// use ratethrottler::WindowUnit;
///
/// let unit: WindowUnit = "minutes".parse().unwrap();
/// assert_eq!(unit, WindowUnit::Minutes);
/// assert!("fortnights".parse::<WindowUnit>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowUnit {
    /// Window length measured in seconds
    Seconds,
    /// Window length measured in minutes
    Minutes,
    /// Window length measured in hours
    Hours,
}

impl WindowUnit {
    /// Nanoseconds in one unit
    pub fn as_nanos(self) -> i64 {
        match self {
            WindowUnit::Seconds => NANOS_PER_SEC,
            WindowUnit::Minutes => 60 * NANOS_PER_SEC,
            WindowUnit::Hours => 60 * 60 * NANOS_PER_SEC,
        }
    }
}

impl FromStr for WindowUnit {
    type Err = ThrottleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "seconds" => Ok(WindowUnit::Seconds),
            "minutes" => Ok(WindowUnit::Minutes),
            "hours" => Ok(WindowUnit::Hours),
            _ => Err(ThrottleError::InvalidPolicy(format!(
                "unknown window unit: {s}. Valid options are: seconds, minutes, hours"
            ))),
        }
    }
}

/// Immutable rate limit rule for one key
///
/// A policy allows at most `bound` admissions within a rolling window of
/// `window` units. It is supplied once when a key is configured and retained
/// for the lifetime of the entry; changing a key's policy means dropping and
/// reconfiguring the key.
///
/// # Example
///
/// ```
/// use ratethrottler::{WindowPolicy, WindowUnit};
///
/// // 100 calls per 5 minutes
/// let policy = WindowPolicy::minutes(100, 5);
/// assert_eq!(policy, WindowPolicy::new(100, 5, WindowUnit::Minutes));
/// assert_eq!(policy.window_nanos(), 300_000_000_000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowPolicy {
    /// Maximum admissions allowed within the window, at least 1
    pub bound: usize,
    /// Window length, in units of `unit`
    pub window: u64,
    /// Granularity of `window`
    pub unit: WindowUnit,
}

impl WindowPolicy {
    /// Create a policy of `bound` admissions per `window` units
    pub fn new(bound: usize, window: u64, unit: WindowUnit) -> Self {
        WindowPolicy {
            bound,
            window,
            unit,
        }
    }

    /// Create a policy of `bound` admissions per `window` seconds
    pub fn seconds(bound: usize, window: u64) -> Self {
        Self::new(bound, window, WindowUnit::Seconds)
    }

    /// Create a policy of `bound` admissions per `window` minutes
    pub fn minutes(bound: usize, window: u64) -> Self {
        Self::new(bound, window, WindowUnit::Minutes)
    }

    /// Create a policy of `bound` admissions per `window` hours
    pub fn hours(bound: usize, window: u64) -> Self {
        Self::new(bound, window, WindowUnit::Hours)
    }

    /// The window length in nanoseconds, saturating at `i64::MAX`
    pub fn window_nanos(&self) -> i64 {
        i64::try_from(self.window)
            .unwrap_or(i64::MAX)
            .saturating_mul(self.unit.as_nanos())
    }

    /// Check the policy at configuration time
    pub(crate) fn validate(&self) -> Result<(), ThrottleError> {
        if self.bound == 0 {
            return Err(ThrottleError::InvalidPolicy(
                "bound must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
