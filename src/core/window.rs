//! Per-key admission history and the sliding-window decision
//!
//! A [`WindowState`] holds the ordered timestamps (nanoseconds) of the most
//! recent admissions for one key, never more than the policy's bound. The
//! admission decision itself lives here, over plain integers, so it can be
//! tested without a clock.

use std::collections::VecDeque;

/// Ordered admission history for one key, oldest first
#[derive(Debug, Default)]
pub(crate) struct WindowState {
    history: VecDeque<i64>,
}

impl WindowState {
    pub(crate) fn new() -> Self {
        WindowState {
            history: VecDeque::new(),
        }
    }

    /// Rebuild a state from a persisted history, preserving order
    pub(crate) fn from_history(history: Vec<i64>) -> Self {
        WindowState {
            history: history.into(),
        }
    }

    /// Sliding-window admission check; returns `true` when the call is denied
    ///
    /// While the history is under `bound` the call is admitted and recorded.
    /// Once full, only the oldest entry matters: inside the window the call
    /// is denied and nothing changes; past it the oldest entry is evicted and
    /// the new timestamp recorded.
    pub(crate) fn throttle(&mut self, bound: usize, window_nanos: i64, now_ns: i64) -> bool {
        if self.history.len() < bound {
            self.history.push_back(now_ns);
            return false;
        }

        // A full history is non-empty for any configurable bound (>= 1);
        // admit without recording rather than pop from nothing.
        let Some(&eldest) = self.history.front() else {
            return false;
        };

        if now_ns.saturating_sub(eldest) < window_nanos {
            return true;
        }

        self.history.pop_front();
        self.history.push_back(now_ns);
        false
    }

    /// Drop oldest entries until the history fits `bound`
    pub(crate) fn trim_to(&mut self, bound: usize) {
        while self.history.len() > bound {
            self.history.pop_front();
        }
    }

    pub(crate) fn clear(&mut self) {
        self.history.clear();
    }

    pub(crate) fn to_vec(&self) -> Vec<i64> {
        self.history.iter().copied().collect()
    }
}
