//! The main [`RateThrottler`] engine
//!
//! Owns the limiter registry and exposes the full programmatic surface:
//! configuring keys, admission decisions, lifecycle operations, and snapshot
//! capture/restore. Construct one at service start and share it by reference
//! (or inside an `Arc`) with every caller; all methods take `&self`.

use super::ThrottleError;
use super::policy::WindowPolicy;
use super::registry::Registry;
use super::snapshot;

use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, info, warn};

/// Per-key sliding-window invocation rate limiter
///
/// Each configured key tracks the timestamps of its last `bound` admissions.
/// A call is admitted while fewer than `bound` admissions exist; once full,
/// it is admitted only when the oldest recorded admission has slid out of the
/// policy's window, in which case it evicts that oldest entry.
///
/// # Example
///
/// ```
/// use ratethrottler::{RateThrottler, WindowPolicy};
///
/// let throttler = RateThrottler::new();
/// throttler.configure("downstream-api", WindowPolicy::seconds(100, 10))?;
///
/// if throttler.throttle("downstream-api")? {
///     // denied: back off instead of calling downstream
/// } else {
///     // admitted: perform the guarded call
/// }
/// # Ok::<(), ratethrottler::ThrottleError>(())
/// ```
pub struct RateThrottler {
    registry: Registry,
}

impl RateThrottler {
    /// Create an empty throttler with no configured keys
    pub fn new() -> Self {
        RateThrottler {
            registry: Registry::new(),
        }
    }

    /// Configure `key` with `policy`, starting from an empty history
    ///
    /// Reconfiguring an existing key replaces it and discards its history.
    /// The one exception is a key rehydrated by [`reconstruct`](Self::reconstruct)
    /// and not yet armed: configuring it attaches the policy while keeping
    /// the restored history (trimmed to the new bound, oldest first).
    ///
    /// # Errors
    ///
    /// [`ThrottleError::InvalidPolicy`] when `policy.bound` is zero.
    pub fn configure(&self, key: &str, policy: WindowPolicy) -> Result<(), ThrottleError> {
        debug!(key, ?policy, "configure invocation limiter");
        self.registry.configure(key, policy)
    }

    /// Whether `key` has a limiter entry
    pub fn exists(&self, key: &str) -> bool {
        self.registry.exists(key)
    }

    /// Number of keys currently in the registry
    pub fn count(&self) -> usize {
        self.registry.count()
    }

    /// Empty `key`'s admission history in place, keeping the key configured
    ///
    /// The next `throttle` calls behave as if the key were freshly configured.
    ///
    /// # Errors
    ///
    /// [`ThrottleError::UnknownKey`] when `key` has no entry.
    pub fn purge(&self, key: &str) -> Result<(), ThrottleError> {
        debug!(key, "purge invocation limiter");
        self.registry.purge(key)
    }

    /// Remove `key`'s limiter entirely; removing an absent key is a no-op
    pub fn remove(&self, key: &str) {
        debug!(key, "drop invocation limiter");
        self.registry.remove(key);
    }

    /// Remove every limiter, discarding all rate-limit history process-wide
    ///
    /// Handle with care: every key must be configured again before use.
    pub fn purge_all(&self) {
        warn!("purge all rate throttler state");
        self.registry.purge_all();
    }

    /// Decide admission for `key` at the current time
    ///
    /// Returns `true` when the call must be **denied** (the limit is reached)
    /// and `false` when it is admitted and recorded. A denied call is not an
    /// admission: it leaves the history untouched.
    ///
    /// # Errors
    ///
    /// [`ThrottleError::NotConfigured`] when `key` has no armed policy —
    /// including keys restored from a snapshot that were not configured again.
    pub fn throttle(&self, key: &str) -> Result<bool, ThrottleError> {
        self.throttle_at(key, SystemTime::now())
    }

    /// Decide admission for `key` as of `now`
    ///
    /// Same contract as [`throttle`](Self::throttle) with the decision time
    /// supplied by the caller, which makes window behavior testable without
    /// sleeping.
    pub fn throttle_at(&self, key: &str, now: SystemTime) -> Result<bool, ThrottleError> {
        let now_ns = nanos_since_epoch(now);

        let decision = self.registry.with_slot(key, |slot| {
            let policy = slot
                .policy()
                .ok_or_else(|| ThrottleError::NotConfigured(key.to_string()))?;
            let denied = slot
                .window()
                .lock()
                .throttle(policy.bound, policy.window_nanos(), now_ns);
            Ok(denied)
        });

        let denied = decision.unwrap_or_else(|| Err(ThrottleError::NotConfigured(key.to_string())))?;
        debug!(key, denied, "throttle invocation");
        Ok(denied)
    }

    /// Serialize every key's ordered admission history to a snapshot string
    ///
    /// The snapshot observes a single consistent point in time across all
    /// keys and mutates nothing. Policies are not part of the snapshot.
    pub fn take_snapshot(&self) -> Result<String, ThrottleError> {
        debug!("take active state snapshot");
        snapshot::encode(&self.registry.snapshot_view())
    }

    /// Replace the registry wholesale from a snapshot string
    ///
    /// Empty (or absent, i.e. `null`) input is a no-op and preserves current
    /// state. Restored keys carry their histories but no policy; arm each of
    /// them with [`configure`](Self::configure) before traffic resumes.
    ///
    /// # Errors
    ///
    /// [`ThrottleError::MalformedSnapshot`] when the input does not parse as
    /// a key to timestamp-list mapping. The registry is left untouched —
    /// restoration is all-or-nothing.
    pub fn reconstruct(&self, snapshot: &str) -> Result<(), ThrottleError> {
        let Some(histories) = snapshot::decode(snapshot)? else {
            debug!("empty snapshot, nothing to reconstruct");
            return Ok(());
        };

        info!(keys = histories.len(), "reconstruct throttler state from snapshot");
        self.registry.replace_all(histories);
        Ok(())
    }
}

impl Default for RateThrottler {
    fn default() -> Self {
        Self::new()
    }
}

fn nanos_since_epoch(now: SystemTime) -> i64 {
    match now.duration_since(UNIX_EPOCH) {
        Ok(elapsed) => elapsed.as_nanos() as i64,
        // Pre-epoch clock: treat as the earliest representable instant.
        Err(_) => 0,
    }
}
