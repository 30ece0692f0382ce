//! The key to limiter-state mapping
//!
//! The registry owns every per-key limiter. The map structure is guarded by a
//! read-write lock and each slot's history by its own mutex, so admission
//! decisions on distinct keys proceed in parallel while structural changes
//! (configure, remove, snapshot, restore) are exclusive.
//!
//! Lock order is always map lock first, then slot lock. Decisions hold the
//! map read lock across the slot mutex, so a key can never be torn down in
//! the middle of an in-flight decision.

use super::ThrottleError;
use super::policy::WindowPolicy;
use super::snapshot::SnapshotView;
use super::window::WindowState;

use parking_lot::{Mutex, RwLock};
use std::sync::Arc;

#[cfg(feature = "ahash")]
use ahash::AHashMap as HashMap;
#[cfg(not(feature = "ahash"))]
use std::collections::HashMap;

/// One key's limiter: its policy plus the guarded admission history
///
/// `policy` is `None` only for slots rehydrated from a snapshot that have not
/// been re-armed with a policy yet; the snapshot format carries histories,
/// not policies.
pub(crate) struct LimiterSlot {
    policy: Option<WindowPolicy>,
    window: Mutex<WindowState>,
}

impl LimiterSlot {
    fn armed(policy: WindowPolicy, window: WindowState) -> Self {
        LimiterSlot {
            policy: Some(policy),
            window: Mutex::new(window),
        }
    }

    fn dormant(window: WindowState) -> Self {
        LimiterSlot {
            policy: None,
            window: Mutex::new(window),
        }
    }

    pub(crate) fn policy(&self) -> Option<WindowPolicy> {
        self.policy
    }

    pub(crate) fn window(&self) -> &Mutex<WindowState> {
        &self.window
    }
}

/// Registry of all configured (and restored) limiters
pub(crate) struct Registry {
    slots: RwLock<HashMap<String, Arc<LimiterSlot>>>,
}

impl Registry {
    pub(crate) fn new() -> Self {
        Registry {
            slots: RwLock::new(HashMap::new()),
        }
    }

    /// Insert a fresh limiter for `key`, replacing any armed entry
    ///
    /// Re-arming a slot restored from a snapshot keeps its history, trimmed
    /// to the new bound; everything else starts from an empty window.
    pub(crate) fn configure(&self, key: &str, policy: WindowPolicy) -> Result<(), ThrottleError> {
        policy.validate()?;

        let mut slots = self.slots.write();
        let window = match slots.get(key) {
            Some(slot) if slot.policy.is_none() => {
                let mut restored = std::mem::take(&mut *slot.window.lock());
                restored.trim_to(policy.bound);
                restored
            }
            _ => WindowState::new(),
        };
        slots.insert(key.to_string(), Arc::new(LimiterSlot::armed(policy, window)));
        Ok(())
    }

    pub(crate) fn exists(&self, key: &str) -> bool {
        self.slots.read().contains_key(key)
    }

    pub(crate) fn count(&self) -> usize {
        self.slots.read().len()
    }

    /// Empty `key`'s history in place, keeping the entry and its policy
    pub(crate) fn purge(&self, key: &str) -> Result<(), ThrottleError> {
        let slots = self.slots.read();
        let slot = slots
            .get(key)
            .ok_or_else(|| ThrottleError::UnknownKey(key.to_string()))?;
        slot.window.lock().clear();
        Ok(())
    }

    /// Remove `key` entirely; removing an absent key is a no-op
    pub(crate) fn remove(&self, key: &str) {
        self.slots.write().remove(key);
    }

    pub(crate) fn purge_all(&self) {
        self.slots.write().clear();
    }

    /// Run `f` against `key`'s slot while holding the map read lock
    ///
    /// Keeps `remove`/`configure` out for the duration, so the slot cannot be
    /// dropped mid-decision.
    pub(crate) fn with_slot<T>(&self, key: &str, f: impl FnOnce(&LimiterSlot) -> T) -> Option<T> {
        let slots = self.slots.read();
        slots.get(key).map(|slot| f(slot))
    }

    /// Point-in-time copy of every key's history
    ///
    /// Takes the map write lock so no decision is in flight anywhere while
    /// the view is collected; the result can never mix old and new entries.
    pub(crate) fn snapshot_view(&self) -> SnapshotView {
        let slots = self.slots.write();
        slots
            .iter()
            .map(|(key, slot)| (key.clone(), slot.window.lock().to_vec()))
            .collect()
    }

    /// Wholesale-replace the mapping with restored, policy-less histories
    pub(crate) fn replace_all(&self, histories: SnapshotView) {
        let mut slots = self.slots.write();
        *slots = histories
            .into_iter()
            .map(|(key, timestamps)| {
                let state = WindowState::from_history(timestamps);
                (key, Arc::new(LimiterSlot::dormant(state)))
            })
            .collect();
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}
