//! Inflight tracking for explanation requests.

use std::collections::HashSet;
use std::sync::Mutex;

use super::ExplanationKey;

/// Tracks keys with an outstanding compute call to prevent duplicate work.
///
/// Claiming a key is a single atomic decision: either this call marked it
/// inflight and must issue the compute, or another already did.
pub(super) struct InflightTracker {
    inflight: Mutex<HashSet<ExplanationKey>>,
}

impl InflightTracker {
    pub(super) fn new() -> Self {
        Self {
            inflight: Mutex::new(HashSet::new()),
        }
    }

    /// Marks a key inflight if it is not already inflight.
    pub(super) fn try_mark_inflight(&self, key: ExplanationKey) -> bool {
        let mut inflight = self.inflight.lock().expect("explanation inflight lock");
        if inflight.contains(&key) {
            return false;
        }
        inflight.insert(key);
        true
    }

    /// Clears the inflight marker for a key once its call completed.
    pub(super) fn clear_inflight(&self, key: ExplanationKey) {
        let mut inflight = self.inflight.lock().expect("explanation inflight lock");
        inflight.remove(&key);
    }
}
