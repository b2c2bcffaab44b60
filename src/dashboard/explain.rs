//! Memoized, deduplicated explanation requests.
//!
//! The cache owns the artifact and loading maps exclusively; other
//! components only read snapshots through its accessors, which is what
//! keeps the at-most-one-outstanding-call invariant enforceable.

mod jobs;
mod pending;

use std::collections::{BTreeMap, HashMap};
use std::sync::{
    Arc,
    atomic::AtomicBool,
    mpsc::{Receiver, Sender, TryRecvError},
};

use thiserror::Error;

use jobs::ExplanationJobResult;
use pending::InflightTracker;

/// Serialized explanation artifact, opaque to the core.
pub type Artifact = String;

/// External compute call producing an explanation for one key.
///
/// The second argument is a cancellation token threaded through for the
/// provider's benefit; the core creates a fresh token per call and never
/// sets it.
pub type ExplanationProvider =
    Arc<dyn Fn(ExplanationKey, Arc<AtomicBool>) -> Result<Artifact, ExplainError> + Send + Sync>;

/// Failure reported by the external compute call.
#[derive(Debug, Clone, Error)]
pub enum ExplainError {
    /// The provider rejected or failed the computation.
    #[error("explanation compute failed: {0}")]
    Compute(String),
}

/// Addresses one detected object within one item.
///
/// Keys are only ever formed for a real sub-object; "the item itself"
/// never reaches the cache (selection without an object is handled before
/// a key exists).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExplanationKey {
    pub item_index: usize,
    pub object_index: usize,
}

impl ExplanationKey {
    pub fn new(item_index: usize, object_index: usize) -> Self {
        Self {
            item_index,
            object_index,
        }
    }
}

/// Lifecycle of one key, derived from presence in the two maps.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExplanationState {
    /// Never requested, or cleared after a failed compute.
    NotRequested,
    /// Exactly one compute call is outstanding.
    Loading,
    /// The artifact is cached; no further compute will ever be issued.
    Ready,
}

/// Rendering view of one requested key.
#[derive(Clone, Debug, PartialEq)]
pub enum ExplanationView {
    /// Show a spinner.
    Loading,
    /// Show the artifact.
    Ready(Artifact),
}

/// Keyed store of explanation artifacts with async population.
///
/// All map mutation happens on the owning thread; workers only report
/// completions over the channel. The inflight tracker is the one structure
/// a concurrent claim could race on, and it decides atomically.
pub struct ExplanationCache {
    cache: HashMap<ExplanationKey, Artifact>,
    loading: HashMap<ExplanationKey, bool>,
    inflight: InflightTracker,
    result_tx: Sender<ExplanationJobResult>,
    result_rx: Receiver<ExplanationJobResult>,
}

impl Default for ExplanationCache {
    fn default() -> Self {
        Self::new()
    }
}

impl ExplanationCache {
    pub fn new() -> Self {
        let (result_tx, result_rx) = std::sync::mpsc::channel();
        Self {
            cache: HashMap::new(),
            loading: HashMap::new(),
            inflight: InflightTracker::new(),
            result_tx,
            result_rx,
        }
    }

    /// Request the explanation for `key`, memoized for the session.
    ///
    /// A cached key short-circuits without any compute call. A key already
    /// inflight is left alone; the earlier call's completion serves every
    /// observer. Only a key that is neither issues a compute, so at most
    /// one call per key is ever made.
    pub fn request(&mut self, key: ExplanationKey, provider: &ExplanationProvider) {
        if self.cache.contains_key(&key) {
            self.loading.insert(key, false);
            return;
        }
        if !self.inflight.try_mark_inflight(key) {
            return;
        }
        self.loading.insert(key, true);
        tracing::debug!(
            item = key.item_index,
            object = key.object_index,
            "Requesting explanation"
        );
        jobs::spawn_explanation_job(provider.clone(), key, self.result_tx.clone());
    }

    /// Drain completed compute calls into the cache.
    ///
    /// Completions are applied regardless of what the user is currently
    /// viewing; a stale write is harmless because renderers read current
    /// state. A failed call clears the key back to not-requested so a
    /// later selection can retry. Returns the number of messages applied.
    pub fn poll_completions(&mut self) -> usize {
        let mut applied = 0;
        loop {
            let message = match self.result_rx.try_recv() {
                Ok(message) => message,
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => break,
            };
            self.inflight.clear_inflight(message.key);
            match message.result {
                Ok(artifact) => {
                    self.cache.insert(message.key, artifact);
                    self.loading.insert(message.key, false);
                }
                Err(error) => {
                    self.loading.remove(&message.key);
                    tracing::warn!(
                        item = message.key.item_index,
                        object = message.key.object_index,
                        %error,
                        "Explanation compute failed; key cleared for retry"
                    );
                }
            }
            applied += 1;
        }
        applied
    }

    /// Current lifecycle state of a key.
    pub fn state(&self, key: ExplanationKey) -> ExplanationState {
        if self.cache.contains_key(&key) {
            return ExplanationState::Ready;
        }
        if self.loading.get(&key).copied().unwrap_or(false) {
            return ExplanationState::Loading;
        }
        ExplanationState::NotRequested
    }

    /// The cached artifact for a key, if ready.
    pub fn artifact(&self, key: ExplanationKey) -> Option<&str> {
        self.cache.get(&key).map(String::as_str)
    }

    /// Per-object views for one item, keyed by object index, for rendering.
    ///
    /// Objects that were never requested are absent.
    pub fn views_for_item(&self, item_index: usize) -> BTreeMap<usize, ExplanationView> {
        let mut views = BTreeMap::new();
        for (key, artifact) in &self.cache {
            if key.item_index == item_index {
                views.insert(key.object_index, ExplanationView::Ready(artifact.clone()));
            }
        }
        for (key, loading) in &self.loading {
            if key.item_index == item_index && *loading && !self.cache.contains_key(key) {
                views.insert(key.object_index, ExplanationView::Loading);
            }
        }
        views
    }
}
