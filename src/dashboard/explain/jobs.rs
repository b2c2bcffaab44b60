//! Worker threads for explanation compute calls.

use std::sync::{
    Arc,
    atomic::AtomicBool,
    mpsc::Sender,
};
use std::thread;

use super::{Artifact, ExplainError, ExplanationKey, ExplanationProvider};

/// Completion message sent back by an explanation worker.
pub(super) struct ExplanationJobResult {
    pub key: ExplanationKey,
    pub result: Result<Artifact, ExplainError>,
}

/// Run one compute call on its own thread, fire-and-forget.
///
/// Each call gets a fresh cancellation token that the core never triggers;
/// the provider may honor it on its own schedule. The completion message is
/// delivered whenever the call finishes, in any order relative to other
/// keys, even if the user has navigated away.
pub(super) fn spawn_explanation_job(
    provider: ExplanationProvider,
    key: ExplanationKey,
    results: Sender<ExplanationJobResult>,
) {
    let cancel = Arc::new(AtomicBool::new(false));
    thread::spawn(move || {
        let result = provider(key, cancel);
        let _ = results.send(ExplanationJobResult { key, result });
    });
}
