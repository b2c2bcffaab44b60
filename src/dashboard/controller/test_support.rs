use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use super::DashboardController;
use crate::dashboard::explain::{ExplainError, ExplanationKey, ExplanationProvider, ExplanationState};
use crate::dataset::{MetaValue, RawDataset, RawRow};

const CAPTIONS: [&str; 10] = [
    "red car",
    "blue bus",
    "green car",
    "yellow taxi",
    "red bus",
    "gray van",
    "white car",
    "black bus",
    "silver car",
    "purple van",
];

/// Ten rows, all labelled `cat`; the first six are predicted `dog` so the
/// partition is 6 misclassified / 4 correct. Every item carries two
/// detected objects and a caption.
pub(super) fn sample_dataset() -> (RawDataset, Vec<String>) {
    let rows = CAPTIONS
        .iter()
        .map(|caption| RawRow {
            true_y: "cat".to_string(),
            objects: vec!["head".to_string(), "wheel".to_string()],
            metadata: BTreeMap::from([(
                "caption".to_string(),
                MetaValue::from(*caption),
            )]),
        })
        .collect();
    let predictions = (0..CAPTIONS.len())
        .map(|index| if index < 6 { "dog" } else { "cat" }.to_string())
        .collect();
    (RawDataset { rows }, predictions)
}

/// A controller with the sample dataset loaded and the given provider.
pub(super) fn loaded_controller(provider: Option<ExplanationProvider>) -> DashboardController {
    let mut controller = DashboardController::new(provider);
    let (dataset, predictions) = sample_dataset();
    controller.initialize(Some(&dataset), &predictions);
    controller
}

/// Provider that counts invocations and resolves immediately.
pub(super) fn counting_provider() -> (ExplanationProvider, Arc<AtomicUsize>) {
    let invocations = Arc::new(AtomicUsize::new(0));
    let seen = invocations.clone();
    let provider: ExplanationProvider = Arc::new(move |key, _cancel| {
        seen.fetch_add(1, Ordering::SeqCst);
        Ok(format!(
            "explanation for item {} object {}",
            key.item_index, key.object_index
        ))
    });
    (provider, invocations)
}

/// Provider that counts invocations but blocks until the gate is released,
/// keeping the request observably in flight.
pub(super) fn gated_provider() -> (ExplanationProvider, Arc<AtomicUsize>, Sender<()>) {
    let invocations = Arc::new(AtomicUsize::new(0));
    let seen = invocations.clone();
    let (gate_tx, gate_rx) = std::sync::mpsc::channel::<()>();
    let gate = Mutex::new(gate_rx);
    let provider: ExplanationProvider = Arc::new(move |key, _cancel| {
        seen.fetch_add(1, Ordering::SeqCst);
        let _ = gate.lock().expect("gate lock").recv();
        Ok(format!(
            "explanation for item {} object {}",
            key.item_index, key.object_index
        ))
    });
    (provider, invocations, gate_tx)
}

/// Provider whose first call fails and every later call succeeds.
pub(super) fn failing_then_succeeding_provider() -> (ExplanationProvider, Arc<AtomicUsize>) {
    let invocations = Arc::new(AtomicUsize::new(0));
    let seen = invocations.clone();
    let provider: ExplanationProvider = Arc::new(move |key, _cancel| {
        if seen.fetch_add(1, Ordering::SeqCst) == 0 {
            Err(ExplainError::Compute("synthetic failure".to_string()))
        } else {
            Ok(format!(
                "explanation for item {} object {}",
                key.item_index, key.object_index
            ))
        }
    });
    (provider, invocations)
}

/// Poll completions until `key` reaches `expected` or the deadline passes.
pub(super) fn wait_for_state(
    controller: &mut DashboardController,
    key: ExplanationKey,
    expected: ExplanationState,
) -> bool {
    let deadline = Instant::now() + Duration::from_secs(5);
    loop {
        controller.poll_completions();
        if controller.explanations().state(key) == expected {
            return true;
        }
        if Instant::now() > deadline {
            return false;
        }
        std::thread::sleep(Duration::from_millis(2));
    }
}
