//! Dashboard controller layer: view state, selection, and explanations.

mod controller;
mod explain;
mod selection;
mod view;

pub use controller::DashboardController;
pub use explain::{
    Artifact, ExplainError, ExplanationCache, ExplanationKey, ExplanationProvider,
    ExplanationState, ExplanationView,
};
pub use selection::SelectionState;
pub use view::{DEFAULT_NUM_ROWS, DEFAULT_PAGE_SIZE, DashboardTab, ViewParameters};
