use crate::dataset::{CohortId, CohortSpec, ItemCollection, ItemStore};

/// Loaded store plus the currently visible subset.
///
/// The store is immutable once loaded; `visible` is recomputed from it on
/// every cohort or search change.
#[derive(Default)]
pub(super) struct DataState {
    pub(super) store: ItemStore,
    pub(super) visible: ItemCollection,
}

/// Saved cohorts and the active selection.
#[derive(Default)]
pub(super) struct CohortListState {
    pub(super) cohorts: Vec<CohortSpec>,
    pub(super) selected: Option<CohortId>,
}

impl CohortListState {
    /// The active cohort spec, when one is selected and still exists.
    pub(super) fn active(&self) -> Option<&CohortSpec> {
        let selected = self.selected.as_ref()?;
        self.cohorts.iter().find(|cohort| &cohort.id == selected)
    }

    /// Drop a dangling selection after cohorts were replaced.
    pub(super) fn prune_selection(&mut self) {
        if self.active().is_none() {
            self.selected = None;
        }
    }
}
