use crate::dataset::{
    ClassifiedItem, CohortId, CohortSpec, DashboardConfig, FeatureFlags, RawDataset, config,
    filter,
};

use super::explain::{ExplanationCache, ExplanationKey, ExplanationProvider};
use super::selection::SelectionState;
use super::view::{DashboardTab, ViewParameters};

mod state;
#[cfg(test)]
mod test_support;

use state::{CohortListState, DataState};

/// Maintains dashboard state and serves read-only views to the renderer.
///
/// The controller is the single owner of every mutable piece: the loaded
/// store, the filtered view, cohorts, view parameters, selection, and the
/// explanation cache. The renderer calls the operation methods and reads
/// the accessors; workers only ever talk back through the completion
/// channel drained by [`DashboardController::poll_completions`].
pub struct DashboardController {
    data: DataState,
    cohorts: CohortListState,
    view: ViewParameters,
    selection: SelectionState,
    explanations: ExplanationCache,
    provider: Option<ExplanationProvider>,
    feature_flags: FeatureFlags,
}

impl DashboardController {
    /// Create a controller; `provider` is the external compute call and may
    /// be absent when the explanation feature is disabled by the host.
    pub fn new(provider: Option<ExplanationProvider>) -> Self {
        Self {
            data: DataState::default(),
            cohorts: CohortListState::default(),
            view: ViewParameters::default(),
            selection: SelectionState::default(),
            explanations: ExplanationCache::new(),
            provider,
            feature_flags: FeatureFlags::default(),
        }
    }

    /// Load persisted cohorts and flags from the config file.
    pub fn load_configuration(&mut self) -> Result<(), config::ConfigError> {
        let cfg = config::load_or_default()?;
        self.apply_config(cfg);
        Ok(())
    }

    /// Persist the current cohorts and flags.
    pub fn save_configuration(&self) -> Result<(), config::ConfigError> {
        config::save(&self.current_config())
    }

    /// Apply an already-loaded configuration.
    pub fn apply_config(&mut self, cfg: DashboardConfig) {
        self.cohorts.cohorts = cfg.cohorts;
        self.cohorts.selected = cfg.last_selected_cohort;
        self.cohorts.prune_selection();
        self.feature_flags = cfg.feature_flags;
        self.on_cohort_or_search_changed();
    }

    /// Snapshot the persistable part of the controller state.
    pub fn current_config(&self) -> DashboardConfig {
        DashboardConfig {
            cohorts: self.cohorts.cohorts.clone(),
            last_selected_cohort: self.cohorts.selected.clone(),
            feature_flags: self.feature_flags.clone(),
        }
    }

    /// Mount entry point: partition the dataset once and reset the view.
    ///
    /// An absent dataset leaves the store empty, which renders as an empty
    /// state rather than an error.
    pub fn initialize(&mut self, dataset: Option<&RawDataset>, predictions: &[String]) {
        self.data.store = crate::dataset::ItemStore::load(dataset, predictions);
        self.view = ViewParameters::default();
        self.on_cohort_or_search_changed();
    }

    /// Recompute the visible subset after a cohort or search change.
    ///
    /// This is the only re-filter path; there are no implicit
    /// render-triggered side effects.
    pub fn on_cohort_or_search_changed(&mut self) {
        let collection = self.data.store.collection();
        self.data.visible = match self.cohorts.active() {
            Some(cohort) => filter::apply_cohort(collection, cohort, &self.view.search_value),
            None => filter::apply(collection, |_| true, &self.view.search_value),
        };
    }

    /// Store a new search query and re-filter.
    pub fn set_search_value(&mut self, value: impl Into<String>) {
        self.view.search_value = value.into();
        self.on_cohort_or_search_changed();
    }

    /// Switch the active cohort and re-filter. Unknown ids are ignored.
    pub fn select_cohort(&mut self, id: &CohortId) {
        if !self.cohorts.cohorts.iter().any(|cohort| &cohort.id == id) {
            tracing::warn!(cohort = %id, "Ignoring selection of unknown cohort");
            return;
        }
        self.cohorts.selected = Some(id.clone());
        self.on_cohort_or_search_changed();
    }

    /// Register a cohort, optionally switching to it immediately.
    pub fn add_cohort(&mut self, spec: CohortSpec, switch_to: bool) {
        let id = spec.id.clone();
        self.cohorts.cohorts.push(spec);
        if switch_to {
            self.select_cohort(&id);
        }
    }

    /// Build a cohort from the current multi-selection snapshot.
    pub fn create_cohort_from_selection(&mut self, name: impl Into<String>, switch_to: bool) -> CohortId {
        let spec = self.selection.snapshot_cohort(name);
        let id = spec.id.clone();
        self.add_cohort(spec, switch_to);
        id
    }

    /// Open an item in the detail panel, optionally requesting the
    /// explanation for one of its detected objects.
    ///
    /// Without an object there is no explanation activity. With one, the
    /// cache decides: cached keys short-circuit, inflight keys are left to
    /// the outstanding call, and only fresh keys reach the provider. A
    /// missing provider or a disabled feature flag makes the request a
    /// no-op.
    pub fn select_item(&mut self, item_index: usize, object_index: Option<usize>) {
        let Some(item) = self.data.store.find(item_index).cloned() else {
            tracing::warn!(item = item_index, "Ignoring selection of unknown item");
            return;
        };
        self.selection.open_detail(item);
        let Some(object_index) = object_index else {
            return;
        };
        if !self.feature_flags.explanations_enabled {
            return;
        }
        let Some(provider) = self.provider.as_ref() else {
            return;
        };
        self.explanations
            .request(ExplanationKey::new(item_index, object_index), provider);
    }

    /// Drain explanation completions into the cache. Call from the owner's
    /// tick (or after waiting on a request in tests).
    pub fn poll_completions(&mut self) -> usize {
        self.explanations.poll_completions()
    }

    // View operations, forwarded so the renderer only talks to the
    // controller.

    pub fn switch_tab(&mut self, tab: DashboardTab) {
        self.view.switch_tab(tab);
    }

    pub fn set_image_dim_from_slider(&mut self, slider_value: u32) -> u32 {
        self.view.set_image_dim_from_slider(slider_value)
    }

    pub fn set_num_rows(&mut self, num_rows: u32) {
        self.view.set_num_rows(num_rows);
    }

    pub fn set_page_size(&mut self, page_size: u32) {
        self.view.set_page_size(page_size);
    }

    // Selection operations.

    pub fn toggle_select(&mut self, index: usize) {
        self.selection.toggle_select(index);
    }

    pub fn set_selected_indices(&mut self, indices: impl IntoIterator<Item = usize>) {
        self.selection.set_selected_indices(indices);
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear_selection();
    }

    pub fn toggle_panel(&mut self) {
        self.selection.toggle_panel();
    }

    // Read-only views for the presentation layer.

    /// Misclassified items visible under the active cohort and search.
    pub fn error_instances(&self) -> &[ClassifiedItem] {
        &self.data.visible.error_instances
    }

    /// Correctly classified items visible under the active cohort and search.
    pub fn success_instances(&self) -> &[ClassifiedItem] {
        &self.data.visible.success_instances
    }

    /// Metadata field names for table columns and the detail panel.
    pub fn metadata_field_names(&self) -> &[String] {
        self.data.store.metadata_field_names()
    }

    pub fn view(&self) -> &ViewParameters {
        &self.view
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn explanations(&self) -> &ExplanationCache {
        &self.explanations
    }

    pub fn cohorts(&self) -> &[CohortSpec] {
        &self.cohorts.cohorts
    }

    pub fn selected_cohort(&self) -> Option<&CohortSpec> {
        self.cohorts.active()
    }
}
