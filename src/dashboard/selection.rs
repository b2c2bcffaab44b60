use std::collections::BTreeSet;

use crate::dataset::{ClassifiedItem, CohortSpec};

/// Multi-select and detail-view selection state.
///
/// The multi-selection feeds ad-hoc cohort creation; the single selected
/// item drives the detail panel and explanation requests.
#[derive(Clone, Debug, Default)]
pub struct SelectionState {
    selected_indices: BTreeSet<usize>,
    selected_item: Option<ClassifiedItem>,
    panel_open: bool,
}

impl SelectionState {
    /// Add or remove one item index from the multi-selection.
    pub fn toggle_select(&mut self, index: usize) {
        if !self.selected_indices.remove(&index) {
            self.selected_indices.insert(index);
        }
    }

    /// Replace the whole multi-selection, e.g. from a table row range.
    pub fn set_selected_indices(&mut self, indices: impl IntoIterator<Item = usize>) {
        self.selected_indices = indices.into_iter().collect();
    }

    pub fn clear_selection(&mut self) {
        self.selected_indices.clear();
    }

    pub fn selected_indices(&self) -> &BTreeSet<usize> {
        &self.selected_indices
    }

    /// Open the detail panel on an item.
    pub fn open_detail(&mut self, item: ClassifiedItem) {
        self.selected_item = Some(item);
        self.panel_open = true;
    }

    /// The panel close affordance toggles visibility.
    pub fn toggle_panel(&mut self) {
        self.panel_open = !self.panel_open;
    }

    pub fn selected_item(&self) -> Option<&ClassifiedItem> {
        self.selected_item.as_ref()
    }

    pub fn panel_open(&self) -> bool {
        self.panel_open
    }

    /// Build a cohort from the multi-selection as it is right now.
    ///
    /// The membership set is a snapshot; mutating the selection afterwards
    /// does not affect the returned cohort.
    pub fn snapshot_cohort(&self, name: impl Into<String>) -> CohortSpec {
        CohortSpec::new(name, self.selected_indices.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn item(index: usize) -> ClassifiedItem {
        ClassifiedItem {
            index,
            predicted_y: "cat".into(),
            true_y: "cat".into(),
            objects: Vec::new(),
            metadata: BTreeMap::new(),
            misclassified: false,
        }
    }

    #[test]
    fn toggle_adds_then_removes() {
        let mut selection = SelectionState::default();
        selection.toggle_select(3);
        assert!(selection.selected_indices().contains(&3));
        selection.toggle_select(3);
        assert!(selection.selected_indices().is_empty());
    }

    #[test]
    fn open_detail_opens_the_panel() {
        let mut selection = SelectionState::default();
        assert!(!selection.panel_open());
        selection.open_detail(item(5));
        assert!(selection.panel_open());
        assert_eq!(selection.selected_item().unwrap().index, 5);
    }

    #[test]
    fn panel_toggle_flips_visibility() {
        let mut selection = SelectionState::default();
        selection.open_detail(item(5));
        selection.toggle_panel();
        assert!(!selection.panel_open());
        selection.toggle_panel();
        assert!(selection.panel_open());
    }

    #[test]
    fn snapshot_cohort_ignores_later_selection_changes() {
        let mut selection = SelectionState::default();
        selection.set_selected_indices([1, 2, 3]);
        let cohort = selection.snapshot_cohort("picked");
        selection.toggle_select(9);
        selection.clear_selection();
        assert!(cohort.contains(2));
        assert!(!cohort.contains(9));
    }
}
