use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::item::{ClassifiedItem, DetectedObject, MetaValue};

/// Errors raised while ingesting raw dataset rows.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// Raw dataset rows could not be parsed from JSON.
    #[error("Failed to parse raw dataset: {0}")]
    Parse(#[from] serde_json::Error),
}

/// One raw dataset row as delivered by the host, before classification.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawRow {
    pub true_y: String,
    /// Labels of the objects detected in this row, in detection order.
    #[serde(default)]
    pub objects: Vec<String>,
    #[serde(default)]
    pub metadata: BTreeMap<String, MetaValue>,
}

/// The raw dataset consumed by [`ItemStore::load`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawDataset {
    pub rows: Vec<RawRow>,
}

impl RawDataset {
    /// Parse a dataset from the host's JSON payload.
    pub fn from_json_str(payload: &str) -> Result<Self, DatasetError> {
        Ok(serde_json::from_str(payload)?)
    }
}

/// The two disjoint item sequences, partitioned by classification outcome.
///
/// Each sequence is ordered by original dataset position, and every item
/// index appears in exactly one of the two.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemCollection {
    pub error_instances: Vec<ClassifiedItem>,
    pub success_instances: Vec<ClassifiedItem>,
}

impl ItemCollection {
    /// Total number of items across both sequences.
    pub fn len(&self) -> usize {
        self.error_instances.len() + self.success_instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.error_instances.is_empty() && self.success_instances.is_empty()
    }
}

/// Immutable-once-loaded store of classified items.
///
/// Cohort and search changes only alter which subset is visible; the
/// underlying sequences are never rebuilt after a successful load, so
/// re-filtering stays cheap.
#[derive(Debug, Default)]
pub struct ItemStore {
    collection: ItemCollection,
    metadata_field_names: Vec<String>,
    loaded: bool,
}

impl ItemStore {
    /// Partition every dataset row by comparing predicted vs. true label.
    ///
    /// An absent dataset, or a prediction list that does not line up with
    /// the rows, yields an empty store. That is the normal "not yet
    /// loaded" condition, not an error.
    pub fn load(dataset: Option<&RawDataset>, predictions: &[String]) -> Self {
        let Some(dataset) = dataset else {
            tracing::debug!("Dataset not available yet; starting with empty collections");
            return Self::default();
        };
        if dataset.rows.len() != predictions.len() {
            tracing::debug!(
                rows = dataset.rows.len(),
                predictions = predictions.len(),
                "Prediction count does not match dataset rows; starting empty"
            );
            return Self::default();
        }

        let mut collection = ItemCollection::default();
        let mut metadata_field_names: Vec<String> = Vec::new();
        for (index, (row, predicted)) in dataset.rows.iter().zip(predictions).enumerate() {
            for name in row.metadata.keys() {
                if !metadata_field_names.iter().any(|known| known == name) {
                    metadata_field_names.push(name.clone());
                }
            }
            let objects = row
                .objects
                .iter()
                .enumerate()
                .map(|(object_index, label)| DetectedObject {
                    index: object_index,
                    label: label.clone(),
                })
                .collect();
            let misclassified = predicted != &row.true_y;
            let item = ClassifiedItem {
                index,
                predicted_y: predicted.clone(),
                true_y: row.true_y.clone(),
                objects,
                metadata: row.metadata.clone(),
                misclassified,
            };
            if misclassified {
                collection.error_instances.push(item);
            } else {
                collection.success_instances.push(item);
            }
        }

        tracing::info!(
            errors = collection.error_instances.len(),
            successes = collection.success_instances.len(),
            "Loaded classified items"
        );
        Self {
            collection,
            metadata_field_names,
            loaded: true,
        }
    }

    /// The full partitioned collection (unfiltered).
    pub fn collection(&self) -> &ItemCollection {
        &self.collection
    }

    /// Ordered metadata field names seen across the dataset, for table
    /// columns and the detail panel.
    pub fn metadata_field_names(&self) -> &[String] {
        &self.metadata_field_names
    }

    /// True once a dataset has been partitioned into the store.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Look up an item by its stable dataset index.
    pub fn find(&self, index: usize) -> Option<&ClassifiedItem> {
        self.collection
            .error_instances
            .iter()
            .chain(self.collection.success_instances.iter())
            .find(|item| item.index == index)
    }
}
