use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Scalar metadata value attached to a classified item.
///
/// Values arrive from the host as JSON scalars; the stringified form
/// (via [`std::fmt::Display`]) is what free-text search matches against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetaValue {
    /// Free-form text, e.g. a caption or a filename.
    Text(String),
    /// Numeric field, e.g. a confidence score.
    Number(f64),
    /// Boolean flag.
    Bool(bool),
}

impl std::fmt::Display for MetaValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MetaValue::Text(value) => f.write_str(value),
            MetaValue::Number(value) => write!(f, "{value}"),
            MetaValue::Bool(value) => write!(f, "{value}"),
        }
    }
}

impl From<&str> for MetaValue {
    fn from(value: &str) -> Self {
        MetaValue::Text(value.to_string())
    }
}

impl From<String> for MetaValue {
    fn from(value: String) -> Self {
        MetaValue::Text(value)
    }
}

impl From<f64> for MetaValue {
    fn from(value: f64) -> Self {
        MetaValue::Number(value)
    }
}

impl From<bool> for MetaValue {
    fn from(value: bool) -> Self {
        MetaValue::Bool(value)
    }
}

/// One detected sub-object within a classified item.
///
/// Objects are addressed by their position within the owning item; the
/// label is opaque to the core and only carried for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectedObject {
    pub index: usize,
    pub label: String,
}

/// A dataset row joined with its model prediction.
///
/// `index` is the row's position in the original raw dataset and stays
/// stable across cohort filtering. Immutable after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedItem {
    pub index: usize,
    pub predicted_y: String,
    pub true_y: String,
    pub objects: Vec<DetectedObject>,
    pub metadata: BTreeMap<String, MetaValue>,
    pub misclassified: bool,
}

impl ClassifiedItem {
    /// True when `query` is a case-sensitive substring of at least one
    /// stringified metadata value. An empty query matches everything.
    pub fn matches_search(&self, query: &str) -> bool {
        if query.is_empty() {
            return true;
        }
        self.metadata
            .values()
            .any(|value| value.to_string().contains(query))
    }

    /// Look up a detected object by its index within this item.
    pub fn object(&self, object_index: usize) -> Option<&DetectedObject> {
        self.objects.iter().find(|object| object.index == object_index)
    }
}
