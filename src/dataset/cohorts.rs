use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier for a saved cohort.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CohortId(String);

impl CohortId {
    /// Create a new unique cohort identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Rehydrate a cohort identifier from a stored string.
    pub fn from_string(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CohortId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for CohortId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A named subset of the dataset defined by a membership snapshot.
///
/// Membership is a snapshot of item indices taken when the cohort was
/// created; later selection changes never alter an existing cohort. The
/// core only ever consults [`CohortSpec::contains`], so richer membership
/// rules can live with the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CohortSpec {
    pub id: CohortId,
    pub name: String,
    #[serde(default)]
    pub members: BTreeSet<usize>,
    /// When true the cohort places no restriction on membership.
    #[serde(default)]
    pub all_items: bool,
}

impl CohortSpec {
    /// Create a cohort from a snapshot of item indices.
    pub fn new(name: impl Into<String>, members: BTreeSet<usize>) -> Self {
        Self {
            id: CohortId::new(),
            name: name.into(),
            members,
            all_items: false,
        }
    }

    /// Create the unrestricted cohort that shows the whole dataset.
    pub fn everything(name: impl Into<String>) -> Self {
        Self {
            id: CohortId::new(),
            name: name.into(),
            members: BTreeSet::new(),
            all_items: true,
        }
    }

    /// Membership test consulted by the visibility filter.
    pub fn contains(&self, index: usize) -> bool {
        self.all_items || self.members.contains(&index)
    }
}
