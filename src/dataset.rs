//! Dataset domain layer: classified items, cohorts, filtering, and config.

/// Dashboard configuration persistence (TOML under the app root).
pub mod config;
/// Visibility filtering by cohort membership and search text.
pub mod filter;

mod cohorts;
mod item;
mod store;

pub use cohorts::{CohortId, CohortSpec};
pub use config::{ConfigError, DashboardConfig, FeatureFlags};
pub use item::{ClassifiedItem, DetectedObject, MetaValue};
pub use store::{DatasetError, ItemCollection, ItemStore, RawDataset, RawRow};
