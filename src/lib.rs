//! Library exports for the dashboard state core.
/// Application directory helpers.
pub mod app_dirs;
/// Dashboard controller, view state, and explanation cache.
pub mod dashboard;
/// Dataset partitioning, cohorts, and filtering.
pub mod dataset;
/// Logging setup.
pub mod logging;
