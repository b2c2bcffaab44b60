//! Cohort and search visibility filtering.
//!
//! Filtering is a pure function of (collection, predicate, search value) so
//! it stays idempotent and trivially testable. The loaded store is never
//! mutated; only the visible subset changes.

use super::cohorts::CohortSpec;
use super::item::ClassifiedItem;
use super::store::ItemCollection;

/// Produce the visible subset of each sequence, preserving source order.
///
/// An item stays visible iff the membership predicate accepts its index and
/// the search value is empty or a case-sensitive substring of at least one
/// stringified metadata value.
pub fn apply(
    collection: &ItemCollection,
    predicate: impl Fn(usize) -> bool,
    search_value: &str,
) -> ItemCollection {
    ItemCollection {
        error_instances: keep_visible(&collection.error_instances, &predicate, search_value),
        success_instances: keep_visible(&collection.success_instances, &predicate, search_value),
    }
}

/// Convenience wrapper using a [`CohortSpec`] snapshot as the predicate.
pub fn apply_cohort(
    collection: &ItemCollection,
    cohort: &CohortSpec,
    search_value: &str,
) -> ItemCollection {
    apply(collection, |index| cohort.contains(index), search_value)
}

fn keep_visible(
    items: &[ClassifiedItem],
    predicate: &impl Fn(usize) -> bool,
    search_value: &str,
) -> Vec<ClassifiedItem> {
    items
        .iter()
        .filter(|item| predicate(item.index) && item.matches_search(search_value))
        .cloned()
        .collect()
}
