//! Category lookup with lazy filter accumulation.
//!
//! Lookup order:
//! 1. a category already present in the filter list
//! 2. the documented reference table (appended as an unselected filter)
//! 3. the shared "unknown" sentinel (appended once, then reused)

use super::state::{CategoryFilter, CategoryInfo};

/// Sentinel id used for any category absent from the reference table
pub const UNKNOWN_CATEGORY_ID: &str = "unknown";
pub const UNKNOWN_CATEGORY_NAME: &str = "Unknown";

/// Documented feed categories, in display order
pub const DOCUMENTED_CATEGORIES: [(&str, &str); 3] = [
    ("9daef0d7-bf3c-4f50-921d-8e818c60fe61", "Greyhound"),
    ("161d9be2-e909-4326-8c2c-35ed71fb460b", "Harness"),
    ("4a2788f8-e825-4d36-9894-efd4baf1cfae", "Horse"),
];

/// Reference-table lookup
pub fn documented(category_id: &str) -> Option<CategoryInfo> {
    DOCUMENTED_CATEGORIES
        .iter()
        .find(|(id, _)| *id == category_id)
        .map(|(id, name)| CategoryInfo::new(id, name))
}

pub fn unknown_category() -> CategoryInfo {
    CategoryInfo::new(UNKNOWN_CATEGORY_ID, UNKNOWN_CATEGORY_NAME)
}

/// Resolve `category_id` against `filters`, returning its info and the
/// (possibly grown) filter list. Grows by at most one entry per call.
pub fn resolve(
    category_id: &str,
    filters: Vec<CategoryFilter>,
) -> (CategoryInfo, Vec<CategoryFilter>) {
    let mut filters = filters;
    let info = resolve_in(category_id, &mut filters);
    (info, filters)
}

/// In-place form used by the projector while it owns a working copy.
pub(crate) fn resolve_in(category_id: &str, filters: &mut Vec<CategoryFilter>) -> CategoryInfo {
    if let Some(existing) = find(filters, category_id) {
        return existing.info.clone();
    }

    if let Some(info) = documented(category_id) {
        filters.push(CategoryFilter::unselected(info.clone()));
        return info;
    }

    if let Some(sentinel) = find(filters, UNKNOWN_CATEGORY_ID) {
        return sentinel.info.clone();
    }

    let info = unknown_category();
    filters.push(CategoryFilter::unselected(info.clone()));
    info
}

pub fn find<'a>(filters: &'a [CategoryFilter], category_id: &str) -> Option<&'a CategoryFilter> {
    filters.iter().find(|f| f.info.category_id == category_id)
}
