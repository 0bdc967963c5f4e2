//! Bounded, filtered view over the retained set.

use std::collections::HashSet;

use super::category::resolve_in;
use super::state::{CategoryFilter, DisplayRace, RaceRecord, Timestamp};

/// Ids of every selected filter
pub fn selected_ids(filters: &[CategoryFilter]) -> HashSet<&str> {
    filters
        .iter()
        .filter(|f| f.selected)
        .map(|f| f.info.category_id.as_str())
        .collect()
}

/// Build the display list.
///
/// Walks `retained` in start order, keeps races of a selected category (all
/// races when nothing is selected) and stops after `max_count`. Category
/// resolution may append filters; the grown list is returned alongside.
pub fn project(
    retained: &[RaceRecord],
    filters: &[CategoryFilter],
    now: Timestamp,
    max_count: usize,
) -> (Vec<DisplayRace>, Vec<CategoryFilter>) {
    let selected: HashSet<String> = selected_ids(filters)
        .into_iter()
        .map(str::to_string)
        .collect();
    let mut filters = filters.to_vec();

    let races: Vec<DisplayRace> = retained
        .iter()
        .filter(|r| selected.is_empty() || selected.contains(&r.category_id))
        .take(max_count)
        .map(|r| {
            let category = resolve_in(&r.category_id, &mut filters);
            let countdown = r.advertised_start.saturating_sub(now);
            DisplayRace {
                race: r.clone(),
                category,
                countdown,
                started: countdown <= 0,
            }
        })
        .collect();

    (races, filters)
}
