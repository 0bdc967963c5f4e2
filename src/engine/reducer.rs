//! Pure reducer: (State, Event, now) -> (State, Vec<Note>)
//!
//! All board transitions happen here. The previous state is only read; a
//! complete new state is returned, with the projection recomputed on every
//! event.
//!
//! | Event           | Steps                              |
//! |-----------------|------------------------------------|
//! | `FetchReceived` | merge → sweep → project            |
//! | `Tick`          | sweep → project                    |
//! | `ToggleFilter`  | flip selection (if known) → project|
//! | `ClearFilters`  | deselect all → project             |

use std::collections::HashSet;

use super::category::find;
use super::events::{Event, Note};
use super::normalize::merge;
use super::projection::project;
use super::state::{AggregateState, CategoryFilter, RaceRecord, Timestamp};
use super::sweep::sweep;

pub const DEFAULT_HIDE_DELAY_SECS: i64 = 60;
pub const DEFAULT_MAX_DISPLAYABLE_RACES: usize = 5;

/// Engine parameters; supplied by configuration, never read from constants
/// inside the sweep or projection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReducerConfig {
    /// Eviction threshold for the sweep
    pub hide_delay_secs: i64,
    /// Projection cap
    pub max_displayable_races: usize,
}

impl Default for ReducerConfig {
    fn default() -> Self {
        Self {
            hide_delay_secs: DEFAULT_HIDE_DELAY_SECS,
            max_displayable_races: DEFAULT_MAX_DISPLAYABLE_RACES,
        }
    }
}

/// Result of processing an event
#[derive(Debug)]
pub struct ReducerOutput {
    pub state: AggregateState,
    pub notes: Vec<Note>,
}

/// Pure reducer function
pub fn reduce(
    state: &AggregateState,
    event: Event,
    now: Timestamp,
    cfg: &ReducerConfig,
) -> ReducerOutput {
    let mut notes = Vec::new();

    let (retained, filters) = match event {
        Event::FetchReceived(payload) => {
            let merged = merge(payload.data.race_summaries.values(), &state.retained);
            let added = new_ids(&state.retained, &merged);
            if !added.is_empty() {
                notes.push(Note::RacesAdded { race_ids: added });
            }
            let retained = sweep_with_note(&merged, now, cfg, &mut notes);
            (retained, state.filters.clone())
        }

        Event::Tick => {
            let retained = sweep_with_note(&state.retained, now, cfg, &mut notes);
            (retained, state.filters.clone())
        }

        Event::ToggleFilter { category_id } => {
            let mut filters = state.filters.clone();
            match filters
                .iter_mut()
                .find(|f| f.info.category_id == category_id)
            {
                Some(filter) => {
                    filter.selected = !filter.selected;
                    notes.push(Note::FilterToggled {
                        category_id,
                        selected: filter.selected,
                    });
                }
                None => notes.push(Note::UnknownFilterIgnored { category_id }),
            }
            (state.retained.clone(), filters)
        }

        Event::ClearFilters => {
            let filters: Vec<CategoryFilter> = state
                .filters
                .iter()
                .map(|f| CategoryFilter::unselected(f.info.clone()))
                .collect();
            notes.push(Note::FiltersCleared);
            (state.retained.clone(), filters)
        }
    };

    let (races, grown) = project(&retained, &filters, now, cfg.max_displayable_races);
    let discovered: Vec<String> = grown
        .iter()
        .filter(|f| find(&filters, &f.info.category_id).is_none())
        .map(|f| f.info.category_id.clone())
        .collect();
    if !discovered.is_empty() {
        notes.push(Note::CategoriesDiscovered {
            category_ids: discovered,
        });
    }

    ReducerOutput {
        state: AggregateState {
            retained,
            filters: grown,
            races,
        },
        notes,
    }
}

/// Apply a sequence of events at the same instant, threading state through.
pub fn reduce_all<I>(
    state: &AggregateState,
    events: I,
    now: Timestamp,
    cfg: &ReducerConfig,
) -> ReducerOutput
where
    I: IntoIterator<Item = Event>,
{
    let mut current = state.clone();
    let mut notes = Vec::new();
    for event in events {
        let out = reduce(&current, event, now, cfg);
        current = out.state;
        notes.extend(out.notes);
    }
    ReducerOutput {
        state: current,
        notes,
    }
}

fn sweep_with_note(
    retained: &[RaceRecord],
    now: Timestamp,
    cfg: &ReducerConfig,
    notes: &mut Vec<Note>,
) -> Vec<RaceRecord> {
    let kept = sweep(retained, now, cfg.hide_delay_secs);
    if kept.len() != retained.len() {
        let kept_ids: HashSet<&str> = kept.iter().map(|r| r.race_id.as_str()).collect();
        let evicted = retained
            .iter()
            .filter(|r| !kept_ids.contains(r.race_id.as_str()))
            .map(|r| r.race_id.clone())
            .collect();
        notes.push(Note::RacesEvicted { race_ids: evicted });
    }
    kept
}

fn new_ids(before: &[RaceRecord], after: &[RaceRecord]) -> Vec<String> {
    let known: HashSet<&str> = before.iter().map(|r| r.race_id.as_str()).collect();
    after
        .iter()
        .filter(|r| !known.contains(r.race_id.as_str()))
        .map(|r| r.race_id.clone())
        .collect()
}
