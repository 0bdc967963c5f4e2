//! Typed events accepted by the reducer.

use serde::Serialize;

use crate::feed::FeedPayload;

/// Every external occurrence that can change the board
#[derive(Debug, Clone)]
pub enum Event {
    /// A successful feed payload arrived
    FetchReceived(FeedPayload),
    /// Clock advanced
    Tick,
    /// Flip the selection of one category filter
    ToggleFilter { category_id: String },
    /// Deselect every category filter
    ClearFilters,
}

impl Event {
    pub fn name(&self) -> &'static str {
        match self {
            Event::FetchReceived(_) => "fetch_received",
            Event::Tick => "tick",
            Event::ToggleFilter { .. } => "toggle_filter",
            Event::ClearFilters => "clear_filters",
        }
    }
}

/// Observations the reducer reports back without performing I/O
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Note {
    RacesAdded { race_ids: Vec<String> },
    RacesEvicted { race_ids: Vec<String> },
    CategoriesDiscovered { category_ids: Vec<String> },
    FilterToggled { category_id: String, selected: bool },
    UnknownFilterIgnored { category_id: String },
    FiltersCleared,
}

impl Note {
    pub fn name(&self) -> &'static str {
        match self {
            Note::RacesAdded { .. } => "races_added",
            Note::RacesEvicted { .. } => "races_evicted",
            Note::CategoriesDiscovered { .. } => "categories_discovered",
            Note::FilterToggled { .. } => "filter_toggled",
            Note::UnknownFilterIgnored { .. } => "unknown_filter_ignored",
            Note::FiltersCleared => "filters_cleared",
        }
    }
}
