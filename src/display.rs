//! Plain-text rendering of the board.

use chrono::{Local, TimeZone};
use std::fmt::Display;

use crate::engine::state::{AggregateState, CategoryFilter, DisplayRace};

/// "1h 2m 5s", zero parts omitted; " Ago" appended once started.
pub fn format_countdown(secs: i64) -> String {
    if secs == 0 {
        return "0s".to_string();
    }
    let elapsed = secs < 0;
    let total = secs.unsigned_abs();

    let parts: Vec<String> = [(total / 3600, "h"), (total % 3600 / 60, "m"), (total % 60, "s")]
        .iter()
        .filter(|(count, _)| *count > 0)
        .map(|(count, unit)| format!("{count}{unit}"))
        .collect();

    let mut out = parts.join(" ");
    if elapsed {
        out.push_str(" Ago");
    }
    out
}

pub fn format_start_in<Tz>(epoch_secs: i64, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    match tz.timestamp_opt(epoch_secs, 0).single() {
        Some(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => epoch_secs.to_string(),
    }
}

pub fn race_line<Tz>(race: &DisplayRace, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let label = if race.started { "Started" } else { "Starts In" };
    format!(
        "Race# {} - {}  [{}]  {}  start {}  {}: {}",
        race.race.race_number,
        race.race.meeting_name,
        race.category.name,
        race.race.race_name,
        format_start_in(race.race.advertised_start, tz),
        label,
        format_countdown(race.countdown),
    )
}

/// Category chips, selected ones marked
pub fn filter_line(filters: &[CategoryFilter]) -> String {
    filters
        .iter()
        .map(|f| {
            let mark = if f.selected { 'x' } else { ' ' };
            format!("[{}] {}", mark, f.info.name)
        })
        .collect::<Vec<_>>()
        .join("  ")
}

pub fn render(state: &AggregateState) -> String {
    render_in(state, &Local)
}

pub fn render_in<Tz>(state: &AggregateState, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut out = String::from("Next to Go!\n");
    if !state.filters.is_empty() {
        out.push_str(&filter_line(&state.filters));
        out.push('\n');
    }
    if state.races.is_empty() {
        out.push_str("No races to show.\n");
    }
    for race in &state.races {
        out.push_str(&race_line(race, tz));
        out.push('\n');
    }
    out
}
