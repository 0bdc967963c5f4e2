//! Expiry sweep over the retained set.
//!
//! The rule is applied exactly as the board has always applied it: a race
//! survives only while `advertised_start - now >= hide_delay_secs`. This
//! evicts races that are about to start, not races that started a while
//! ago. Kept as-is pending a product decision; see DESIGN.md.

use super::state::{RaceRecord, Timestamp};

/// True when the race should stay on the board at `now`.
pub fn is_retained(race: &RaceRecord, now: Timestamp, hide_delay_secs: i64) -> bool {
    race.advertised_start.saturating_sub(now) >= hide_delay_secs
}

/// Drop every record failing the hide-delay threshold; order is preserved.
pub fn sweep(retained: &[RaceRecord], now: Timestamp, hide_delay_secs: i64) -> Vec<RaceRecord> {
    retained
        .iter()
        .filter(|r| is_retained(r, now, hide_delay_secs))
        .cloned()
        .collect()
}
