//! Race board state with a deterministic digest for audit logging.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Epoch seconds
pub type Timestamp = i64;

/// One tracked race as retained by the engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaceRecord {
    pub race_id: String,
    pub race_name: String,
    pub race_number: u32,
    /// Advertised start, epoch seconds
    pub advertised_start: Timestamp,
    pub category_id: String,
    pub meeting_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryInfo {
    pub category_id: String,
    pub name: String,
}

impl CategoryInfo {
    pub fn new(category_id: &str, name: &str) -> Self {
        Self {
            category_id: category_id.to_string(),
            name: name.to_string(),
        }
    }
}

/// Category metadata plus the user-controlled selection flag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryFilter {
    pub info: CategoryInfo,
    pub selected: bool,
}

impl CategoryFilter {
    pub fn unselected(info: CategoryInfo) -> Self {
        Self {
            info,
            selected: false,
        }
    }
}

/// Display-ready projection of a retained race
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayRace {
    pub race: RaceRecord,
    pub category: CategoryInfo,
    /// Seconds until start; negative once started
    pub countdown: i64,
    pub started: bool,
}

/// Complete board state. Each transition replaces it wholesale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AggregateState {
    /// Deduplicated, ascending by `advertised_start`
    pub retained: Vec<RaceRecord>,
    /// Accumulated lazily as categories are encountered
    pub filters: Vec<CategoryFilter>,
    /// Current projection
    pub races: Vec<DisplayRace>,
}

impl AggregateState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected_count(&self) -> usize {
        self.filters.iter().filter(|f| f.selected).count()
    }

    /// SHA-256 over retained races and filters, hex encoded.
    ///
    /// The projection is excluded: it is derived from these two plus `now`.
    pub fn digest(&self) -> String {
        let mut hasher = Sha256::new();
        for race in &self.retained {
            hasher.update(race.race_id.as_bytes());
            hasher.update(race.advertised_start.to_le_bytes());
            hasher.update(race.category_id.as_bytes());
            hasher.update([0u8]);
        }
        for filter in &self.filters {
            hasher.update(filter.info.category_id.as_bytes());
            hasher.update([u8::from(filter.selected)]);
        }
        hex::encode(hasher.finalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn race(id: &str, start: Timestamp) -> RaceRecord {
        RaceRecord {
            race_id: id.to_string(),
            race_name: "Mohawk Pace Ms".to_string(),
            race_number: 5,
            advertised_start: start,
            category_id: "cat".to_string(),
            meeting_name: "Mohawk".to_string(),
        }
    }

    #[test]
    fn test_digest_deterministic() {
        let mut a = AggregateState::new();
        a.retained.push(race("r1", 100));
        let b = a.clone();
        assert_eq!(a.digest(), b.digest());
        assert_eq!(a.digest().len(), 64);
    }

    #[test]
    fn test_digest_tracks_selection() {
        let mut a = AggregateState::new();
        a.filters
            .push(CategoryFilter::unselected(CategoryInfo::new("c1", "Horse")));
        let before = a.digest();
        a.filters[0].selected = true;
        assert_ne!(before, a.digest());
        assert_eq!(a.selected_count(), 1);
    }

    #[test]
    fn test_digest_ignores_projection() {
        let mut a = AggregateState::new();
        a.retained.push(race("r1", 100));
        let before = a.digest();
        a.races.push(DisplayRace {
            race: race("r1", 100),
            category: CategoryInfo::new("cat", "Unknown"),
            countdown: 10,
            started: false,
        });
        assert_eq!(before, a.digest());
    }
}
