//! Feed summary normalization and ordered merge.
//!
//! Summaries are immutable once seen: a re-fetched id is skipped, never
//! updated. New records are placed by insertion so the retained set stays
//! ascending by start without a full re-sort.

use crate::feed::RawSummary;

use super::state::RaceRecord;

/// Direct field mapping from the feed shape
pub fn to_record(summary: &RawSummary) -> RaceRecord {
    RaceRecord {
        race_id: summary.race_id.clone(),
        race_name: summary.race_name.clone(),
        race_number: summary.race_number,
        advertised_start: summary.advertised_start.seconds,
        category_id: summary.category_id.clone(),
        meeting_name: summary.meeting_name.clone(),
    }
}

/// Insert `record` unless its id is already retained.
///
/// Position: first record whose start is strictly later, else the end, so
/// equal starts keep arrival order. Returns whether the record was added.
pub fn insert_if_missing(record: RaceRecord, retained: &mut Vec<RaceRecord>) -> bool {
    if retained.iter().any(|r| r.race_id == record.race_id) {
        return false;
    }
    let idx = retained
        .iter()
        .position(|r| r.advertised_start > record.advertised_start)
        .unwrap_or(retained.len());
    retained.insert(idx, record);
    true
}

/// Merge a batch of summaries into a copy of `retained`.
pub fn merge<'a, I>(summaries: I, retained: &[RaceRecord]) -> Vec<RaceRecord>
where
    I: IntoIterator<Item = &'a RawSummary>,
{
    let mut out = retained.to_vec();
    for summary in summaries {
        insert_if_missing(to_record(summary), &mut out);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::AdvertisedStart;

    fn summary(id: &str, start: i64) -> RawSummary {
        RawSummary {
            race_id: id.to_string(),
            race_name: "Mohawk Pace Ms".to_string(),
            race_number: 5,
            meeting_name: "Mohawk".to_string(),
            category_id: "cat".to_string(),
            advertised_start: AdvertisedStart { seconds: start },
        }
    }

    #[test]
    fn test_to_record_maps_fields() {
        let s = summary("r1", 1_700_000_000);
        let r = to_record(&s);
        assert_eq!(r.race_id, s.race_id);
        assert_eq!(r.advertised_start, s.advertised_start.seconds);
        assert_eq!(r.meeting_name, "Mohawk");
        assert_eq!(r.race_number, 5);
    }

    #[test]
    fn test_insert_once() {
        let mut retained = Vec::new();
        assert!(insert_if_missing(to_record(&summary("r1", 10)), &mut retained));
        assert!(!insert_if_missing(to_record(&summary("r1", 10)), &mut retained));
        assert_eq!(retained.len(), 1);
    }

    #[test]
    fn test_refetch_does_not_update() {
        let retained = merge([&summary("r1", 10)], &[]);
        let mut moved = summary("r1", 500);
        moved.race_name = "Renamed".to_string();
        let retained = merge([&moved], &retained);
        assert_eq!(retained.len(), 1);
        assert_eq!(retained[0].advertised_start, 10);
        assert_eq!(retained[0].race_name, "Mohawk Pace Ms");
    }

    #[test]
    fn test_merge_keeps_ascending_order() {
        let batch = vec![
            summary("a", 50),
            summary("b", 10),
            summary("c", 30),
            summary("d", 70),
            summary("e", 20),
        ];
        let retained = merge(&batch, &[]);
        let starts: Vec<_> = retained.iter().map(|r| r.advertised_start).collect();
        assert_eq!(starts, vec![10, 20, 30, 50, 70]);
    }

    #[test]
    fn test_equal_start_keeps_arrival_order() {
        let retained = merge([&summary("first", 10), &summary("second", 10)], &[]);
        let ids: Vec<_> = retained.iter().map(|r| r.race_id.as_str()).collect();
        assert_eq!(ids, vec!["first", "second"]);
    }

    #[test]
    fn test_merge_leaves_input_untouched() {
        let base = merge([&summary("a", 10)], &[]);
        let merged = merge([&summary("b", 5)], &base);
        assert_eq!(base.len(), 1);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].race_id, "b");
    }
}
