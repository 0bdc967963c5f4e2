use nexttogo::engine::events::Event;
use nexttogo::engine::reducer::{reduce, ReducerConfig};
use nexttogo::engine::state::AggregateState;
use nexttogo::feed::FeedPayload;

const SAMPLE: &str = r#"{
  "status": 200,
  "message": "Next 10 races from each category",
  "data": {
    "next_to_go_ids": ["b1", "a1", "c1"],
    "race_summaries": {
      "a1": {
        "race_id": "a1",
        "race_name": "Mohawk Pace Ms",
        "race_number": 5,
        "meeting_id": "m-1",
        "meeting_name": "Mohawk",
        "category_id": "161d9be2-e909-4326-8c2c-35ed71fb460b",
        "advertised_start": { "seconds": 1700000600 },
        "venue_country": "CAN"
      },
      "b1": {
        "race_id": "b1",
        "race_name": "Sprint",
        "race_number": 2,
        "meeting_name": "Sandown",
        "category_id": "9daef0d7-bf3c-4f50-921d-8e818c60fe61",
        "advertised_start": { "seconds": 1700000300 }
      },
      "c1": {
        "race_id": "c1",
        "race_name": "Cup",
        "race_number": 7,
        "meeting_name": "Flemington",
        "category_id": "00000000-0000-0000-0000-000000000000",
        "advertised_start": { "seconds": 1700000900 }
      }
    }
  }
}"#;

#[test]
fn parses_sample_and_ignores_extra_fields() {
    let payload: FeedPayload = serde_json::from_str(SAMPLE).unwrap();
    assert!(payload.is_success());
    assert_eq!(payload.data.next_to_go_ids.len(), 3);
    assert_eq!(payload.data.race_summaries.len(), 3);
    let a1 = &payload.data.race_summaries["a1"];
    assert_eq!(a1.meeting_name, "Mohawk");
    assert_eq!(a1.advertised_start.seconds, 1_700_000_600);
}

#[test]
fn sample_reduces_to_ordered_board() {
    let payload: FeedPayload = serde_json::from_str(SAMPLE).unwrap();
    let out = reduce(
        &AggregateState::new(),
        Event::FetchReceived(payload),
        1_700_000_000,
        &ReducerConfig::default(),
    );
    let ids: Vec<_> = out.state.races.iter().map(|r| r.race.race_id.as_str()).collect();
    assert_eq!(ids, vec!["b1", "a1", "c1"]);

    let names: Vec<_> = out.state.races.iter().map(|r| r.category.name.as_str()).collect();
    assert_eq!(names, vec!["Greyhound", "Harness", "Unknown"]);
}

#[test]
fn error_status_parses_but_is_not_success() {
    let raw = r#"{"status": 503, "message": "maintenance", "data": {}}"#;
    let payload: FeedPayload = serde_json::from_str(raw).unwrap();
    assert!(!payload.is_success());
    assert!(payload.data.race_summaries.is_empty());
}

#[test]
fn missing_advertised_start_is_rejected() {
    let raw = r#"{"status": 200, "message": "", "data": {"race_summaries": {
        "x": {"race_id": "x", "race_name": "n", "race_number": 1,
              "meeting_name": "m", "category_id": "c"}}}}"#;
    assert!(serde_json::from_str::<FeedPayload>(raw).is_err());
}

#[test]
fn tied_starts_follow_payload_order_at_the_cap() {
    let raw = r#"{"status": 200, "message": "", "data": {"race_summaries": {
        "z1": {"race_id": "z1", "race_name": "Late Key", "race_number": 1,
               "meeting_name": "m", "category_id": "c",
               "advertised_start": {"seconds": 1700000600}},
        "a1": {"race_id": "a1", "race_name": "Early Key", "race_number": 2,
               "meeting_name": "m", "category_id": "c",
               "advertised_start": {"seconds": 1700000600}}}}}"#;
    let payload: FeedPayload = serde_json::from_str(raw).unwrap();
    let cfg = ReducerConfig {
        max_displayable_races: 1,
        ..ReducerConfig::default()
    };
    let out = reduce(
        &AggregateState::new(),
        Event::FetchReceived(payload),
        1_700_000_000,
        &cfg,
    );
    let retained: Vec<_> = out.state.retained.iter().map(|r| r.race_id.as_str()).collect();
    assert_eq!(retained, vec!["z1", "a1"]);
    let shown: Vec<_> = out.state.races.iter().map(|r| r.race.race_id.as_str()).collect();
    assert_eq!(shown, vec!["z1"]);
}
