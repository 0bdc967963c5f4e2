use std::fmt;
use std::ops::Index;

use anyhow::Result;
use async_trait::async_trait;
use serde::de::{Deserializer, MapAccess, Visitor};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

pub mod client;
pub mod retry;

/// Top-level feed response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedPayload {
    pub status: i64,
    #[serde(default)]
    pub message: String,
    pub data: FeedData,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeedData {
    #[serde(default)]
    pub next_to_go_ids: Vec<String>,
    /// Keyed by feed-assigned race id, in payload order
    #[serde(default)]
    pub race_summaries: RaceSummaries,
}

/// Race summaries keyed by id, iterated in the order the feed listed them.
/// A repeated key keeps its first position and takes the later value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RaceSummaries {
    entries: Vec<(String, RawSummary)>,
}

impl RaceSummaries {
    pub fn insert(&mut self, race_id: String, summary: RawSummary) {
        match self.entries.iter_mut().find(|(id, _)| *id == race_id) {
            Some((_, existing)) => *existing = summary,
            None => self.entries.push((race_id, summary)),
        }
    }

    pub fn get(&self, race_id: &str) -> Option<&RawSummary> {
        self.entries
            .iter()
            .find(|(id, _)| id == race_id)
            .map(|(_, summary)| summary)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(id, _)| id.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &RawSummary> {
        self.entries.iter().map(|(_, summary)| summary)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Index<&str> for RaceSummaries {
    type Output = RawSummary;

    fn index(&self, race_id: &str) -> &RawSummary {
        match self.get(race_id) {
            Some(summary) => summary,
            None => panic!("no race summary for {race_id}"),
        }
    }
}

impl FromIterator<(String, RawSummary)> for RaceSummaries {
    fn from_iter<I: IntoIterator<Item = (String, RawSummary)>>(iter: I) -> Self {
        let mut summaries = Self::default();
        for (race_id, summary) in iter {
            summaries.insert(race_id, summary);
        }
        summaries
    }
}

impl Serialize for RaceSummaries {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (race_id, summary) in &self.entries {
            map.serialize_entry(race_id, summary)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for RaceSummaries {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SummariesVisitor;

        impl<'de> Visitor<'de> for SummariesVisitor {
            type Value = RaceSummaries;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an object of race summaries keyed by race id")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut summaries = RaceSummaries::default();
                while let Some(race_id) = map.next_key::<String>()? {
                    let summary = map.next_value::<RawSummary>()?;
                    summaries.insert(race_id, summary);
                }
                Ok(summaries)
            }
        }

        deserializer.deserialize_map(SummariesVisitor)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSummary {
    pub race_id: String,
    pub race_name: String,
    pub race_number: u32,
    pub meeting_name: String,
    pub category_id: String,
    pub advertised_start: AdvertisedStart,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvertisedStart {
    pub seconds: i64,
}

impl FeedPayload {
    pub fn is_success(&self) -> bool {
        is_success(self.status)
    }
}

/// 2xx check on the payload status
pub fn is_success(status: i64) -> bool {
    (200..300).contains(&status)
}

/// Non-2xx answer from the feed, either on the HTTP response or in the
/// payload's own `status` field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedStatusError {
    Http { status: u16 },
    Payload { status: i64, message: String },
}

impl FeedStatusError {
    pub fn status(&self) -> i64 {
        match self {
            Self::Http { status } => i64::from(*status),
            Self::Payload { status, .. } => *status,
        }
    }
}

impl fmt::Display for FeedStatusError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Http { status } => write!(f, "feed http {}", status),
            Self::Payload { status, message } => write!(f, "feed error {} - {}", status, message),
        }
    }
}

impl std::error::Error for FeedStatusError {}

/// Source of race payloads
#[async_trait]
pub trait RaceFeed {
    async fn fetch(&self) -> Result<FeedPayload>;
}

/// Fixed payload source for dry runs and tests.
pub struct StaticFeed {
    payload: FeedPayload,
}

impl StaticFeed {
    pub fn new(payload: FeedPayload) -> Self {
        Self { payload }
    }
}

#[async_trait]
impl RaceFeed for StaticFeed {
    async fn fetch(&self) -> Result<FeedPayload> {
        Ok(self.payload.clone())
    }
}
