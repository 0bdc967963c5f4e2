use crate::engine::reducer::{ReducerConfig, DEFAULT_HIDE_DELAY_SECS, DEFAULT_MAX_DISPLAYABLE_RACES};
use crate::feed::retry::RetryConfig;

pub const DEFAULT_FEED_URL: &str =
    "https://api.neds.com.au/rest/v1/racing/?method=nextraces&count=10";

#[derive(Debug, Clone)]
pub struct Config {
    pub feed_url: String,
    pub hide_delay_secs: i64,
    pub max_displayable_races: usize,
    pub tick_ms: u64,
    pub fetch_every_secs: u64,
    pub http_timeout_secs: u64,
    pub retry_max: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            feed_url: DEFAULT_FEED_URL.to_string(),
            hide_delay_secs: DEFAULT_HIDE_DELAY_SECS,
            max_displayable_races: DEFAULT_MAX_DISPLAYABLE_RACES,
            tick_ms: 1000,
            fetch_every_secs: 30,
            http_timeout_secs: 10,
            retry_max: 2,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; unset or unparsable keys fall back
    /// to defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let d = Self::default();
        Self {
            feed_url: lookup("FEED_URL").unwrap_or(d.feed_url),
            hide_delay_secs: lookup("HIDE_DELAY_SECS").and_then(|v| v.parse().ok()).unwrap_or(d.hide_delay_secs),
            max_displayable_races: lookup("MAX_RACES").and_then(|v| v.parse().ok()).unwrap_or(d.max_displayable_races),
            tick_ms: lookup("TICK_MS").and_then(|v| v.parse().ok()).filter(|v| *v > 0).unwrap_or(d.tick_ms),
            fetch_every_secs: lookup("FETCH_SECS").and_then(|v| v.parse().ok()).filter(|v| *v > 0).unwrap_or(d.fetch_every_secs),
            http_timeout_secs: lookup("FEED_TIMEOUT_SECS").and_then(|v| v.parse().ok()).unwrap_or(d.http_timeout_secs),
            retry_max: lookup("FEED_RETRIES").and_then(|v| v.parse().ok()).unwrap_or(d.retry_max),
        }
    }

    pub fn reducer_config(&self) -> ReducerConfig {
        ReducerConfig {
            hide_delay_secs: self.hide_delay_secs,
            max_displayable_races: self.max_displayable_races,
        }
    }

    pub fn retry_config(&self) -> RetryConfig {
        RetryConfig {
            max_retries: self.retry_max,
            ..RetryConfig::default()
        }
    }
}
