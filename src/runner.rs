//! Event loop around the reducer.
//!
//! The runner owns the board state and is the single point where events are
//! applied, one at a time, against the latest state. Timer ticks, periodic
//! fetches and console commands all funnel through [`Runner::apply`].

use anyhow::Result;
use chrono::Utc;
use std::io::Write;
use serde_json::json;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::{interval, Duration, MissedTickBehavior};

use crate::config::Config;
use crate::display;
use crate::engine::events::{Event, Note};
use crate::engine::reducer::{reduce, ReducerConfig};
use crate::engine::state::{AggregateState, Timestamp};
use crate::feed::retry::{retry_async, RetryConfig};
use crate::feed::RaceFeed;
use crate::logging::{log, log_audit, obj, v_bool, v_str, Domain, Level};

/// Console input understood by the runner
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Toggle by category id or display name
    Toggle(String),
    Clear,
    Refresh,
    Quit,
}

/// Parse one console line; `None` for blank or unrecognised input.
pub fn parse_command(line: &str) -> Option<Command> {
    let line = line.trim();
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };
    match verb.to_ascii_lowercase().as_str() {
        "toggle" | "t" if !rest.is_empty() => Some(Command::Toggle(rest.to_string())),
        "clear" | "c" => Some(Command::Clear),
        "refresh" | "r" => Some(Command::Refresh),
        "quit" | "q" | "exit" => Some(Command::Quit),
        _ => None,
    }
}

pub struct Runner<F> {
    feed: F,
    state: AggregateState,
    cfg: ReducerConfig,
    retry: RetryConfig,
}

impl<F: RaceFeed> Runner<F> {
    pub fn new(feed: F, cfg: ReducerConfig, retry: RetryConfig) -> Self {
        Self {
            feed,
            state: AggregateState::new(),
            cfg,
            retry,
        }
    }

    pub fn state(&self) -> &AggregateState {
        &self.state
    }

    pub fn feed(&self) -> &F {
        &self.feed
    }

    /// Apply one event at `now` and replace the state.
    pub fn apply(&mut self, event: Event, now: Timestamp) -> &AggregateState {
        let name = event.name();
        let out = reduce(&self.state, event, now, &self.cfg);
        for note in &out.notes {
            log_note(note);
        }
        self.state = out.state;
        log_audit(
            name,
            &self.state.digest(),
            self.state.retained.len(),
            self.state.races.len(),
        );
        &self.state
    }

    /// Fetch and merge. Returns whether the fetch succeeded; on failure the
    /// state is left untouched.
    pub async fn refresh(&mut self, now: Timestamp) -> bool {
        let result = retry_async(&self.retry, "fetch_races", || self.feed.fetch()).await;
        match result {
            Ok(payload) if payload.is_success() => {
                log(
                    Level::Info,
                    Domain::Feed,
                    "fetch_ok",
                    obj(&[("summaries", json!(payload.data.race_summaries.len()))]),
                );
                self.apply(Event::FetchReceived(payload), now);
                true
            }
            Ok(payload) => {
                log(
                    Level::Warn,
                    Domain::Feed,
                    "fetch_failed",
                    obj(&[
                        ("status", json!(payload.status)),
                        ("msg", v_str(&payload.message)),
                    ]),
                );
                false
            }
            Err(e) => {
                log(
                    Level::Warn,
                    Domain::Feed,
                    "fetch_failed",
                    obj(&[("msg", v_str(&e.to_string()))]),
                );
                false
            }
        }
    }

    pub fn tick(&mut self, now: Timestamp) -> &AggregateState {
        self.apply(Event::Tick, now)
    }

    pub fn toggle(&mut self, category: &str, now: Timestamp) -> &AggregateState {
        let category_id = self.resolve_filter_id(category);
        self.apply(Event::ToggleFilter { category_id }, now)
    }

    pub fn clear(&mut self, now: Timestamp) -> &AggregateState {
        self.apply(Event::ClearFilters, now)
    }

    /// Map a display name to its filter id; anything else passes through.
    fn resolve_filter_id(&self, category: &str) -> String {
        self.state
            .filters
            .iter()
            .find(|f| f.info.category_id == category || f.info.name.eq_ignore_ascii_case(category))
            .map(|f| f.info.category_id.clone())
            .unwrap_or_else(|| category.to_string())
    }

    /// Execute a console command. Returns false when the loop should stop.
    pub async fn execute(&mut self, command: Command, now: Timestamp) -> bool {
        log(
            Level::Debug,
            Domain::System,
            "command",
            obj(&[("command", v_str(&format!("{:?}", command)))]),
        );
        match command {
            Command::Toggle(category) => {
                self.toggle(&category, now);
            }
            Command::Clear => {
                self.clear(now);
            }
            Command::Refresh => {
                self.refresh(now).await;
            }
            Command::Quit => return false,
        }
        true
    }

    /// Run until `quit`: tick every `tick_ms`, fetch every `fetch_every_secs`,
    /// and read commands from stdin.
    pub async fn run(&mut self, config: &Config) -> Result<()> {
        let mut ticker = interval(Duration::from_millis(config.tick_ms));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut fetcher = interval(Duration::from_secs(config.fetch_every_secs));
        fetcher.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut stdin_open = true;
        let mut loaded = false;

        loop {
            tokio::select! {
                _ = fetcher.tick() => {
                    let ok = self.refresh(epoch_seconds_now()).await;
                    if !ok && !loaded {
                        println!("There was a problem loading data. Retrying in {}s.", config.fetch_every_secs);
                    }
                    loaded |= ok;
                }
                _ = ticker.tick() => {
                    self.tick(epoch_seconds_now());
                }
                line = lines.next_line(), if stdin_open => {
                    match line? {
                        Some(line) => match parse_command(&line) {
                            Some(command) => {
                                if !self.execute(command, epoch_seconds_now()).await {
                                    break;
                                }
                            }
                            None => println!("commands: toggle <category>, clear, refresh, quit"),
                        },
                        None => stdin_open = false,
                    }
                }
            }
            if loaded {
                draw(&self.state);
            }
        }

        log(Level::Info, Domain::System, "shutdown", obj(&[("loaded", v_bool(loaded))]));
        Ok(())
    }
}

/// Wall-clock epoch seconds, rounded to the nearest second
pub fn epoch_seconds_now() -> Timestamp {
    round_millis(Utc::now().timestamp_millis())
}

fn round_millis(millis: i64) -> Timestamp {
    (millis + 500).div_euclid(1000)
}

fn draw(state: &AggregateState) {
    // clear screen, cursor home
    print!("\x1B[2J\x1B[H{}", display::render(state));
    let _ = std::io::stdout().flush();
    log(
        Level::Trace,
        Domain::Display,
        "redraw",
        obj(&[("races", json!(state.races.len()))]),
    );
}

fn log_note(note: &Note) {
    let fields = match serde_json::to_value(note) {
        Ok(serde_json::Value::Object(map)) => map,
        _ => obj(&[]),
    };
    let level = match note {
        Note::UnknownFilterIgnored { .. } => Level::Warn,
        Note::RacesEvicted { .. } | Note::RacesAdded { .. } => Level::Info,
        _ => Level::Debug,
    };
    log(level, Domain::Engine, note.name(), fields);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse_command("toggle Horse"), Some(Command::Toggle("Horse".to_string())));
        assert_eq!(parse_command("  t   Harness  "), Some(Command::Toggle("Harness".to_string())));
        assert_eq!(parse_command("CLEAR"), Some(Command::Clear));
        assert_eq!(parse_command("r"), Some(Command::Refresh));
        assert_eq!(parse_command("quit"), Some(Command::Quit));
    }

    #[test]
    fn test_round_millis() {
        assert_eq!(round_millis(1_700_000_000_499), 1_700_000_000);
        assert_eq!(round_millis(1_700_000_000_500), 1_700_000_001);
        assert_eq!(round_millis(-1_400), -1);
    }

    #[test]
    fn test_epoch_seconds_now_tracks_clock() {
        let now = epoch_seconds_now();
        assert!((now - Utc::now().timestamp()).abs() <= 1);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_command(""), None);
        assert_eq!(parse_command("toggle"), None);
        assert_eq!(parse_command("jump"), None);
    }
}
