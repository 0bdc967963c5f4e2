use anyhow::Result;
use serde_json::json;

use nexttogo::config::Config;
use nexttogo::feed::client::HttpFeed;
use nexttogo::logging::{log, obj, v_str, Domain, Level};
use nexttogo::runner::Runner;

#[tokio::main]
async fn main() -> Result<()> {
    let cfg = Config::from_env();
    let feed = HttpFeed::new(&cfg.feed_url, cfg.http_timeout_secs)?;

    log(
        Level::Info,
        Domain::System,
        "startup",
        obj(&[
            ("feed_url", v_str(feed.endpoint().as_str())),
            ("hide_delay_secs", json!(cfg.hide_delay_secs)),
            ("max_displayable_races", json!(cfg.max_displayable_races)),
            ("tick_ms", json!(cfg.tick_ms)),
            ("fetch_every_secs", json!(cfg.fetch_every_secs)),
        ]),
    );

    let mut runner = Runner::new(feed, cfg.reducer_config(), cfg.retry_config());
    runner.run(&cfg).await
}
