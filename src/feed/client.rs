use anyhow::{anyhow, bail, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use url::Url;

use super::{FeedPayload, FeedStatusError, RaceFeed};

/// Next-to-go endpoint over HTTP
pub struct HttpFeed {
    client: Client,
    endpoint: Url,
}

impl HttpFeed {
    pub fn new(endpoint: &str, timeout_secs: u64) -> Result<Self> {
        let endpoint = parse_endpoint(endpoint)?;
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;
        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

/// Accept only absolute http(s) URLs
pub fn parse_endpoint(raw: &str) -> Result<Url> {
    let url = Url::parse(raw).map_err(|e| anyhow!("invalid feed url {}: {}", raw, e))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => bail!("unsupported feed url scheme: {}", other),
    }
}

#[async_trait]
impl RaceFeed for HttpFeed {
    async fn fetch(&self) -> Result<FeedPayload> {
        let resp = self.client.get(self.endpoint.clone()).send().await?;
        let http_status = resp.status();
        if !http_status.is_success() {
            return Err(FeedStatusError::Http {
                status: http_status.as_u16(),
            }
            .into());
        }

        let payload: FeedPayload = resp.json().await?;
        if !payload.is_success() {
            return Err(FeedStatusError::Payload {
                status: payload.status,
                message: payload.message,
            }
            .into());
        }
        Ok(payload)
    }
}
