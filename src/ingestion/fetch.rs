use std::time::Duration;

use reqwest::Client;
use thiserror::Error;
use url::Url;

use super::parse;
use super::types::FeedEntry;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid feed url {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("unexpected http status {0}")]
    Status(reqwest::StatusCode),
    #[error("feed parsing error: {0}")]
    Parse(String),
}

/// Turns a source url into its entries, in document order.
#[allow(async_fn_in_trait)]
pub trait FeedFetcher {
    async fn fetch_entries(&self, url: &str) -> Result<Vec<FeedEntry>, FetchError>;
}

pub const USER_AGENT: &str = concat!("topic-planner/", env!("CARGO_PKG_VERSION"));

pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder().timeout(timeout).user_agent(USER_AGENT).build()?;
        Ok(Self { client })
    }
}

impl FeedFetcher for HttpFetcher {
    async fn fetch_entries(&self, url: &str) -> Result<Vec<FeedEntry>, FetchError> {
        let target = validate_url(url)?;
        let resp = self.client.get(target).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }
        let body = resp.bytes().await?;
        parse::parse_entries(&body)
    }
}

pub fn validate_url(raw: &str) -> Result<Url, FetchError> {
    let url = Url::parse(raw.trim()).map_err(|e| FetchError::InvalidUrl { url: raw.to_string(), reason: e.to_string() })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(FetchError::InvalidUrl { url: raw.to_string(), reason: format!("unsupported scheme {other}") }),
    }
}
