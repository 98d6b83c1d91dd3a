use std::time::Duration;

use bytes::Bytes;
use reqwest::header::ACCEPT;
use reqwest::{Client, Url};

use crate::error::FetchError;

/// Connect timeout ceiling; never longer than the overall request timeout.
const CONNECT_TIMEOUT_SECS: u64 = 10;

pub(crate) const FEED_ACCEPT: &str =
    "application/rss+xml, application/atom+xml, application/xml, text/xml";

/// HTTP client for retrieving raw feed documents.
///
/// One attempt per feed, no retries. Only transport failures and non-2xx
/// statuses are errors; the body is returned as-is for the parser chain.
#[derive(Debug, Clone)]
pub struct FeedClient {
    client: Client,
}

impl FeedClient {
    /// Creates a `FeedClient` with the given total timeout and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(timeout_secs.min(CONNECT_TIMEOUT_SECS)))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }

    /// Fetches the raw bytes of one feed.
    ///
    /// # Errors
    ///
    /// - [`FetchError::InvalidUrl`] if `url` is not an absolute http(s) URL.
    /// - [`FetchError::UnexpectedStatus`] for any non-2xx response.
    /// - [`FetchError::Http`] on network, TLS, or timeout failure.
    pub async fn fetch(&self, url: &str) -> Result<Bytes, FetchError> {
        let parsed = parse_feed_url(url)?;

        let response = self
            .client
            .get(parsed)
            .header(ACCEPT, FEED_ACCEPT)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.bytes().await?;
        tracing::debug!(url, bytes = body.len(), "fetched feed");
        Ok(body)
    }
}

pub(crate) fn parse_feed_url(url: &str) -> Result<Url, FetchError> {
    let parsed = Url::parse(url.trim()).map_err(|e| FetchError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(FetchError::InvalidUrl {
            url: url.to_string(),
            reason: format!("unsupported scheme \"{other}\""),
        }),
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
