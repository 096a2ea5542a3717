use std::time::Duration;

use async_trait::async_trait;
use listino_core::{FeedSource, ListinoError, RetryConfig};
use rand::Rng;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use serde_json::Value;

const USER_AGENT: &str = concat!("listino/", env!("CARGO_PKG_VERSION"));

/// Production transport: a `reqwest` client with exponential-backoff retries.
///
/// `reqwest::Client` is `Clone + Send + Sync` and pools connections, so one
/// instance can serve every fetch of a run.
#[derive(Debug, Clone)]
pub struct HttpFeed {
    client: reqwest::Client,
    headers: HeaderMap,
    retry: RetryConfig,
}

impl HttpFeed {
    /// Build a client with the crate's user agent and default retry policy.
    ///
    /// # Errors
    /// Returns `Other` if the HTTP client cannot be constructed (TLS backend
    /// initialization failure).
    pub fn new_default() -> Result<Self, ListinoError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ListinoError::Other(format!("failed to build http client: {e}")))?;
        Ok(Self::new(client))
    }

    /// Wrap an existing `reqwest::Client`.
    #[must_use]
    pub fn new(client: reqwest::Client) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        Self {
            client,
            headers,
            retry: RetryConfig::default(),
        }
    }

    /// Merge extra request headers (authentication, API keys) into every request.
    #[must_use]
    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers.extend(headers);
        self
    }

    /// Replace the retry policy.
    #[must_use]
    pub const fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Headers sent with every request.
    #[must_use]
    pub const fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Active retry policy.
    #[must_use]
    pub const fn retry(&self) -> &RetryConfig {
        &self.retry
    }

    async fn fetch_once(&self, url: &str, attempt: u32) -> Result<Value, ListinoError> {
        let resp = self
            .client
            .get(url)
            .headers(self.headers.clone())
            .send()
            .await
            .map_err(|e| map_reqwest_err(url, &e))?;

        let status = resp.status();
        if !status.is_success() {
            #[cfg(feature = "tracing")]
            tracing::warn!(url, status = status.as_u16(), attempt, "price feed download rejected");
            return Err(ListinoError::Http {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = resp.bytes().await.map_err(|e| map_reqwest_err(url, &e))?;
        #[cfg(feature = "tracing")]
        tracing::info!(
            url,
            status = status.as_u16(),
            bytes = body.len(),
            attempt,
            "downloaded price feed"
        );
        #[cfg(not(feature = "tracing"))]
        let _ = attempt;

        serde_json::from_slice(&body)
            .map_err(|e| ListinoError::Data(format!("price feed from {url} is not JSON: {e}")))
    }
}

fn map_reqwest_err(url: &str, e: &reqwest::Error) -> ListinoError {
    let msg = if e.is_timeout() {
        format!("timed out: {e}")
    } else if e.is_connect() {
        format!("connect failed: {e}")
    } else {
        e.to_string()
    };
    ListinoError::transport(url, msg)
}

/// Add up to `jitter_percent` percent of random delay to `base_ms`.
pub(crate) fn jitter_wait(base_ms: u64, jitter_percent: u8) -> u64 {
    if jitter_percent == 0 || base_ms == 0 {
        return base_ms;
    }
    let span = (base_ms.saturating_mul(u64::from(jitter_percent.min(100))) / 100).max(1);
    base_ms + rand::rng().random_range(0..span)
}

#[async_trait]
impl FeedSource for HttpFeed {
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "listino_cardkingdom::fetch",
            skip(self),
            fields(retries = self.retry.retries),
        )
    )]
    async fn fetch(&self, url: &str) -> Result<Value, ListinoError> {
        let mut retry = 0u32;
        loop {
            match self.fetch_once(url, retry + 1).await {
                Ok(doc) => return Ok(doc),
                Err(e) if e.is_transient() && retry < self.retry.retries => {
                    let wait =
                        jitter_wait(self.retry.base_delay_ms(retry), self.retry.jitter_percent);
                    #[cfg(feature = "tracing")]
                    tracing::warn!(url, error = %e, retry = retry + 1, wait_ms = wait, "retrying price feed download");
                    tokio::time::sleep(Duration::from_millis(wait)).await;
                    retry += 1;
                }
                Err(e) => {
                    #[cfg(feature = "tracing")]
                    tracing::error!(url, error = %e, attempts = retry + 1, "price feed download failed");
                    return Err(e);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jitter_stays_within_bounds() {
        for _ in 0..200 {
            let w = jitter_wait(1_000, 20);
            assert!((1_000..1_200).contains(&w));
        }
        assert_eq!(jitter_wait(1_000, 0), 1_000);
        assert_eq!(jitter_wait(0, 50), 0);
    }

    #[test]
    fn custom_headers_extend_defaults() {
        let mut extra = HeaderMap::new();
        extra.insert("x-api-key", HeaderValue::from_static("secret"));
        let feed = HttpFeed::new(reqwest::Client::new()).with_headers(extra);
        assert_eq!(feed.headers().len(), 2);
        assert_eq!(feed.headers()[ACCEPT], "application/json");
    }
}
