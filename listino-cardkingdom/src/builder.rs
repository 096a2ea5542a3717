use std::sync::Arc;

use listino_core::{FeedFields, FeedSource, IdentifierPaths, ListinoError, RetryConfig};
use reqwest::header::HeaderMap;

use crate::{CardKingdomConfig, CardKingdomProvider, HttpFeed};

/// Builder for [`CardKingdomProvider`].
///
/// Without an explicit transport, `build()` creates an [`HttpFeed`] from the
/// configured client, headers and retry policy.
#[derive(Default)]
pub struct CardKingdomBuilder {
    config: CardKingdomConfig,
    retry: RetryConfig,
    headers: HeaderMap,
    client: Option<reqwest::Client>,
    feed: Option<Arc<dyn FeedSource>>,
}

impl CardKingdomProvider {
    /// Start from the public endpoint and the standard MTGJSON identifier paths.
    #[must_use]
    pub fn builder() -> CardKingdomBuilder {
        CardKingdomBuilder::default()
    }
}

impl CardKingdomBuilder {
    /// Replace the whole configuration.
    #[must_use]
    pub fn config(mut self, config: CardKingdomConfig) -> Self {
        self.config = config;
        self
    }

    /// Override the price-list URL.
    #[must_use]
    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.config.api_url = url.into();
        self
    }

    /// Override the row field names.
    #[must_use]
    pub fn fields(mut self, fields: FeedFields) -> Self {
        self.config.fields = fields;
        self
    }

    /// Override the catalog identifier paths.
    #[must_use]
    pub fn paths(mut self, paths: IdentifierPaths) -> Self {
        self.config.paths = paths;
        self
    }

    /// Retry policy for the default HTTP transport.
    #[must_use]
    pub const fn retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Extra headers for the default HTTP transport. Card Kingdom needs none.
    #[must_use]
    pub fn headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    /// Use a preconfigured `reqwest::Client` for the default HTTP transport.
    #[must_use]
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Inject a transport, bypassing HTTP entirely.
    #[must_use]
    pub fn feed(mut self, feed: Arc<dyn FeedSource>) -> Self {
        self.feed = Some(feed);
        self
    }

    /// Validate and build.
    ///
    /// # Errors
    /// Returns `InvalidArg` if the URL is not an absolute http(s) URL, or
    /// `Other` if the default HTTP client cannot be built.
    pub fn build(self) -> Result<CardKingdomProvider, ListinoError> {
        let url = url::Url::parse(&self.config.api_url).map_err(|e| {
            ListinoError::InvalidArg(format!("invalid api_url {:?}: {e}", self.config.api_url))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ListinoError::InvalidArg(format!(
                "api_url must be http(s), got scheme {:?}",
                url.scheme()
            )));
        }

        let feed = match self.feed {
            Some(feed) => feed,
            None => {
                let http = match self.client {
                    Some(client) => HttpFeed::new(client),
                    None => HttpFeed::new_default()?,
                };
                Arc::new(http.with_headers(self.headers).with_retry(self.retry))
            }
        };
        Ok(CardKingdomProvider::new(self.config, feed))
    }
}
