use std::collections::HashSet;
#[cfg(feature = "tracing")]
use std::convert::TryFrom;
use std::sync::Arc;
use std::time::Duration;

use chrono::{NaiveDate, Utc};
use listino_core::{ListinoConfig, ListinoError, PriceProvider};

/// Orchestrator that runs every registered price provider for one day.
pub struct Listino {
    pub(crate) providers: Vec<Arc<dyn PriceProvider>>,
    pub(crate) cfg: ListinoConfig,
}

/// Builder for constructing a `Listino` orchestrator with custom configuration.
pub struct ListinoBuilder {
    providers: Vec<Arc<dyn PriceProvider>>,
    cfg: ListinoConfig,
}

impl Default for ListinoBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ListinoBuilder {
    /// Create a new builder with default configuration.
    ///
    /// Starts with no providers; register at least one via [`with_provider`](Self::with_provider).
    /// The default provider timeout is generous (five minutes) because a full
    /// vendor price list is a large download.
    #[must_use]
    pub fn new() -> Self {
        Self {
            providers: vec![],
            cfg: ListinoConfig::default(),
        }
    }

    /// Register a price provider.
    ///
    /// Registration order is the order failures are reported in.
    #[must_use]
    pub fn with_provider(mut self, p: Arc<dyn PriceProvider>) -> Self {
        self.providers.push(p);
        self
    }

    /// Replace the whole configuration.
    #[must_use]
    pub fn config(mut self, cfg: ListinoConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Bound each provider's full run (download plus reconciliation).
    #[must_use]
    pub const fn provider_timeout(mut self, timeout: Duration) -> Self {
        self.cfg.provider_timeout = timeout;
        self
    }

    /// Bound the whole multi-provider run.
    ///
    /// When exceeded, the run returns `RequestTimeout` and no partial report.
    #[must_use]
    pub const fn request_timeout(mut self, timeout: Duration) -> Self {
        self.cfg.request_timeout = Some(timeout);
        self
    }

    /// Stamp prices with a fixed date instead of today's UTC date.
    #[must_use]
    pub const fn date(mut self, date: NaiveDate) -> Self {
        self.cfg.date = Some(date);
        self
    }

    /// Build the `Listino` orchestrator.
    ///
    /// # Errors
    /// Returns `InvalidArg` if no providers are registered or two providers
    /// share a name.
    pub fn build(self) -> Result<Listino, ListinoError> {
        if self.providers.is_empty() {
            return Err(ListinoError::InvalidArg(
                "no providers registered; add at least one via with_provider(...)".to_string(),
            ));
        }

        let mut seen: HashSet<&'static str> = HashSet::new();
        for p in &self.providers {
            if !seen.insert(p.name()) {
                return Err(ListinoError::InvalidArg(format!(
                    "duplicate provider name '{}'",
                    p.name()
                )));
            }
        }

        Ok(Listino {
            providers: self.providers,
            cfg: self.cfg,
        })
    }
}

/// Attach the provider name to errors that do not already carry one.
pub(crate) fn tag_err(provider: &str, e: ListinoError) -> ListinoError {
    match e {
        e @ (ListinoError::Provider { .. }
        | ListinoError::ProviderTimeout { .. }
        | ListinoError::RequestTimeout
        | ListinoError::AllProvidersFailed(_)) => e,
        other => ListinoError::Provider {
            provider: provider.to_string(),
            msg: other.to_string(),
        },
    }
}

/// Await `fut`, failing with `RequestTimeout` once `deadline` elapses.
pub(crate) async fn with_request_deadline<T, Fut>(
    deadline: Option<Duration>,
    fut: Fut,
) -> Result<T, ListinoError>
where
    Fut: core::future::Future<Output = T>,
{
    match deadline {
        Some(d) => tokio::time::timeout(d, fut)
            .await
            .map_err(|_| ListinoError::RequestTimeout),
        None => Ok(fut.await),
    }
}

impl Listino {
    /// Start building a new `Listino` instance.
    ///
    /// ```rust,ignore
    /// use std::sync::Arc;
    /// use listino_cardkingdom::CardKingdomProvider;
    ///
    /// let ck = Arc::new(CardKingdomProvider::builder().build()?);
    /// let listino = listino::Listino::builder()
    ///     .with_provider(ck)
    ///     .provider_timeout(std::time::Duration::from_secs(120))
    ///     .build()?;
    /// ```
    #[must_use]
    pub fn builder() -> ListinoBuilder {
        ListinoBuilder::new()
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &ListinoConfig {
        &self.cfg
    }

    /// Names of the registered providers, in registration order.
    #[must_use]
    pub fn provider_names(&self) -> Vec<&'static str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    /// Observation date for the next run: the configured date, else today (UTC).
    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.cfg.date.unwrap_or_else(|| Utc::now().date_naive())
    }

    /// Wrap a provider future with a timeout and standardized timeout error mapping.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "listino::core::provider_call_with_timeout",
            skip(fut),
            fields(
                provider = provider_name,
                timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            ),
        )
    )]
    pub(crate) async fn provider_call_with_timeout<T, Fut>(
        provider_name: &'static str,
        timeout: Duration,
        fut: Fut,
    ) -> Result<T, ListinoError>
    where
        Fut: core::future::Future<Output = Result<T, ListinoError>>,
    {
        (tokio::time::timeout(timeout, fut).await)
            .unwrap_or_else(|_| Err(ListinoError::provider_timeout(provider_name)))
    }
}
