use listino_core::{Catalog, CatalogSource, DailyPriceReport, ListinoError};

use crate::core::tag_err;
use crate::util::{collapse_errors, join_with_deadline};
use crate::Listino;

impl Listino {
    /// Fetch and reconcile every provider's prices for the day.
    ///
    /// Behavior:
    /// - Providers run concurrently, each bounded by the provider timeout.
    /// - A failing provider is recorded in `failures` and never affects its siblings.
    /// - If every provider fails, returns `AllProvidersFailed` with each failure.
    /// - If the request deadline elapses, returns `RequestTimeout`.
    ///
    /// # Errors
    /// See above; per-row problems never surface as errors.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "listino::daily::today_prices",
            skip(self, catalog),
            fields(providers = self.providers.len(), records = catalog.len()),
        )
    )]
    pub async fn today_prices(&self, catalog: &Catalog) -> Result<DailyPriceReport, ListinoError> {
        let date = self.date();
        let timeout = self.cfg.provider_timeout;

        let tasks = self.providers.iter().map(|p| async move {
            let name = p.name();
            let res =
                Self::provider_call_with_timeout(name, timeout, p.today_prices(catalog, date)).await;
            (name, res)
        });
        let results = join_with_deadline(tasks, self.cfg.request_timeout).await?;

        let mut report = DailyPriceReport {
            date: Some(date),
            ..DailyPriceReport::default()
        };
        for (name, res) in results {
            match res {
                Ok(prices) => {
                    #[cfg(feature = "tracing")]
                    tracing::info!(provider = name, cards = prices.len(), "provider prices ready");
                    for (canonical_id, by_finish) in prices {
                        report
                            .prices
                            .entry(canonical_id)
                            .or_default()
                            .insert(name.to_string(), by_finish);
                    }
                }
                Err(e) => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(provider = name, error = %e, "provider failed");
                    report.failures.push(tag_err(name, e));
                }
            }
        }

        if report.failures.len() == self.providers.len() {
            return Err(collapse_errors(report.failures));
        }
        Ok(report)
    }

    /// Load the catalog from `source`, then run [`today_prices`](Self::today_prices).
    ///
    /// Loading is synchronous and happens before any provider starts.
    ///
    /// # Errors
    /// Returns `CatalogUnavailable` without contacting any provider if the
    /// catalog cannot be loaded; otherwise as `today_prices`.
    pub async fn today_prices_from(
        &self,
        source: &dyn CatalogSource,
    ) -> Result<DailyPriceReport, ListinoError> {
        let catalog = source.load()?;
        self.today_prices(&catalog).await
    }
}
