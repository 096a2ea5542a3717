use async_trait::async_trait;
use chrono::NaiveDate;

use crate::catalog::Catalog;
use crate::{ListinoError, PriceMap, ProviderKey};

/// A vendor price-list adapter.
///
/// One call produces the provider's prices for a single day. Providers hold
/// no state between calls; everything they need is injected at construction
/// or passed in.
#[async_trait]
pub trait PriceProvider: Send + Sync {
    /// A stable identifier used as the provider name on every price (e.g. "cardkingdom").
    fn name(&self) -> &'static str;

    /// Canonical provider key constructed from the static name.
    fn key(&self) -> ProviderKey {
        ProviderKey::new(self.name())
    }

    /// Human-friendly vendor string.
    fn vendor(&self) -> &'static str {
        "unknown"
    }

    /// Fetch the vendor feed and reconcile it against `catalog`, stamping
    /// every price with `date`.
    ///
    /// # Errors
    /// Transport failures (after retries) are returned; per-row problems are not.
    async fn today_prices(
        &self,
        catalog: &Catalog,
        date: NaiveDate,
    ) -> Result<PriceMap, ListinoError>;
}
