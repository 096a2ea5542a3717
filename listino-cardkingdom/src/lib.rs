//! listino-cardkingdom
//!
//! Price provider for the Card Kingdom public price list. Downloads the full
//! list once per run, maps Card Kingdom product ids to MTGJSON card uuids
//! through the catalog's `identifiers.cardKingdomId` and
//! `identifiers.cardKingdomFoilId` fields, and emits USD paper prices.
#![warn(missing_docs)]

/// HTTP transport with retries.
pub mod adapter;
mod builder;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use listino_core::{
    Catalog, CurrencyCode, FeedFields, FeedSource, FieldPath, GameFormat, IdentifierPaths,
    ListinoError, PriceMap, PriceProvider, PriceReconciler, PriceTemplate, ProviderKey,
    build_cross_reference, extract_rows,
};
use serde::{Deserialize, Serialize};

pub use adapter::HttpFeed;
pub use builder::CardKingdomBuilder;

/// Public price-list endpoint.
pub const DEFAULT_API_URL: &str = "https://api.cardkingdom.com/api/pricelist";

/// Where to download from and how to read the feed and the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardKingdomConfig {
    /// Price-list URL.
    pub api_url: String,
    /// Field names in each price-list row.
    pub fields: FeedFields,
    /// Catalog paths for the cross-reference.
    pub paths: IdentifierPaths,
}

impl Default for CardKingdomConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            fields: FeedFields::new("id", "is_foil")
                .with_retail("price_retail")
                .with_buy("price_buy"),
            paths: IdentifierPaths {
                canonical: FieldPath::from_static("uuid"),
                nonfoil: FieldPath::from_static("identifiers.cardKingdomId"),
                foil: Some(FieldPath::from_static("identifiers.cardKingdomFoilId")),
            },
        }
    }
}

/// Card Kingdom provider.
///
/// Construct with [`CardKingdomProvider::builder`]; the transport is
/// injectable so tests can serve canned feeds.
pub struct CardKingdomProvider {
    config: CardKingdomConfig,
    feed: Arc<dyn FeedSource>,
}

impl CardKingdomProvider {
    /// Static provider key; also the provider name stamped on every price.
    pub const KEY: ProviderKey = ProviderKey::new("cardkingdom");

    /// Build from a validated config and a transport.
    #[must_use]
    pub fn new(config: CardKingdomConfig, feed: Arc<dyn FeedSource>) -> Self {
        Self { config, feed }
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &CardKingdomConfig {
        &self.config
    }

    /// Template every price object starts from: paper, Card Kingdom, USD.
    #[must_use]
    pub fn template(date: NaiveDate) -> PriceTemplate {
        PriceTemplate::new(
            GameFormat::Paper,
            Self::KEY.as_str(),
            date,
            CurrencyCode::USD,
        )
    }
}

#[async_trait]
impl PriceProvider for CardKingdomProvider {
    fn name(&self) -> &'static str {
        Self::KEY.as_str()
    }

    fn vendor(&self) -> &'static str {
        "Card Kingdom"
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "listino_cardkingdom::today_prices",
            skip(self, catalog),
            fields(url = %self.config.api_url, records = catalog.len()),
        )
    )]
    async fn today_prices(
        &self,
        catalog: &Catalog,
        date: NaiveDate,
    ) -> Result<PriceMap, ListinoError> {
        let doc = self.feed.fetch(&self.config.api_url).await?;
        let rows = extract_rows(doc);
        let xref = build_cross_reference(catalog, &self.config.paths);
        let reconciler = PriceReconciler::new(self.config.fields.clone(), Self::template(date));
        Ok(reconciler.reconcile(&rows, &xref))
    }
}
