//! Deterministic providers for tests and CI-safe demos.
//!
//! - [`MockProvider`] reconciles a static fixture feed against [`catalog`]
//!   through the real cross-reference and reconciler.
//! - [`DynamicMockProvider`] returns whatever its controller was told to:
//!   a price map, an error, or a future that never resolves.
#![warn(missing_docs)]

use async_trait::async_trait;
use listino_core::{
    Catalog, CurrencyCode, FeedFields, FieldPath, GameFormat, IdentifierPaths, ListinoError,
    NaiveDate, PriceMap, PriceProvider, PriceReconciler, PriceTemplate, build_cross_reference,
    extract_rows,
};

mod dynamic;
mod fixtures;

pub use dynamic::{DynamicMockController, DynamicMockProvider, MockBehavior};

/// Sample catalog whose records carry `identifiers.mockId` and
/// `identifiers.mockFoilId`, matching the [`MockProvider`] feed.
#[must_use]
pub fn catalog() -> Catalog {
    fixtures::catalog::catalog()
}

/// What a [`MockProvider`] does when asked for prices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MockMode {
    /// Reconcile the fixture feed.
    #[default]
    Fixture,
    /// Fail as if the download never succeeded.
    Fail,
    /// Sleep briefly before reconciling; orchestrator timeouts may trip.
    Slow,
}

/// Mock provider for CI-safe demos. Reconciles a static feed through the
/// real cross-reference and reconciliation code.
pub struct MockProvider {
    name: &'static str,
    mode: MockMode,
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockProvider {
    /// Fixture provider named `"mock"`.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            name: "mock",
            mode: MockMode::Fixture,
        }
    }

    /// Same fixtures under a different provider name.
    #[must_use]
    pub const fn named(name: &'static str) -> Self {
        Self {
            name,
            mode: MockMode::Fixture,
        }
    }

    /// Switch between fixture, failing and slow behavior.
    #[must_use]
    pub const fn with_mode(mut self, mode: MockMode) -> Self {
        self.mode = mode;
        self
    }

    /// Field names of the fixture feed.
    #[must_use]
    pub fn fields() -> FeedFields {
        FeedFields::new("id", "is_foil")
            .with_retail("price_retail")
            .with_buy("price_buy")
    }

    /// Catalog paths matching [`catalog`].
    #[must_use]
    pub fn paths() -> IdentifierPaths {
        IdentifierPaths {
            canonical: FieldPath::from_static("uuid"),
            nonfoil: FieldPath::from_static("identifiers.mockId"),
            foil: Some(FieldPath::from_static("identifiers.mockFoilId")),
        }
    }
}

#[async_trait]
impl PriceProvider for MockProvider {
    fn name(&self) -> &'static str {
        self.name
    }

    fn vendor(&self) -> &'static str {
        "Mock"
    }

    async fn today_prices(
        &self,
        catalog: &Catalog,
        date: NaiveDate,
    ) -> Result<PriceMap, ListinoError> {
        match self.mode {
            MockMode::Fixture => {}
            MockMode::Fail => {
                return Err(ListinoError::transport(
                    "mock://pricelist",
                    "forced failure",
                ));
            }
            MockMode::Slow => tokio::time::sleep(std::time::Duration::from_millis(200)).await,
        }

        let rows = extract_rows(fixtures::feed::document());
        let xref = build_cross_reference(catalog, &Self::paths());
        let template = PriceTemplate::new(GameFormat::Paper, self.name, date, CurrencyCode::USD);
        Ok(PriceReconciler::new(Self::fields(), template).reconcile(&rows, &xref))
    }
}
