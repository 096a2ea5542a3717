//! Report envelopes produced by the reconciler and the orchestrator.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ListinoError;
use crate::price::{Finish, PriceObject};

/// Counters describing one reconciliation pass over a vendor feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReconcileSummary {
    /// Rows read from the feed.
    pub rows: usize,
    /// Rows whose identifier resolved through the cross-reference.
    pub matched: usize,
    /// Rows with an identifier unknown to the cross-reference.
    pub unmapped: usize,
    /// Rows without a readable identifier.
    pub missing_id: usize,
    /// Distinct (canonical id, finish) price objects produced.
    pub objects: usize,
}

/// Prices for one day across every provider, plus the providers that failed.
///
/// Shape of `prices`: canonical id → provider name → finish → price object.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DailyPriceReport {
    /// Observation date shared by every price in the report.
    pub date: Option<NaiveDate>,
    /// Aggregated prices.
    pub prices: BTreeMap<String, BTreeMap<String, BTreeMap<Finish, PriceObject>>>,
    /// Per-provider failures that did not abort the run.
    pub failures: Vec<ListinoError>,
}

impl DailyPriceReport {
    /// Number of distinct canonical identifiers priced by at least one provider.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.prices.len()
    }

    /// Look up one provider's price for a card and finish.
    #[must_use]
    pub fn get(&self, canonical_id: &str, provider: &str, finish: Finish) -> Option<&PriceObject> {
        self.prices
            .get(canonical_id)
            .and_then(|by_provider| by_provider.get(provider))
            .and_then(|by_finish| by_finish.get(&finish))
    }
}
