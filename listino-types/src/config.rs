//! Configuration types shared across the orchestrator and providers.

use core::fmt;
use std::time::Duration;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ListinoError;

/// Dotted path locating a value inside a nested JSON record.
///
/// `"identifiers.cardKingdomId"` walks into the `identifiers` object and reads
/// its `cardKingdomId` member. Segments are matched exactly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FieldPath(Vec<String>);

impl FieldPath {
    /// Build a path from explicit segments.
    ///
    /// # Errors
    /// Returns `InvalidArg` if there are no segments or any segment is empty.
    pub fn new<I, S>(segments: I) -> Result<Self, ListinoError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: Vec<String> = segments.into_iter().map(Into::into).collect();
        if segments.is_empty() {
            return Err(ListinoError::InvalidArg("field path has no segments".into()));
        }
        if segments.iter().any(String::is_empty) {
            return Err(ListinoError::InvalidArg(format!(
                "field path has an empty segment: {:?}",
                segments.join(".")
            )));
        }
        Ok(Self(segments))
    }

    /// Parse a dotted path such as `"identifiers.cardKingdomFoilId"`.
    ///
    /// # Errors
    /// Returns `InvalidArg` for an empty string or an empty segment (`"a..b"`).
    pub fn parse(dotted: &str) -> Result<Self, ListinoError> {
        Self::new(dotted.split('.'))
    }

    /// Build a path from a dotted literal known at compile time.
    ///
    /// Empty segments are skipped rather than rejected, so this never fails.
    #[must_use]
    pub fn from_static(dotted: &'static str) -> Self {
        Self(
            dotted
                .split('.')
                .filter(|s| !s.is_empty())
                .map(str::to_owned)
                .collect(),
        )
    }

    /// The individual path segments, outermost first.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.0
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("."))
    }
}

impl TryFrom<String> for FieldPath {
    type Error = ListinoError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<FieldPath> for String {
    fn from(p: FieldPath) -> Self {
        p.to_string()
    }
}

/// Catalog paths used to build a provider's identifier cross-reference.
///
/// The non-foil path is scanned first and the foil path second; on a key
/// collision the foil scan replaces the non-foil entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentifierPaths {
    /// Path to the canonical identifier of each catalog record (e.g. `uuid`).
    pub canonical: FieldPath,
    /// Path to the vendor identifier of the non-foil printing.
    pub nonfoil: FieldPath,
    /// Path to the vendor identifier of the foil printing, if the vendor has one.
    pub foil: Option<FieldPath>,
}

impl IdentifierPaths {
    /// Vendor identifier paths in scan order (non-foil first, then foil).
    pub fn scan_order(&self) -> impl Iterator<Item = &FieldPath> {
        std::iter::once(&self.nonfoil).chain(self.foil.as_ref())
    }
}

/// Rule marking a row as an etched printing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EtchedRule {
    /// Row field carrying the printing treatment.
    pub field: String,
    /// Value of `field` (compared case-insensitively) that means "etched".
    pub value: String,
}

/// Vendor-specific field names describing the shape of one price row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedFields {
    /// Field holding the vendor's product identifier.
    pub id: String,
    /// Field holding the foil indicator.
    pub foil: String,
    /// Field holding the retail (sell) price.
    pub retail: Option<String>,
    /// Field holding the buylist price.
    pub buy: Option<String>,
    /// When set, the retail price only counts if this quantity is positive.
    pub retail_quantity: Option<String>,
    /// When set, the buy price only counts if this quantity is positive.
    pub buy_quantity: Option<String>,
    /// Optional etched-finish rule; takes precedence over the foil indicator.
    pub etched: Option<EtchedRule>,
}

impl FeedFields {
    /// Create a field table with only the identifier and foil indicator set.
    pub fn new(id: impl Into<String>, foil: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            foil: foil.into(),
            retail: None,
            buy: None,
            retail_quantity: None,
            buy_quantity: None,
            etched: None,
        }
    }

    /// Set the retail price field.
    #[must_use]
    pub fn with_retail(mut self, field: impl Into<String>) -> Self {
        self.retail = Some(field.into());
        self
    }

    /// Set the buylist price field.
    #[must_use]
    pub fn with_buy(mut self, field: impl Into<String>) -> Self {
        self.buy = Some(field.into());
        self
    }

    /// Gate the retail price on a positive quantity field.
    #[must_use]
    pub fn with_retail_quantity(mut self, field: impl Into<String>) -> Self {
        self.retail_quantity = Some(field.into());
        self
    }

    /// Gate the buy price on a positive quantity field.
    #[must_use]
    pub fn with_buy_quantity(mut self, field: impl Into<String>) -> Self {
        self.buy_quantity = Some(field.into());
        self
    }

    /// Classify rows whose `field` equals `value` as etched.
    #[must_use]
    pub fn with_etched(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.etched = Some(EtchedRule {
            field: field.into(),
            value: value.into(),
        });
        self
    }
}

/// Exponential backoff configuration for retrying transient feed failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Retries after the first attempt; `0` disables retrying.
    pub retries: u32,
    /// Delay before the first retry, in milliseconds.
    pub min_backoff_ms: u64,
    /// Upper bound for any single delay, in milliseconds.
    pub max_backoff_ms: u64,
    /// Exponential factor applied after each failed attempt (>= 1).
    pub factor: u32,
    /// Random jitter percentage [0, 100] added to each delay.
    pub jitter_percent: u8,
}

impl RetryConfig {
    /// Base delay (before jitter) to wait after the `retry`-th failure, zero-based.
    #[must_use]
    pub fn base_delay_ms(&self, retry: u32) -> u64 {
        let factor = u64::from(self.factor.max(1));
        let mut delay = self.min_backoff_ms;
        for _ in 0..retry {
            delay = delay.saturating_mul(factor);
            if delay >= self.max_backoff_ms {
                break;
            }
        }
        delay.min(self.max_backoff_ms)
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            retries: 3,
            min_backoff_ms: 300,
            max_backoff_ms: 10_000,
            factor: 2,
            jitter_percent: 20,
        }
    }
}

/// Global configuration for the `Listino` orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListinoConfig {
    /// Timeout applied to each provider's full daily run.
    pub provider_timeout: Duration,
    /// Optional deadline for the whole multi-provider run.
    pub request_timeout: Option<Duration>,
    /// Observation date stamped on every price; `None` means today (UTC).
    pub date: Option<NaiveDate>,
}

impl Default for ListinoConfig {
    fn default() -> Self {
        Self {
            provider_timeout: Duration::from_secs(300),
            request_timeout: None,
            date: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_delay_grows_and_caps() {
        let cfg = RetryConfig {
            retries: 5,
            min_backoff_ms: 100,
            max_backoff_ms: 500,
            factor: 2,
            jitter_percent: 0,
        };
        assert_eq!(cfg.base_delay_ms(0), 100);
        assert_eq!(cfg.base_delay_ms(1), 200);
        assert_eq!(cfg.base_delay_ms(2), 400);
        assert_eq!(cfg.base_delay_ms(3), 500);
        assert_eq!(cfg.base_delay_ms(30), 500);
    }

    #[test]
    fn scan_order_puts_foil_last() {
        let paths = IdentifierPaths {
            canonical: FieldPath::parse("uuid").unwrap(),
            nonfoil: FieldPath::parse("identifiers.a").unwrap(),
            foil: Some(FieldPath::parse("identifiers.b").unwrap()),
        };
        let order: Vec<String> = paths.scan_order().map(ToString::to_string).collect();
        assert_eq!(order, vec!["identifiers.a", "identifiers.b"]);
    }
}
