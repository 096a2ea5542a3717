//! Transport boundary: where raw price feeds come from.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::ListinoError;
use crate::row::RawPriceRow;

/// Retrieves a vendor price feed as a parsed JSON document.
///
/// Implementations own retries and must log the outcome of each download.
#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Fetch and decode the document at `url`.
    async fn fetch(&self, url: &str) -> Result<Value, ListinoError>;
}

impl dyn FeedSource {
    /// Build a `FeedSource` from a closure receiving the requested URL.
    pub fn from_fn<F>(f: F) -> Arc<dyn FeedSource>
    where
        F: Send + Sync + 'static + Fn(&str) -> Result<Value, ListinoError>,
    {
        struct FnFeed<F>(F);
        #[async_trait]
        impl<F> FeedSource for FnFeed<F>
        where
            F: Send + Sync + 'static + Fn(&str) -> Result<Value, ListinoError>,
        {
            async fn fetch(&self, url: &str) -> Result<Value, ListinoError> {
                (self.0)(url)
            }
        }
        Arc::new(FnFeed(f))
    }
}

/// Pull the rows out of a feed document's top-level `data` array.
///
/// A missing or non-array `data` yields no rows; entries that are not JSON
/// objects are skipped.
#[must_use]
pub fn extract_rows(mut doc: Value) -> Vec<RawPriceRow> {
    match doc.get_mut("data").map(Value::take) {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(RawPriceRow::from_value)
            .collect(),
        _ => Vec::new(),
    }
}
