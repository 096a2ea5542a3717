//! Listino-specific data transfer objects and configuration primitives.
#![warn(missing_docs)]

mod config;
mod error;
mod price;
mod provider;
mod reports;

pub use config::{EtchedRule, FeedFields, FieldPath, IdentifierPaths, ListinoConfig, RetryConfig};
pub use error::ListinoError;
pub use price::{
    CurrencyCode, Finish, GameFormat, Price, PriceMap, PriceObject, PriceTemplate,
};
pub use provider::ProviderKey;
pub use reports::{DailyPriceReport, ReconcileSummary};
