//! Re-export of foundational types from `listino-types`.
// Consolidated re-exports so downstream crates can depend on `listino-core` only

pub use listino_types::{
    CurrencyCode, DailyPriceReport, EtchedRule, FeedFields, FieldPath, Finish, GameFormat,
    IdentifierPaths, ListinoConfig, ListinoError, Price, PriceMap, PriceObject, PriceTemplate,
    ProviderKey, ReconcileSummary, RetryConfig,
};

pub use chrono::NaiveDate;
pub use rust_decimal::Decimal;
