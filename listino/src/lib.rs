//! Listino aggregates daily trading-card prices across vendor price lists.
//!
//! Overview
//! - Runs every registered provider that implements `listino_core::PriceProvider`.
//! - Each provider downloads its feed, cross-references vendor ids against
//!   the canonical catalog, and reconciles rows into per-card, per-finish prices.
//! - Results are merged into one `DailyPriceReport` keyed by canonical card id,
//!   then provider, then finish.
//!
//! Key behaviors
//! - Providers run concurrently; each is bounded by the provider timeout and
//!   an optional deadline bounds the whole run.
//! - One provider failing never hides another provider's prices. Failures are
//!   listed in the report, and only a run where every provider fails is an error.
//! - A catalog that cannot be loaded aborts the run before any download.
//!
//! Examples
//! ```rust,ignore
//! use std::sync::Arc;
//! use listino::Listino;
//! use listino_cardkingdom::CardKingdomProvider;
//! use listino_core::AllPrintingsFile;
//!
//! let listino = Listino::builder()
//!     .with_provider(Arc::new(CardKingdomProvider::builder().build()?))
//!     .build()?;
//! let report = listino
//!     .today_prices_from(&AllPrintingsFile::new("AllPrintings.json"))
//!     .await?;
//! println!("priced {} cards", report.card_count());
//! ```
//!
//! See `demos/examples/` for runnable end-to-end demonstrations.
#![warn(missing_docs)]

pub(crate) mod core;
mod daily;
mod util;

pub use core::{Listino, ListinoBuilder};
pub use util::{collapse_errors, join_with_deadline};

// Re-export core types for convenience
pub use listino_core::{
    AllPrintingsFile, Catalog, CatalogSource, CurrencyCode, DailyPriceReport, Finish, GameFormat,
    ListinoConfig, ListinoError, Price, PriceMap, PriceObject, PriceProvider, RetryConfig,
};
