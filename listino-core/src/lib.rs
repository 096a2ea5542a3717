//! listino-core
//!
//! Core types, traits, and reconciliation logic shared across the listino ecosystem.
//!
//! - `types`: price objects, configuration, and errors (re-exported from `listino-types`).
//! - `catalog`: canonical catalog records and how to load them.
//! - `mapper`: vendor identifier → canonical identifier cross-references.
//! - `normalize` / `reconcile`: turning raw vendor rows into per-card price objects.
//! - `feed` / `provider`: the transport and provider seams.
//!
//! Everything except the `feed` and `provider` traits is synchronous and free
//! of I/O beyond catalog loading.
#![warn(missing_docs)]

/// Canonical catalog records, field-path resolution, and catalog sources.
pub mod catalog;
pub mod feed;
/// Cross-reference construction from catalog identifier paths.
pub mod mapper;
/// Single-row price normalization.
pub mod normalize;
/// The `PriceProvider` trait implemented by vendor adapters.
pub mod provider;
/// Row-by-row reconciliation into price objects.
pub mod reconcile;
/// Loosely typed vendor rows.
pub mod row;
pub mod types;

pub use catalog::{AllPrintingsFile, Catalog, CatalogSource};
pub use feed::{FeedSource, extract_rows};
pub use mapper::{CrossReference, build_cross_reference, build_mapping, build_mapping_from_path};
pub use normalize::{NormalizedRow, normalize_row};
pub use provider::PriceProvider;
pub use reconcile::PriceReconciler;
pub use row::RawPriceRow;
pub use types::*;
