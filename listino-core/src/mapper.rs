//! Third-party identifier → canonical identifier cross-referencing.

use std::collections::{BTreeSet, HashMap};
use std::path::Path;

use crate::catalog::{AllPrintingsFile, Catalog, CatalogSource, resolve_str};
use crate::{FieldPath, IdentifierPaths, ListinoError};

/// Mapping from a vendor identifier to the canonical identifiers it prices.
///
/// Keys are exact string matches. Immutable once built, so a single instance
/// can be shared read-only across concurrent reconciliations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrossReference {
    entries: HashMap<String, BTreeSet<String>>,
}

impl CrossReference {
    /// Empty cross-reference.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `canonical_id` to the set reachable from `third_party_id`.
    pub fn insert(&mut self, third_party_id: impl Into<String>, canonical_id: impl Into<String>) {
        self.entries
            .entry(third_party_id.into())
            .or_default()
            .insert(canonical_id.into());
    }

    /// Canonical identifiers for a vendor identifier.
    #[must_use]
    pub fn get(&self, third_party_id: &str) -> Option<&BTreeSet<String>> {
        self.entries.get(third_party_id)
    }

    /// True if the vendor identifier is mapped.
    #[must_use]
    pub fn contains(&self, third_party_id: &str) -> bool {
        self.entries.contains_key(third_party_id)
    }

    /// Number of distinct vendor identifiers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is mapped.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(vendor id, canonical ids)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeSet<String>)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Layer `later` on top of `self`.
    ///
    /// Every key present in `later` replaces the whole entry in `self`; keys
    /// only in `self` are kept.
    pub fn merge_overwrite(&mut self, later: Self) {
        self.entries.extend(later.entries);
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for CrossReference {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut out = Self::new();
        for (k, v) in iter {
            out.insert(k, v);
        }
        out
    }
}

/// Scan `catalog` once, mapping each record's `third_party` value to its
/// `canonical` value.
///
/// Records where either path does not resolve to a non-empty string are
/// skipped. Records sharing a vendor identifier all land in that key's set.
#[must_use]
pub fn build_mapping(
    catalog: &Catalog,
    third_party: &FieldPath,
    canonical: &FieldPath,
) -> CrossReference {
    let mut out = CrossReference::new();
    for record in catalog.records() {
        let (Some(key), Some(value)) = (
            resolve_str(record, third_party),
            resolve_str(record, canonical),
        ) else {
            continue;
        };
        out.insert(key, value);
    }
    out
}

/// Load an `AllPrintings` file and run [`build_mapping`] over it.
///
/// # Errors
/// Returns `CatalogUnavailable` if the file cannot be read or parsed.
pub fn build_mapping_from_path(
    path: impl AsRef<Path>,
    third_party: &FieldPath,
    canonical: &FieldPath,
) -> Result<CrossReference, ListinoError> {
    let catalog = AllPrintingsFile::new(path).load()?;
    Ok(build_mapping(&catalog, third_party, canonical))
}

/// Build a provider's cross-reference: the non-foil scan first, then the foil
/// scan layered on top with [`CrossReference::merge_overwrite`].
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(
        name = "listino_core::mapper::build_cross_reference",
        skip(catalog, paths),
        fields(records = catalog.len(), canonical = %paths.canonical),
    )
)]
#[must_use]
pub fn build_cross_reference(catalog: &Catalog, paths: &IdentifierPaths) -> CrossReference {
    let mut out = CrossReference::new();
    for third_party in paths.scan_order() {
        let layer = build_mapping(catalog, third_party, &paths.canonical);
        #[cfg(feature = "tracing")]
        tracing::debug!(path = %third_party, keys = layer.len(), "built cross-reference layer");
        out.merge_overwrite(layer);
    }
    out
}
