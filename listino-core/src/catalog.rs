//! Canonical catalog access.
//!
//! A [`Catalog`] is an in-memory list of card records (JSON objects). The
//! on-disk layout is owned by a [`CatalogSource`]; [`AllPrintingsFile`] reads
//! the MTGJSON `AllPrintings` layout, where every set carries `cards` and
//! `tokens` arrays.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::{FieldPath, ListinoError};

/// In-memory canonical catalog records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    records: Vec<Value>,
}

impl Catalog {
    /// Build a catalog from already-parsed records.
    #[must_use]
    pub const fn from_records(records: Vec<Value>) -> Self {
        Self { records }
    }

    /// Flatten an `AllPrintings` document into card and token records.
    ///
    /// # Errors
    /// Returns `Data` if the document has no top-level `data` object.
    pub fn from_all_printings(mut doc: Value) -> Result<Self, ListinoError> {
        let Some(Value::Object(sets)) = doc.get_mut("data").map(Value::take) else {
            return Err(ListinoError::Data(
                "catalog document has no `data` object".into(),
            ));
        };
        let mut records = Vec::new();
        for (_code, mut set) in sets {
            for section in ["cards", "tokens"] {
                if let Some(Value::Array(items)) = set.get_mut(section).map(Value::take) {
                    records.extend(items);
                }
            }
        }
        Ok(Self { records })
    }

    /// All records.
    #[must_use]
    pub fn records(&self) -> &[Value] {
        &self.records
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when the catalog has no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Walk `path` into `record`, returning the value it points at.
#[must_use]
pub fn resolve<'a>(record: &'a Value, path: &FieldPath) -> Option<&'a Value> {
    path.segments()
        .iter()
        .try_fold(record, |node, segment| node.get(segment.as_str()))
}

/// Like [`resolve`], but only yields non-empty strings.
#[must_use]
pub fn resolve_str<'a>(record: &'a Value, path: &FieldPath) -> Option<&'a str> {
    match resolve(record, path)? {
        Value::String(s) if !s.is_empty() => Some(s.as_str()),
        _ => None,
    }
}

/// Loads the canonical catalog.
///
/// Failure to load is fatal for a run: nothing can be reconciled without a
/// cross-reference.
pub trait CatalogSource: Send + Sync {
    /// Human-readable location, used in errors and logs.
    fn location(&self) -> String;

    /// Load and parse every record.
    ///
    /// # Errors
    /// Returns `CatalogUnavailable` if the catalog cannot be read or parsed.
    fn load(&self) -> Result<Catalog, ListinoError>;
}

/// MTGJSON `AllPrintings.json` on the local filesystem.
#[derive(Debug, Clone)]
pub struct AllPrintingsFile {
    path: PathBuf,
}

impl AllPrintingsFile {
    /// Point at an `AllPrintings.json` file.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Path of the file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CatalogSource for AllPrintingsFile {
    fn location(&self) -> String {
        self.path.display().to_string()
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "listino_core::catalog::load",
            skip(self),
            fields(path = %self.path.display()),
        )
    )]
    fn load(&self) -> Result<Catalog, ListinoError> {
        let unavailable = |reason: String| ListinoError::catalog_unavailable(self.location(), reason);
        let file = File::open(&self.path).map_err(|e| unavailable(e.to_string()))?;
        let doc: Value = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| unavailable(e.to_string()))?;
        let catalog = Catalog::from_all_printings(doc).map_err(|e| unavailable(e.to_string()))?;
        #[cfg(feature = "tracing")]
        tracing::info!(records = catalog.len(), "loaded canonical catalog");
        Ok(catalog)
    }
}

impl CatalogSource for Catalog {
    fn location(&self) -> String {
        "<in-memory>".to_string()
    }

    fn load(&self) -> Result<Catalog, ListinoError> {
        Ok(self.clone())
    }
}
