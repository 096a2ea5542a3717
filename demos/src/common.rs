use std::sync::Arc;

use listino_core::{AllPrintingsFile, Catalog, CatalogSource, ListinoError, PriceProvider};

fn use_mock() -> bool {
    std::env::var("LISTINO_DEMOS_USE_MOCK").is_ok()
}

/// Return a price provider for demos.
///
/// # Errors
/// Returns an error if the Card Kingdom provider cannot be built.
pub fn get_provider() -> Result<Arc<dyn PriceProvider>, ListinoError> {
    if use_mock() {
        println!("--- (Using Mock Provider for CI) ---");
        Ok(Arc::new(listino_mock::MockProvider::new()))
    } else {
        Ok(Arc::new(listino_cardkingdom::CardKingdomProvider::builder().build()?))
    }
}

/// Return the catalog for demos.
///
/// Reads `AllPrintings.json` from `LISTINO_ALL_PRINTINGS` (or the working
/// directory) unless running against the mock provider.
///
/// # Errors
/// Returns `CatalogUnavailable` if the file cannot be loaded.
pub fn get_catalog() -> Result<Catalog, ListinoError> {
    if use_mock() {
        return Ok(listino_mock::catalog());
    }
    let path = std::env::var("LISTINO_ALL_PRINTINGS").unwrap_or_else(|_| "AllPrintings.json".into());
    AllPrintingsFile::new(path).load()
}
