// Shared fixtures for orchestrator tests.

use std::collections::BTreeMap;

use listino::{CurrencyCode, Finish, GameFormat, Price, PriceMap};
use listino_core::{NaiveDate, PriceTemplate};
use rust_decimal::Decimal;

pub const U1: &str = "U1";
pub const U2: &str = "U2";

pub fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, 17).unwrap()
}

/// Build a provider's price map from `(canonical id, finish, retail cents)` triples.
pub fn prices(provider: &str, entries: &[(&str, Finish, i64)]) -> PriceMap {
    let template = PriceTemplate::new(GameFormat::Paper, provider, day(), CurrencyCode::USD);
    let mut out = PriceMap::new();
    for (cid, finish, cents) in entries {
        let mut p = template.instantiate(cid, *finish);
        p.set_retail(Price::new(Decimal::new(*cents, 2)).unwrap());
        out.entry((*cid).to_string())
            .or_insert_with(BTreeMap::new)
            .insert(*finish, p);
    }
    out
}
