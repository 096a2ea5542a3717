//! Normalized price observations.

use core::fmt;
use core::hash::{Hash, Hasher};
use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ListinoError;

/// Print variant of a card, priced independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Finish {
    /// Regular, non-foil printing.
    #[serde(rename = "nonfoil")]
    NonFoil,
    /// Foil printing.
    Foil,
    /// Etched-foil printing; only produced when a provider configures an etched rule.
    Etched,
}

impl Finish {
    /// Stable lowercase label (`"nonfoil"`, `"foil"`, `"etched"`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NonFoil => "nonfoil",
            Self::Foil => "foil",
            Self::Etched => "etched",
        }
    }
}

impl fmt::Display for Finish {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Game format a price applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameFormat {
    /// Physical cards.
    #[default]
    Paper,
}

impl GameFormat {
    /// Stable lowercase label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Paper => "paper",
        }
    }
}

/// Three-letter uppercase ISO 4217 currency code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CurrencyCode([u8; 3]);

impl CurrencyCode {
    /// United States dollar.
    pub const USD: Self = Self(*b"USD");

    /// Validate and build a code from a string such as `"USD"`.
    ///
    /// # Errors
    /// Returns `InvalidArg` unless the input is exactly three ASCII uppercase letters.
    pub fn try_new(code: &str) -> Result<Self, ListinoError> {
        match code.as_bytes() {
            &[a, b, c] if [a, b, c].iter().all(u8::is_ascii_uppercase) => Ok(Self([a, b, c])),
            _ => Err(ListinoError::InvalidArg(format!(
                "invalid currency code: {code:?}"
            ))),
        }
    }

    /// The code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        // Construction only admits ASCII uppercase bytes.
        core::str::from_utf8(&self.0).unwrap_or("???")
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for CurrencyCode {
    type Error = ListinoError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_new(&value)
    }
}

impl From<CurrencyCode> for String {
    fn from(c: CurrencyCode) -> Self {
        c.as_str().to_string()
    }
}

/// A non-negative decimal price amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// Wrap an amount, rejecting negatives.
    #[must_use]
    pub fn new(amount: Decimal) -> Option<Self> {
        if amount.is_sign_negative() && !amount.is_zero() {
            None
        } else {
            Some(Self(amount))
        }
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Attributes shared by every price a provider emits in one run.
///
/// Each [`PriceObject`] starts life as a copy of this template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceTemplate {
    /// Game format tag.
    pub game_format: GameFormat,
    /// Provider name (e.g. `"cardkingdom"`).
    pub provider: String,
    /// Observation date.
    pub date: NaiveDate,
    /// Currency of every price.
    pub currency: CurrencyCode,
}

impl PriceTemplate {
    /// Create a template.
    pub fn new(
        game_format: GameFormat,
        provider: impl Into<String>,
        date: NaiveDate,
        currency: CurrencyCode,
    ) -> Self {
        Self {
            game_format,
            provider: provider.into(),
            date,
            currency,
        }
    }

    /// Instantiate an empty price object for one (canonical id, finish) pair.
    #[must_use]
    pub fn instantiate(&self, canonical_id: &str, finish: Finish) -> PriceObject {
        PriceObject {
            canonical_id: canonical_id.to_string(),
            finish,
            game_format: self.game_format,
            provider: self.provider.clone(),
            date: self.date,
            currency: self.currency,
            retail: None,
            buy: None,
        }
    }
}

/// One dated, currency-denominated buy/sell quote for a (card, finish) pair.
///
/// Identity is the (canonical id, finish) pair: two objects for the same pair
/// compare equal regardless of their prices.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceObject {
    canonical_id: String,
    finish: Finish,
    game_format: GameFormat,
    provider: String,
    date: NaiveDate,
    currency: CurrencyCode,
    retail: Option<Price>,
    buy: Option<Price>,
}

impl PriceObject {
    /// Canonical catalog identifier of the card.
    #[must_use]
    pub fn canonical_id(&self) -> &str {
        &self.canonical_id
    }

    /// Finish this price applies to.
    #[must_use]
    pub const fn finish(&self) -> Finish {
        self.finish
    }

    /// Game format tag.
    #[must_use]
    pub const fn game_format(&self) -> GameFormat {
        self.game_format
    }

    /// Provider that quoted this price.
    #[must_use]
    pub fn provider(&self) -> &str {
        &self.provider
    }

    /// Observation date.
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    /// Currency of both prices.
    #[must_use]
    pub const fn currency(&self) -> CurrencyCode {
        self.currency
    }

    /// Retail (sell) price, if the vendor quoted one.
    #[must_use]
    pub const fn retail(&self) -> Option<Price> {
        self.retail
    }

    /// Buylist price, if the vendor quoted one.
    #[must_use]
    pub const fn buy(&self) -> Option<Price> {
        self.buy
    }

    /// Overwrite the retail price.
    pub fn set_retail(&mut self, price: Price) {
        self.retail = Some(price);
    }

    /// Overwrite the buylist price.
    pub fn set_buy(&mut self, price: Price) {
        self.buy = Some(price);
    }

    /// True when neither price is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.retail.is_none() && self.buy.is_none()
    }
}

impl PartialEq for PriceObject {
    fn eq(&self, other: &Self) -> bool {
        self.canonical_id == other.canonical_id && self.finish == other.finish
    }
}

impl Eq for PriceObject {}

impl Hash for PriceObject {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical_id.hash(state);
        self.finish.hash(state);
    }
}

/// Reconciled prices of one provider: canonical id → finish → price object.
pub type PriceMap = BTreeMap<String, BTreeMap<Finish, PriceObject>>;
