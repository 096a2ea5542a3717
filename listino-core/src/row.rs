//! Typed, never-failing access to loosely structured vendor rows.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One raw row of a vendor price feed.
///
/// Vendors disagree on types: identifiers arrive as strings or integers,
/// booleans as `true` or `"true"`, prices as numbers or decimal strings.
/// Every accessor reads an absent or wrong-typed field as `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawPriceRow(Map<String, Value>);

impl RawPriceRow {
    /// Wrap a JSON value; returns `None` unless it is an object.
    #[must_use]
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    /// Raw access to a field.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Vendor identifier: a non-empty string, or an integer rendered in decimal.
    #[must_use]
    pub fn id(&self, field: &str) -> Option<String> {
        match self.get(field)? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) if n.is_i64() || n.is_u64() => Some(n.to_string()),
            _ => None,
        }
    }

    /// Boolean-ish flag.
    ///
    /// Accepts JSON booleans, integers (non-zero is true) and the strings
    /// `true/false`, `yes/no`, `t/f`, `y/n`, `1/0` in any case.
    #[must_use]
    pub fn flag(&self, field: &str) -> Option<bool> {
        match self.get(field)? {
            Value::Bool(b) => Some(*b),
            Value::Number(n) => n.as_i64().map(|v| v != 0),
            Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" | "yes" | "t" | "y" | "1" => Some(true),
                "false" | "no" | "f" | "n" | "0" => Some(false),
                _ => None,
            },
            _ => None,
        }
    }

    /// Decimal number from a JSON number or a numeric string.
    #[must_use]
    pub fn decimal(&self, field: &str) -> Option<Decimal> {
        match self.get(field)? {
            Value::Number(n) => parse_decimal(&n.to_string()),
            Value::String(s) => parse_decimal(s.trim()),
            _ => None,
        }
    }

    /// Scalar rendered as text (strings verbatim, numbers and booleans formatted).
    #[must_use]
    pub fn text(&self, field: &str) -> Option<String> {
        match self.get(field)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }
}

fn parse_decimal(s: &str) -> Option<Decimal> {
    if s.is_empty() {
        return None;
    }
    Decimal::from_str(s)
        .or_else(|_| Decimal::from_scientific(s))
        .ok()
}

impl From<Map<String, Value>> for RawPriceRow {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}
