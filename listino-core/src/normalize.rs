use crate::row::RawPriceRow;
use crate::{FeedFields, Finish, Price};

/// Prices extracted from one vendor row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizedRow {
    /// Finish the row quotes.
    pub finish: Finish,
    /// Retail (sell) price, if present and usable.
    pub retail: Option<Price>,
    /// Buylist price, if present and usable.
    pub buy: Option<Price>,
}

impl NormalizedRow {
    /// True when the row carried neither price.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.retail.is_none() && self.buy.is_none()
    }
}

/// Convert one raw row into a finish and optional prices using the vendor's
/// field names.
///
/// Never fails. A missing, empty, non-numeric or negative price field reads
/// as "no value", which is distinct from a zero price.
#[must_use]
pub fn normalize_row(row: &RawPriceRow, fields: &FeedFields) -> NormalizedRow {
    NormalizedRow {
        finish: finish_of(row, fields),
        retail: price_of(row, fields.retail.as_deref(), fields.retail_quantity.as_deref()),
        buy: price_of(row, fields.buy.as_deref(), fields.buy_quantity.as_deref()),
    }
}

fn finish_of(row: &RawPriceRow, fields: &FeedFields) -> Finish {
    if let Some(rule) = &fields.etched
        && row
            .text(&rule.field)
            .is_some_and(|v| v.eq_ignore_ascii_case(&rule.value))
    {
        return Finish::Etched;
    }
    if row.flag(&fields.foil).unwrap_or(false) {
        Finish::Foil
    } else {
        Finish::NonFoil
    }
}

fn price_of(row: &RawPriceRow, field: Option<&str>, quantity: Option<&str>) -> Option<Price> {
    let field = field?;
    if let Some(q) = quantity
        && !row.decimal(q).is_some_and(|n| n.is_sign_positive() && !n.is_zero())
    {
        return None;
    }
    row.decimal(field).and_then(Price::new)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use serde_json::json;

    fn ck_fields() -> FeedFields {
        FeedFields::new("id", "is_foil")
            .with_retail("price_retail")
            .with_buy("price_buy")
    }

    fn row(v: serde_json::Value) -> RawPriceRow {
        RawPriceRow::from_value(v).unwrap()
    }

    fn px(cents: i64) -> Option<Price> {
        Price::new(Decimal::new(cents, 2))
    }

    #[test]
    fn foil_flag_selects_finish() {
        let f = ck_fields();
        let n = normalize_row(&row(json!({"is_foil": "true", "price_retail": "1.25"})), &f);
        assert_eq!(n.finish, Finish::Foil);
        assert_eq!(n.retail, px(125));
        assert_eq!(n.buy, None);

        let n = normalize_row(&row(json!({"is_foil": "false"})), &f);
        assert_eq!(n.finish, Finish::NonFoil);
        let n = normalize_row(&row(json!({})), &f);
        assert_eq!(n.finish, Finish::NonFoil);
        assert!(n.is_empty());
    }

    #[test]
    fn zero_is_a_price_but_garbage_is_not() {
        let f = ck_fields();
        let n = normalize_row(
            &row(json!({"price_retail": "0.00", "price_buy": "call us"})),
            &f,
        );
        assert_eq!(n.retail, px(0));
        assert_eq!(n.buy, None);
    }

    #[test]
    fn negative_prices_are_dropped() {
        let n = normalize_row(&row(json!({"price_retail": "-1.00"})), &ck_fields());
        assert_eq!(n.retail, None);
    }

    #[test]
    fn quantity_gates_price() {
        let f = ck_fields()
            .with_retail_quantity("qty_retail")
            .with_buy_quantity("qty_buying");
        let n = normalize_row(
            &row(json!({
                "price_retail": "2.00", "qty_retail": 0,
                "price_buy": "1.00", "qty_buying": "3"
            })),
            &f,
        );
        assert_eq!(n.retail, None);
        assert_eq!(n.buy, px(100));

        let n = normalize_row(&row(json!({"price_retail": "2.00"})), &f);
        assert_eq!(n.retail, None);
    }

    #[test]
    fn etched_rule_wins_over_foil_flag() {
        let f = ck_fields().with_etched("variation", "Etched");
        let n = normalize_row(&row(json!({"is_foil": "true", "variation": "etched"})), &f);
        assert_eq!(n.finish, Finish::Etched);
        let n = normalize_row(&row(json!({"is_foil": "true", "variation": "borderless"})), &f);
        assert_eq!(n.finish, Finish::Foil);
    }

    #[test]
    fn unconfigured_price_fields_yield_nothing() {
        let f = FeedFields::new("id", "foil");
        let n = normalize_row(&row(json!({"price_retail": "9.99"})), &f);
        assert!(n.is_empty());
    }
}
