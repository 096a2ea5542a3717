use serde_json::{Value, json};

pub fn document() -> Value {
    json!({
        "meta": {"created_at": "2024-05-17 04:00:00"},
        "data": [
            {"id": "100", "is_foil": "false", "price_retail": "9999.99", "price_buy": "7000.00"},
            {"id": "200", "is_foil": "false", "price_retail": "1.49", "price_buy": "0.60"},
            {"id": "201", "is_foil": "true", "price_retail": "4.99", "price_buy": ""},
            {"id": "300", "is_foil": "false", "price_retail": "0.79"},
            {"id": "301", "is_foil": "true", "price_retail": "2.29", "price_buy": "1.10"},
            {"id": "300", "is_foil": "false", "price_buy": "0.25"},
            {"id": "404", "is_foil": "false", "price_retail": "3.00"},
            {"is_foil": "false", "price_retail": "5.00"}
        ]
    })
}
