use listino_core::Catalog;
use serde_json::{Value, json};

fn card(uuid: &str, name: &str, set: &str, nonfoil: Option<&str>, foil: Option<&str>) -> Value {
    let mut identifiers = serde_json::Map::new();
    if let Some(id) = nonfoil {
        identifiers.insert("mockId".into(), json!(id));
    }
    if let Some(id) = foil {
        identifiers.insert("mockFoilId".into(), json!(id));
    }
    json!({
        "uuid": uuid,
        "name": name,
        "setCode": set,
        "identifiers": identifiers,
    })
}

pub fn records() -> Vec<Value> {
    vec![
        card(
            "5f8287b1-5bb6-5f4c-ad17-316a40d5bb0c",
            "Ancestral Recall",
            "LEA",
            Some("100"),
            None,
        ),
        card(
            "b7c19924-b4bf-56fc-aa73-f586e940bd42",
            "Lightning Bolt",
            "M10",
            Some("200"),
            Some("201"),
        ),
        card(
            "57aaebc1-850c-503d-9f6e-bb8d00d8bf7c",
            "Counterspell",
            "MH2",
            Some("300"),
            Some("301"),
        ),
        // Printing the vendor lists under the same product as Counterspell's foil.
        card(
            "e1a7b5c0-33e4-5f0a-8d7a-0c6b1d8f6a11",
            "Counterspell",
            "MH2",
            None,
            Some("301"),
        ),
        card(
            "9c4d2a6e-0f3b-5b8e-9d6c-7a1e2f3b4c5d",
            "Llanowar Elves",
            "DOM",
            None,
            None,
        ),
    ]
}

pub fn catalog() -> Catalog {
    Catalog::from_records(records())
}
