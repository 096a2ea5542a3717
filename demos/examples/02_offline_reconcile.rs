use listino_core::{
    Catalog, CurrencyCode, FeedFields, FieldPath, GameFormat, IdentifierPaths, NaiveDate,
    PriceReconciler, PriceTemplate, build_cross_reference, extract_rows,
};
use serde_json::json;

// Reconcile an in-memory feed without touching the network.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let catalog = Catalog::from_records(vec![
        json!({"uuid": "U1", "name": "Lightning Bolt", "identifiers": {"cardKingdomId": "K1", "cardKingdomFoilId": "KF1"}}),
        json!({"uuid": "U2", "name": "Counterspell", "identifiers": {"cardKingdomId": "K2"}}),
    ]);
    let paths = IdentifierPaths {
        canonical: FieldPath::parse("uuid")?,
        nonfoil: FieldPath::parse("identifiers.cardKingdomId")?,
        foil: Some(FieldPath::parse("identifiers.cardKingdomFoilId")?),
    };
    let xref = build_cross_reference(&catalog, &paths);

    let feed = json!({"data": [
        {"id": "K1", "is_foil": "false", "price_retail": "1.99", "price_buy": "0.80"},
        {"id": "KF1", "is_foil": "true", "price_retail": "6.49"},
        {"id": "K2", "is_foil": "false", "price_retail": "n/a"},
        {"id": "K404", "is_foil": "false", "price_retail": "3.00"}
    ]});
    let rows = extract_rows(feed);

    let template = PriceTemplate::new(
        GameFormat::Paper,
        "cardkingdom",
        NaiveDate::from_ymd_opt(2024, 5, 17).ok_or("bad date")?,
        CurrencyCode::USD,
    );
    let fields = FeedFields::new("id", "is_foil")
        .with_retail("price_retail")
        .with_buy("price_buy");
    let (prices, summary) = PriceReconciler::new(fields, template).reconcile_with_summary(&rows, &xref);

    println!(
        "rows={} matched={} unmapped={} missing_id={} objects={}",
        summary.rows, summary.matched, summary.unmapped, summary.missing_id, summary.objects
    );
    println!("{}", serde_json::to_string_pretty(&prices)?);
    Ok(())
}
