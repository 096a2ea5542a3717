use std::io::Write;

use listino_core::{
    AllPrintingsFile, CatalogSource, FieldPath, IdentifierPaths, ListinoError,
    build_cross_reference, build_mapping_from_path,
};
use serde_json::json;
use tempfile::NamedTempFile;

fn write_json(value: &serde_json::Value) -> NamedTempFile {
    let mut f = NamedTempFile::new().unwrap();
    serde_json::to_writer(&mut f, value).unwrap();
    f.flush().unwrap();
    f
}

fn all_printings() -> serde_json::Value {
    json!({
        "meta": {"date": "2024-05-17"},
        "data": {
            "MH3": {
                "cards": [
                    {"uuid": "U1", "identifiers": {"cardKingdomId": "K1", "cardKingdomFoilId": "KF1"}},
                    {"uuid": "U2", "identifiers": {"cardKingdomId": "K2"}},
                    {"uuid": "U3", "identifiers": {}}
                ],
                "tokens": [
                    {"uuid": "T1", "identifiers": {"cardKingdomId": "KT1"}}
                ]
            }
        }
    })
}

#[test]
fn loads_cards_and_tokens_from_disk() {
    let file = write_json(&all_printings());
    let catalog = AllPrintingsFile::new(file.path()).load().unwrap();
    assert_eq!(catalog.len(), 4);

    let paths = IdentifierPaths {
        canonical: FieldPath::parse("uuid").unwrap(),
        nonfoil: FieldPath::parse("identifiers.cardKingdomId").unwrap(),
        foil: Some(FieldPath::parse("identifiers.cardKingdomFoilId").unwrap()),
    };
    let xref = build_cross_reference(&catalog, &paths);
    assert_eq!(xref.len(), 4);
    assert!(xref.get("KF1").unwrap().contains("U1"));
    assert!(xref.get("KT1").unwrap().contains("T1"));
}

#[test]
fn build_mapping_from_path_reads_one_scan() {
    let file = write_json(&all_printings());
    let xref = build_mapping_from_path(
        file.path(),
        &FieldPath::parse("identifiers.cardKingdomFoilId").unwrap(),
        &FieldPath::parse("uuid").unwrap(),
    )
    .unwrap();
    assert_eq!(xref.len(), 1);
    assert!(xref.contains("KF1"));
    assert!(!xref.contains("K1"));
}

#[test]
fn missing_file_is_catalog_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("AllPrintings.json");
    let err = AllPrintingsFile::new(&path).load().unwrap_err();
    match err {
        ListinoError::CatalogUnavailable { path: p, .. } => {
            assert_eq!(p, path.display().to_string());
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn unparseable_file_is_catalog_unavailable() {
    let mut f = NamedTempFile::new().unwrap();
    f.write_all(b"{\"data\": {\"MH3\": ").unwrap();
    f.flush().unwrap();
    let err = AllPrintingsFile::new(f.path()).load().unwrap_err();
    assert!(matches!(err, ListinoError::CatalogUnavailable { .. }));

    let no_data = write_json(&json!({"meta": {}}));
    let err = build_mapping_from_path(
        no_data.path(),
        &FieldPath::parse("identifiers.cardKingdomId").unwrap(),
        &FieldPath::parse("uuid").unwrap(),
    )
    .unwrap_err();
    assert!(matches!(err, ListinoError::CatalogUnavailable { .. }));
}
