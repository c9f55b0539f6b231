//! Bundle round-trips and catalog export

use crate::common::*;
use stylesearch::{load_bundle, Error, ExportFormat, BUNDLE_FILE_NAME};

const QUERIES: &[&str] = &["kurta", "cotton kurta", "denim", "leather heels", "gold", "zzz"];

#[test]
fn save_then_load_reproduces_outputs() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join(BUNDLE_FILE_NAME);

    let original = ready_engine();
    original.save_bundle(&path).unwrap();

    let mut reloaded = SearchEngine::new(loose_config());
    reloaded.load_bundle(&path).unwrap();

    for q in QUERIES {
        let a = original.search(q, &ProductFilter::new(), 5).unwrap();
        let b = reloaded.search(q, &ProductFilter::new(), 5).unwrap();
        assert_eq!(a, b, "query {:?}", q);
    }
    for product in original.catalog().unwrap().products() {
        let a = original.recommend(product.product_id, 4).unwrap();
        let b = reloaded.recommend(product.product_id, 4).unwrap();
        assert_eq!(a, b);
    }
    assert_eq!(original.trending(5).unwrap(), reloaded.trending(5).unwrap());
    assert_eq!(original.data_summary().unwrap(), reloaded.data_summary().unwrap());
}

#[test]
fn bundle_carries_weights() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join(BUNDLE_FILE_NAME);

    let mut config = loose_config();
    config.weights.category = 0.5;
    let mut engine = SearchEngine::new(config);
    engine.initialize_from_records(fixture_records()).unwrap();
    engine.save_bundle(&path).unwrap();

    let mut reloaded = SearchEngine::default();
    reloaded.load_bundle(&path).unwrap();
    assert_eq!(reloaded.config().weights.category, 0.5);
    assert_eq!(load_bundle(&path).unwrap().weights.category, 0.5);
}

#[test]
fn corrupt_bundle_fails_at_load() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join(BUNDLE_FILE_NAME);
    ready_engine().save_bundle(&path).unwrap();

    let mut bytes = std::fs::read(&path).unwrap();
    bytes.truncate(bytes.len() - 16);
    std::fs::write(&path, &bytes).unwrap();

    let mut engine = SearchEngine::default();
    assert!(matches!(engine.load_bundle(&path), Err(Error::Corruption(_))));
    assert!(!engine.is_ready());
}

#[test]
fn flipped_byte_fails_at_load_and_keeps_state() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join(BUNDLE_FILE_NAME);
    let engine = ready_engine();
    engine.save_bundle(&path).unwrap();

    let mut bytes = std::fs::read(&path).unwrap();
    let middle = bytes.len() / 2;
    bytes[middle] ^= 0x40;
    std::fs::write(&path, &bytes).unwrap();

    let mut reloaded = ready_engine();
    let err = reloaded.load_bundle(&path).unwrap_err();
    assert!(matches!(err, Error::Corruption(_)), "got {:?}", err);
    // the previous catalog still answers queries
    assert_eq!(reloaded.catalog().unwrap().len(), 11);
}

#[test]
fn export_csv_and_json() {
    let tmp = tempfile::tempdir().unwrap();
    let engine = ready_engine();

    let csv = tmp.path().join("catalog.csv");
    assert_eq!(engine.export_catalog(&csv).unwrap(), ExportFormat::Csv);
    let text = std::fs::read_to_string(&csv).unwrap();
    // header + one line per product
    assert_eq!(text.lines().count(), 12);

    let json = tmp.path().join("catalog.json");
    assert_eq!(engine.export_catalog(&json).unwrap(), ExportFormat::Json);
    let back: Vec<NormalizedProduct> =
        serde_json::from_str(&std::fs::read_to_string(&json).unwrap()).unwrap();
    assert_eq!(back, engine.catalog().unwrap().products());
}

#[test]
fn export_unsupported_extension() {
    let tmp = tempfile::tempdir().unwrap();
    let engine = ready_engine();
    let err = engine.export_catalog(&tmp.path().join("catalog.xlsx")).unwrap_err();
    assert!(matches!(err, Error::UnsupportedFormat(_)));
}
