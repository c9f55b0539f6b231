//! Facade behaviour over the fixture catalog

use crate::common::*;
use stylesearch::{Error, PriceRange};

#[test]
fn uninitialized_engine_signals_not_ready() {
    let engine = SearchEngine::new(loose_config());
    let tmp = tempfile::tempdir().unwrap();

    let errors = vec![
        engine.search("kurta", &ProductFilter::new(), 5).unwrap_err(),
        engine.smart_search("cheap kurta", 5).unwrap_err(),
        engine.recommend(0, 5).unwrap_err(),
        engine.trending(5).unwrap_err(),
        engine.categories().unwrap_err(),
        engine.brands().unwrap_err(),
        engine.price_range_counts().unwrap_err(),
        engine.product_details(0).unwrap_err(),
        engine.save_bundle(&tmp.path().join("x.bundle")).unwrap_err(),
        engine.export_catalog(&tmp.path().join("x.csv")).unwrap_err(),
    ];
    for err in errors {
        assert!(matches!(err, Error::NotReady(_)), "got {:?}", err);
    }
}

#[test]
fn build_drops_unpriced_rows_and_keeps_ids() {
    let mut engine = SearchEngine::new(loose_config());
    let dropped = engine.initialize_from_records(fixture_records()).unwrap();
    assert_eq!(dropped, vec![5]);

    let catalog = engine.catalog().unwrap();
    assert_eq!(catalog.len(), 11);
    assert!(catalog.get(5).is_none());
    assert_eq!(catalog.get(6).unwrap().brand, "fossil");
}

#[test]
fn normalized_fields_flow_through() {
    let engine = ready_engine();

    let suit = engine.product_details(2).unwrap();
    assert_eq!(suit.category, "Indian Wear");
    assert_eq!(suit.product_types, vec!["salwar suit"]);
    assert_eq!(suit.sell_price, 31.34);
    assert_eq!(suit.price_range, PriceRange::Luxury);

    let jacket = engine.product_details(8).unwrap();
    assert_eq!(jacket.product_types, vec!["jacket"]);
    assert_eq!(jacket.sizes, vec!["L", "M", "S", "XL"]);

    let necklace = engine.product_details(7).unwrap();
    assert_eq!(necklace.product_types, vec!["necklace"]);
    assert_eq!(necklace.price_range, PriceRange::MidRange);
}

#[test]
fn search_ranks_single_document_term_first() {
    let engine = ready_engine();
    let hits = engine.search("loafers", &ProductFilter::new(), 5).unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].product.product_id, 11);
    assert!(hits[0].score.unwrap() > 0.0);
}

#[test]
fn search_unknown_term_is_empty() {
    let engine = ready_engine();
    let hits = engine.search("spaceship", &ProductFilter::new(), 5).unwrap();
    assert!(hits.is_empty());
}

#[test]
fn search_scores_only_filtered_rows() {
    let engine = ready_engine();
    let all = engine.search("kurta", &ProductFilter::new(), 10).unwrap();
    assert!(all.len() >= 2);

    let filter = ProductFilter::new().with_max_price(10.0);
    let cheap = engine.search("kurta", &filter, 10).unwrap();
    let cheap_ids = ids(cheap.iter().map(|h| h.product));
    assert_eq!(cheap_ids, vec![10]);

    // the unfiltered score of the same row is unchanged
    let full = all.iter().find(|h| h.product.product_id == 10).unwrap();
    assert_eq!(full.score, cheap[0].score);
}

#[test]
fn blank_query_lists_filtered_rows_in_order() {
    let engine = ready_engine();
    let filter = ProductFilter::new().with_category("western");
    let hits = engine.search("", &filter, 3).unwrap();
    assert_eq!(ids(hits.iter().map(|h| h.product)), vec![1, 4, 8]);
}

#[test]
fn combined_filters_are_conjunctive() {
    let engine = ready_engine();
    let filter = ProductFilter::new()
        .with_category("western wear")
        .with_material("cotton")
        .with_size("xl");
    let hits = engine.search("", &filter, 10).unwrap();
    assert_eq!(ids(hits.iter().map(|h| h.product)), vec![9]);
}

#[test]
fn smart_search_infers_filters() {
    let engine = ready_engine();
    // nothing in the fixture is priced below the budget threshold
    assert!(engine.smart_search("affordable cotton kurta", 10).unwrap().is_empty());

    let hits = engine.smart_search("mid range cotton kurta", 10).unwrap();
    let mut found = ids(hits.iter().map(|h| h.product));
    found.sort_unstable();
    assert_eq!(found, vec![0, 10]);

    let hits = engine.smart_search("leather shoes", 10).unwrap();
    assert!(!hits.is_empty());
    assert!(hits.iter().all(|h| h.product.category == "Footwear"));
}

#[test]
fn recommendations_exclude_reference() {
    let engine = ready_engine();
    let catalog_len = engine.catalog().unwrap().len();
    for product in engine.catalog().unwrap().products() {
        let recs = engine.recommend(product.product_id, catalog_len).unwrap();
        assert_eq!(recs.len(), catalog_len - 1);
        assert!(recs.iter().all(|r| r.product.product_id != product.product_id));
        for pair in recs.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }
}

#[test]
fn recommendations_prefer_same_kind() {
    let engine = ready_engine();
    let recs = engine.recommend(0, 2).unwrap();
    let top: Vec<u64> = recs.iter().map(|r| r.product.product_id).collect();
    assert!(top.contains(&10), "kurta should recommend the other kurta: {:?}", top);
    assert!(recs.iter().all(|r| r.category_similarity == 1.0));
}

#[test]
fn unknown_product_is_not_found() {
    let engine = ready_engine();
    assert!(matches!(engine.recommend(5, 3), Err(Error::ProductNotFound(5))));
    assert!(matches!(engine.product_details(99), Err(Error::ProductNotFound(99))));
}

#[test]
fn trending_favours_discounts_and_low_prices() {
    let engine = ready_engine();
    let top = engine.trending(3).unwrap();
    assert_eq!(top.len(), 3);
    // cheapest item with the largest discount
    assert_eq!(top[0].product.product_id, 7);
    for pair in top.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }
}

#[test]
fn catalog_views() {
    let engine = ready_engine();
    assert_eq!(
        engine.categories().unwrap(),
        vec!["Indian Wear", "Western Wear", "Footwear", "Watches", "Jewellery"]
    );
    let brands = engine.brands().unwrap();
    assert_eq!(brands.len(), 11);
    assert_eq!(brands[0], "biba");

    let counts = engine.price_range_counts().unwrap();
    assert_eq!(counts.values().sum::<usize>(), 11);
    assert_eq!(counts.get(&PriceRange::Unknown), None);

    let summary = engine.data_summary().unwrap();
    assert_eq!(summary.total_products, 11);
    assert_eq!(summary.categories.get("Western Wear"), Some(&4));
    assert_eq!(summary.materials.get("cotton"), Some(&4));

    let footwear = engine.browse_by_category("foot", 10).unwrap();
    assert_eq!(ids(footwear), vec![3, 11]);
}
