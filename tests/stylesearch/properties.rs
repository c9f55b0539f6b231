//! Ranking and normalization invariants

use crate::common::*;
use proptest::prelude::*;
use std::collections::BTreeSet;
use stylesearch::{Normalizer, PriceRange, PriceThresholds, TermIndex};

fn rebuild(products: Vec<NormalizedProduct>) -> SearchEngine {
    let mut engine = SearchEngine::new(loose_config());
    engine
        .initialize_from_catalog(Catalog::from_products(products).unwrap())
        .unwrap();
    engine
}

#[test]
fn reordering_catalog_keeps_recommendation_set() {
    let engine = ready_engine();
    let products = engine.catalog().unwrap().products().to_vec();
    let mut reversed = products.clone();
    reversed.reverse();
    let shuffled = rebuild(reversed);

    for product in &products {
        let a = engine.recommend(product.product_id, 4).unwrap();
        let b = shuffled.recommend(product.product_id, 4).unwrap();
        let scores = |recs: &[stylesearch::Recommendation<'_>]| {
            recs.iter().map(|r| r.score).collect::<Vec<_>>()
        };
        assert_eq!(scores(&a), scores(&b), "reference {}", product.product_id);

        // membership of the top three is fixed unless the cut falls on a tie
        if a[2].score != a[3].score {
            let top = |recs: &[stylesearch::Recommendation<'_>]| {
                recs[..3]
                    .iter()
                    .map(|r| r.product.product_id)
                    .collect::<BTreeSet<u64>>()
            };
            assert_eq!(top(&a), top(&b), "reference {}", product.product_id);
        }
    }
}

#[test]
fn building_twice_is_idempotent() {
    let engine = ready_engine();
    let texts: Vec<&str> = engine
        .catalog()
        .unwrap()
        .products()
        .iter()
        .map(|p| p.search_text.as_str())
        .collect();

    let config = loose_config().index;
    let first = TermIndex::build(&texts, &config);
    let second = TermIndex::build(&texts, &config);
    assert_eq!(first.vocabulary().terms(), second.vocabulary().terms());
    for q in ["kurta", "blue denim", "gold necklace", "cotton"] {
        assert_eq!(first.query(q, 5), second.query(q, 5));
    }

    let again = rebuild(engine.catalog().unwrap().products().to_vec());
    assert_eq!(
        engine.search("cotton", &ProductFilter::new(), 5).unwrap(),
        again.search("cotton", &ProductFilter::new(), 5).unwrap()
    );
}

#[test]
fn default_cutoffs_drop_singleton_terms() {
    let mut engine = SearchEngine::default();
    engine.initialize_from_records(fixture_records()).unwrap();
    // "loafers" occurs in one product only
    assert!(engine
        .search("loafers", &ProductFilter::new(), 5)
        .unwrap()
        .is_empty());
    assert!(!engine
        .search("kurta", &ProductFilter::new(), 5)
        .unwrap()
        .is_empty());
}

#[test]
fn taxonomy_guards_hold_end_to_end() {
    let report = Normalizer::default()
        .normalize_all(vec![
            RawRecord::new()
                .with_details("denim jacket with slim fit jeans pocket")
                .with_sell_price("100"),
            RawRecord::new()
                .with_details("kurta with dupatta and palazzo")
                .with_sell_price("100"),
            RawRecord::new()
                .with_details("black leather heels and matching flats")
                .with_sell_price("100"),
        ])
        .unwrap();
    let types: Vec<&Vec<String>> = report
        .catalog
        .products()
        .iter()
        .map(|p| &p.product_types)
        .collect();

    assert!(types[0].contains(&"jacket".to_string()));
    assert!(!types[0].contains(&"jeans".to_string()));
    assert_eq!(types[1], &vec!["salwar suit".to_string()]);
    assert!(types[2].contains(&"heels".to_string()));
    assert!(!types[2].contains(&"flats".to_string()));
}

proptest! {
    #[test]
    fn sell_price_is_rounded_conversion(
        whole in 0u32..100_000,
        cents in 0u32..100,
        with_sell in any::<bool>(),
    ) {
        let raw_price = format!("Rs. {},{:03}.{:02}", whole / 1000, whole % 1000, cents);
        let parsed: f64 = format!("{}.{:02}", whole, cents).parse().unwrap();
        let rate = 0.0095;

        let record = if with_sell {
            RawRecord::new().with_sell_price(raw_price.clone()).with_mrp("999999")
        } else {
            RawRecord::new().with_mrp(raw_price.clone())
        };
        let product = Normalizer::default().normalize(0, &record).unwrap();

        let expected = (parsed * rate * 100.0).round() / 100.0;
        prop_assert_eq!(product.sell_price, expected);
        prop_assert_eq!(
            product.price_range,
            PriceRange::from_price(Some(product.sell_price), &PriceThresholds::default())
        );
    }
}
