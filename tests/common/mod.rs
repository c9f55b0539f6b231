//! Shared fixtures for the integration suites.
//!
//! Import via `#[path = "../common/mod.rs"] mod common;` from a suite's main.rs.

#![allow(dead_code)]

pub use stylesearch::{
    Catalog, IndexConfig, NormalizedProduct, ProductFilter, RawRecord, SearchConfig, SearchEngine,
};

/// Config whose vocabulary keeps every term, so small fixtures index fully
pub fn loose_config() -> SearchConfig {
    SearchConfig {
        index: IndexConfig {
            min_df: 1,
            max_df: 1.0,
            ..IndexConfig::default()
        },
        ..SearchConfig::default()
    }
}

fn record(brand: &str, details: &str, category: &str, price: &str, sizes: &str) -> RawRecord {
    RawRecord::new()
        .with_brand(brand)
        .with_details(details)
        .with_category(category)
        .with_sell_price(price)
        .with_sizes(sizes)
}

/// A small mixed catalog in source-spreadsheet shape
pub fn fixture_records() -> Vec<RawRecord> {
    vec![
        record("Biba", "Red cotton straight kurta with palazzo", "indianwear-women", "1,499", "S, M, L")
            .with_discount("40% off"),
        record("Only", "Blue slim fit denim jeans", "westernwear-women", "2,999", "28, 30, 32"),
        record("Libas", "Green silk kurta with dupatta and palazzo", "indianwear-women", "3,299", "M, L, XL")
            .with_discount("25% off"),
        record("Catwalk", "Black leather block heels", "footwear-women", "4,500", "36, 37, 38"),
        record("Vero Moda", "Floral printed cotton maxi dress", "westernwear-women", "2,199", "Size:Small,Medium")
            .with_discount("60% off"),
        RawRecord::new().with_brand("Ghost").with_details("Listing without any price"),
        record("Fossil", "Rose gold analog watch with metal strap", "watches-women", "9,995", ""),
        record("Zaveri Pearls", "Gold-toned necklace with pendant", "jewellery-women", "799", "")
            .with_discount("70% off"),
        record("Levis", "Light blue denim jacket with button closure", "westernwear-women", "3,999", "S, M, L, XL"),
        record("Puma", "Grey cotton track pants", "westernwear-women", "1,299", "M, L, XL, XXL"),
        record("W", "Printed cotton kurta", "indianwear-women", "899", "XS, S, M"),
        record("Hush Puppies", "Tan leather loafers", "footwear-women", "3,499", "37, 38"),
    ]
}

/// Engine built from [`fixture_records`] with [`loose_config`]
pub fn ready_engine() -> SearchEngine {
    let mut engine = SearchEngine::new(loose_config());
    engine
        .initialize_from_records(fixture_records())
        .expect("fixture catalog builds");
    engine
}

/// Product ids of a hit list
pub fn ids<'a, I>(products: I) -> Vec<u64>
where
    I: IntoIterator<Item = &'a NormalizedProduct>,
{
    products.into_iter().map(|p| p.product_id).collect()
}
