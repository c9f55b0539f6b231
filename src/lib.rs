//! Stylesearch - attribute extraction, search and recommendation for a
//! fashion product catalog
//!
//! # Quick Start
//!
//! ```ignore
//! use stylesearch::{ProductFilter, RawRecord, SearchEngine};
//!
//! let mut engine = SearchEngine::default();
//! engine.initialize_from_records(vec![
//!     RawRecord::new()
//!         .with_brand("Biba")
//!         .with_details("Red cotton kurta with palazzo")
//!         .with_sell_price("1,499"),
//! ])?;
//!
//! let hits = engine.search("cotton kurta", &ProductFilter::new(), 10)?;
//! let similar = engine.recommend(hits[0].product.product_id, 5)?;
//! ```
//!
//! # Architecture
//!
//! - `stylesearch-core`: data model, catalog, configuration and errors
//! - `stylesearch-extract`: taxonomy extraction and record normalization
//! - `stylesearch-search`: term index, recommender, filters, persistence
//!   and the [`SearchEngine`] facade

pub use stylesearch_core::{
    Catalog, CatalogSummary, ColorFamily, Error, FeatureWeights, IndexConfig, NormalizedProduct,
    PriceRange, PriceStats, PriceThresholds, ProductFeatures, RawRecord, Result, SearchConfig,
    TrendingConfig, CONFIG_FILE_NAME, DEFAULT_CURRENCY_RATE,
};
pub use stylesearch_extract::{
    extract_product_types, normalize_size_query, NormalizationReport, Normalizer, Taxonomy,
};
pub use stylesearch_search::{
    export_catalog, load_bundle, save_bundle, ExportFormat, IndexBundle, ProductFilter,
    Recommendation, Recommender, SearchEngine, SearchHit, SearchIntent, TermIndex, TrendingHit,
    BUNDLE_FILE_NAME,
};
