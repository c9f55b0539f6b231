//! Core types for stylesearch
//!
//! This crate defines the foundational types used throughout the workspace:
//! - Error: error taxonomy shared by every crate
//! - RawRecord / NormalizedProduct: ingested row and its cleaned form
//! - PriceRange / ColorFamily / ProductFeatures: typed product attributes
//! - Catalog: ordered, id-addressable product set
//! - SearchConfig: `stylesearch.toml` configuration

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod catalog;
pub mod config;
pub mod error;
pub mod product;

pub use catalog::{Catalog, CatalogSummary, PriceStats};
pub use config::{
    FeatureWeights, IndexConfig, PriceThresholds, SearchConfig, TrendingConfig,
    CONFIG_FILE_NAME, DEFAULT_CURRENCY_RATE,
};
pub use error::{Error, Result};
pub use product::{ColorFamily, NormalizedProduct, PriceRange, ProductFeatures, RawRecord};
