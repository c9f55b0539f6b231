//! Search configuration via `stylesearch.toml`
//!
//! Every knob has a default, so an empty file (or no file at all) yields a
//! working setup. Values are validated eagerly when a file is read.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Config file name
pub const CONFIG_FILE_NAME: &str = "stylesearch.toml";

/// Default INR→GBP conversion applied to raw prices
pub const DEFAULT_CURRENCY_RATE: f64 = 0.0095;

// ============================================================================
// Sections
// ============================================================================

/// Upper bounds (exclusive) of the price tiers, in target currency
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriceThresholds {
    /// Prices below this are `budget`
    pub budget_below: f64,
    /// Prices below this are `mid-range`
    pub mid_range_below: f64,
    /// Prices below this are `premium`; everything else is `luxury`
    pub premium_below: f64,
}

impl Default for PriceThresholds {
    fn default() -> Self {
        Self {
            budget_below: 5.0,
            mid_range_below: 15.0,
            premium_below: 30.0,
        }
    }
}

/// Vocabulary settings for the term-weighted index
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Vocabulary cap; the most frequent surviving terms are kept
    pub max_features: usize,
    /// Longest word n-gram indexed (1 = unigrams only)
    pub ngram_max: usize,
    /// Terms must appear in at least this many documents
    pub min_df: usize,
    /// Terms appearing in more than this fraction of documents are dropped
    pub max_df: f64,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            max_features: 5000,
            ngram_max: 2,
            min_df: 2,
            max_df: 0.8,
        }
    }
}

impl IndexConfig {
    /// Check the n-gram and document-frequency ranges.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] naming the offending field.
    pub fn validate(&self) -> Result<()> {
        if self.ngram_max == 0 || self.ngram_max > 3 {
            return Err(Error::invalid_input(format!(
                "index.ngram_max must be between 1 and 3, got {}",
                self.ngram_max
            )));
        }
        if !(self.max_df > 0.0 && self.max_df <= 1.0) {
            return Err(Error::invalid_input(format!(
                "index.max_df must be in (0, 1], got {}",
                self.max_df
            )));
        }
        Ok(())
    }
}

/// Linear weights of the hybrid recommender.
///
/// The weights are not normalized; callers that want scores in `[0, 1]`
/// must pass weights that sum to 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureWeights {
    /// Weight of cosine text similarity
    pub text: f32,
    /// Weight of price proximity
    pub price: f32,
    /// Weight of exact category match
    pub category: f32,
}

impl Default for FeatureWeights {
    fn default() -> Self {
        Self {
            text: 0.6,
            price: 0.2,
            category: 0.2,
        }
    }
}

/// Trending heuristic: `discount_weight * discount + price_weight *
/// (reference_price / max(sell_price, price_floor))`.
///
/// This is a fixed heuristic, not a popularity model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendingConfig {
    /// Multiplier on the discount percentage
    pub discount_weight: f64,
    /// Multiplier on the inverse-price term
    pub price_weight: f64,
    /// Numerator of the inverse-price term
    pub reference_price: f64,
    /// Lower clamp on the price divisor
    pub price_floor: f64,
}

impl Default for TrendingConfig {
    fn default() -> Self {
        Self {
            discount_weight: 0.7,
            price_weight: 0.3,
            reference_price: 1000.0,
            price_floor: 0.01,
        }
    }
}

// ============================================================================
// SearchConfig
// ============================================================================

/// Configuration loaded from `stylesearch.toml`.
///
/// # Example
///
/// ```toml
/// currency_rate = 0.0095
///
/// [index]
/// min_df = 1
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Multiplier applied to every raw price
    pub currency_rate: f64,
    /// Price tier bounds
    pub price_thresholds: PriceThresholds,
    /// Term index vocabulary settings
    pub index: IndexConfig,
    /// Recommender weights
    pub weights: FeatureWeights,
    /// Trending heuristic constants
    pub trending: TrendingConfig,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            currency_rate: DEFAULT_CURRENCY_RATE,
            price_thresholds: PriceThresholds::default(),
            index: IndexConfig::default(),
            weights: FeatureWeights::default(),
            trending: TrendingConfig::default(),
        }
    }
}

impl SearchConfig {
    /// Check value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        if !self.currency_rate.is_finite() || self.currency_rate <= 0.0 {
            return Err(Error::invalid_input(format!(
                "currency_rate must be a positive number, got {}",
                self.currency_rate
            )));
        }
        let t = &self.price_thresholds;
        if !(t.budget_below < t.mid_range_below && t.mid_range_below < t.premium_below) {
            return Err(Error::invalid_input(
                "price_thresholds must be strictly increasing",
            ));
        }
        self.index.validate()?;
        if self.trending.price_floor <= 0.0 {
            return Err(Error::invalid_input("trending.price_floor must be positive"));
        }
        Ok(())
    }

    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# Stylesearch configuration
#
# Multiplier applied to every raw price (default converts INR to GBP).
currency_rate = 0.0095

# Price tiers, exclusive upper bounds in target currency.
[price_thresholds]
budget_below = 5.0
mid_range_below = 15.0
premium_below = 30.0

# Term-weighted index vocabulary.
#   max_features = vocabulary cap (most frequent terms kept)
#   ngram_max    = 1 for unigrams, 2 adds adjacent word pairs
#   min_df       = minimum number of documents a term must appear in
#   max_df       = maximum fraction of documents a term may appear in
[index]
max_features = 5000
ngram_max = 2
min_df = 2
max_df = 0.8

# Recommender weights. Not normalized by the engine.
[weights]
text = 0.6
price = 0.2
category = 0.2

# Trending heuristic:
#   discount_weight * discount + price_weight * reference_price / max(price, price_floor)
[trending]
discount_weight = 0.7
price_weight = 0.3
reference_price = 1000.0
price_floor = 0.01
"#
    }

    /// Read and parse config from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: SearchConfig = toml::from_str(&content).map_err(|e| {
            Error::invalid_input(format!(
                "Failed to parse config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Write the default config file if it does not already exist.
    pub fn write_default_if_missing(path: &Path) -> Result<()> {
        if !path.exists() {
            std::fs::write(path, Self::default_toml())?;
        }
        Ok(())
    }

    /// Serialize this config to TOML and write it to the given path.
    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Serialization(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
