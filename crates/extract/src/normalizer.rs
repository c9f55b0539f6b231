//! Record normalization
//!
//! Turns [`RawRecord`]s into [`NormalizedProduct`]s. A record is dropped
//! only when neither its selling price nor its list price parses; every
//! other defect degrades to a missing value.

use crate::attributes::{
    clean_category, color_family, convert_price, extract_features, parse_discount, parse_sizes,
};
use crate::taxonomy::Taxonomy;
use stylesearch_core::{
    Catalog, NormalizedProduct, PriceRange, PriceThresholds, RawRecord, Result, SearchConfig,
};

/// Result of normalizing a batch of records
#[derive(Debug, Clone)]
pub struct NormalizationReport {
    /// Retained products in source order
    pub catalog: Catalog,
    /// Source row positions of dropped records
    pub dropped: Vec<u64>,
}

impl NormalizationReport {
    /// Number of records examined
    pub fn total(&self) -> usize {
        self.catalog.len() + self.dropped.len()
    }
}

/// Record normalizer bound to a currency rate and price tiers
#[derive(Debug, Clone)]
pub struct Normalizer {
    currency_rate: f64,
    thresholds: PriceThresholds,
    taxonomy: &'static Taxonomy,
}

impl Normalizer {
    /// Normalizer with the built-in taxonomy
    pub fn new(currency_rate: f64, thresholds: PriceThresholds) -> Self {
        Normalizer {
            currency_rate,
            thresholds,
            taxonomy: Taxonomy::builtin(),
        }
    }

    /// Normalizer configured from a [`SearchConfig`]
    pub fn from_config(config: &SearchConfig) -> Self {
        Self::new(config.currency_rate, config.price_thresholds)
    }

    /// Use a custom taxonomy
    pub fn with_taxonomy(mut self, taxonomy: &'static Taxonomy) -> Self {
        self.taxonomy = taxonomy;
        self
    }

    /// Normalize one record. `row` is its source position and becomes the
    /// product id. Returns `None` when no price can be resolved.
    pub fn normalize(&self, row: u64, raw: &RawRecord) -> Option<NormalizedProduct> {
        let mrp = convert_price(raw.mrp.as_deref(), self.currency_rate);
        let sell_price = convert_price(raw.sell_price.as_deref(), self.currency_rate).or(mrp)?;

        let details = raw.details.clone().unwrap_or_default();
        let lowered = details.to_lowercase();
        let brand = raw
            .brand
            .as_deref()
            .map(|b| b.trim().to_lowercase())
            .unwrap_or_default();
        let category = clean_category(raw.category.as_deref());
        let product_types = self.taxonomy.extract(&lowered);
        let features = extract_features(&lowered);
        let sizes = parse_sizes(raw.sizes.as_deref());

        let search_text = std::iter::once(brand.as_str())
            .chain(std::iter::once(lowered.as_str()))
            .chain(std::iter::once(category.as_str()))
            .chain(features.values())
            .chain(product_types.iter().map(String::as_str))
            .filter(|part| !part.trim().is_empty())
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase();

        Some(NormalizedProduct {
            product_id: row,
            title: raw
                .title
                .as_deref()
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(String::from),
            color_family: color_family(&lowered),
            sizes_count: sizes.len(),
            sizes,
            mrp,
            sell_price,
            discount_pct: parse_discount(raw.discount.as_deref()),
            price_range: PriceRange::from_price(Some(sell_price), &self.thresholds),
            details,
            brand,
            category,
            product_types,
            features,
            search_text,
        })
    }

    /// Normalize records in order, collecting dropped row positions.
    ///
    /// # Errors
    ///
    /// Propagates catalog construction failures.
    pub fn normalize_all<I>(&self, records: I) -> Result<NormalizationReport>
    where
        I: IntoIterator<Item = RawRecord>,
    {
        let mut products = Vec::new();
        let mut dropped = Vec::new();

        for (row, raw) in records.into_iter().enumerate() {
            let row = row as u64;
            match self.normalize(row, &raw) {
                Some(product) => products.push(product),
                None => {
                    tracing::debug!(
                        target: "stylesearch::normalize",
                        row,
                        "Dropping record without a usable price"
                    );
                    dropped.push(row);
                }
            }
        }

        let catalog = Catalog::from_products(products)?;
        tracing::info!(
            target: "stylesearch::normalize",
            retained = catalog.len(),
            dropped = dropped.len(),
            "Normalized catalog"
        );

        Ok(NormalizationReport { catalog, dropped })
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::from_config(&SearchConfig::default())
    }
}
