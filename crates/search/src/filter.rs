//! Attribute filters and the trending heuristic
//!
//! A [`ProductFilter`] is a conjunction of optional predicates. An unset
//! predicate always passes, so `ProductFilter::default()` keeps every row.

use serde::{Deserialize, Serialize};
use stylesearch_core::{Catalog, NormalizedProduct, PriceRange, TrendingConfig};
use stylesearch_extract::normalize_size_query;

/// Conjunctive product filter
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductFilter {
    /// Case-insensitive substring of the category
    pub category: Option<String>,
    /// Case-insensitive substring of the brand
    pub brand: Option<String>,
    /// Inclusive lower bound on `sell_price`
    pub min_price: Option<f64>,
    /// Inclusive upper bound on `sell_price`
    pub max_price: Option<f64>,
    /// Case-insensitive substring of the extracted material
    pub material: Option<String>,
    /// Size that must be offered, compared after canonicalization
    pub size: Option<String>,
    /// Exact price tier
    pub price_range: Option<PriceRange>,
}

impl ProductFilter {
    /// Filter that keeps everything
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: category substring
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Builder: brand substring
    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    /// Builder: minimum price
    pub fn with_min_price(mut self, price: f64) -> Self {
        self.min_price = Some(price);
        self
    }

    /// Builder: maximum price
    pub fn with_max_price(mut self, price: f64) -> Self {
        self.max_price = Some(price);
        self
    }

    /// Builder: material substring
    pub fn with_material(mut self, material: impl Into<String>) -> Self {
        self.material = Some(material.into());
        self
    }

    /// Builder: size
    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.size = Some(size.into());
        self
    }

    /// Builder: price tier
    pub fn with_price_range(mut self, range: PriceRange) -> Self {
        self.price_range = Some(range);
        self
    }

    /// True when no predicate is set
    pub fn is_empty(&self) -> bool {
        self == &ProductFilter::default()
    }

    /// Evaluate every set predicate against one product
    pub fn matches(&self, product: &NormalizedProduct) -> bool {
        let compiled = CompiledFilter::new(self);
        compiled.matches(product)
    }

    /// Row positions of matching products, in catalog order
    pub fn apply(&self, catalog: &Catalog) -> Vec<usize> {
        let compiled = CompiledFilter::new(self);
        catalog
            .products()
            .iter()
            .enumerate()
            .filter(|(_, p)| compiled.matches(p))
            .map(|(row, _)| row)
            .collect()
    }
}

/// Filter with its needles lower-cased once
struct CompiledFilter<'f> {
    filter: &'f ProductFilter,
    category: Option<String>,
    brand: Option<String>,
    material: Option<String>,
    size: Option<String>,
}

impl<'f> CompiledFilter<'f> {
    fn new(filter: &'f ProductFilter) -> Self {
        let lower = |v: &Option<String>| v.as_deref().map(str::to_lowercase);
        CompiledFilter {
            filter,
            category: lower(&filter.category),
            brand: lower(&filter.brand),
            material: lower(&filter.material),
            size: filter.size.as_deref().map(normalize_size_query),
        }
    }

    fn matches(&self, p: &NormalizedProduct) -> bool {
        if let Some(needle) = &self.category {
            if !p.category.to_lowercase().contains(needle.as_str()) {
                return false;
            }
        }
        if let Some(needle) = &self.brand {
            if !p.brand.to_lowercase().contains(needle.as_str()) {
                return false;
            }
        }
        if let Some(min) = self.filter.min_price {
            if p.sell_price < min {
                return false;
            }
        }
        if let Some(max) = self.filter.max_price {
            if p.sell_price > max {
                return false;
            }
        }
        if let Some(needle) = &self.material {
            match p.material() {
                Some(m) if m.to_lowercase().contains(needle.as_str()) => {}
                _ => return false,
            }
        }
        if let Some(size) = &self.size {
            if !p.sizes.iter().any(|s| s.eq_ignore_ascii_case(size)) {
                return false;
            }
        }
        if let Some(range) = self.filter.price_range {
            if p.price_range != range {
                return false;
            }
        }
        true
    }
}

// ============================================================================
// Trending
// ============================================================================

/// Trending score of one product
pub fn trending_score(product: &NormalizedProduct, config: &TrendingConfig) -> f64 {
    let discount = product.discount_pct.unwrap_or(0.0);
    let divisor = product.sell_price.max(config.price_floor);
    config.discount_weight * discount + config.price_weight * (config.reference_price / divisor)
}

/// The `limit` highest trending scores as `(row, score)`, ties by row order
pub fn trending(catalog: &Catalog, config: &TrendingConfig, limit: usize) -> Vec<(usize, f64)> {
    let mut scored: Vec<(usize, f64)> = catalog
        .products()
        .iter()
        .enumerate()
        .map(|(row, p)| (row, trending_score(p, config)))
        .collect();
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));
    scored.truncate(limit);
    scored
}
