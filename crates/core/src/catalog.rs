//! Normalized catalog
//!
//! An ordered, immutable set of [`NormalizedProduct`]s with id lookup. Row
//! order is the order products were normalized in; every ranking in the
//! workspace breaks ties by this order.

use crate::product::{NormalizedProduct, PriceRange};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};

/// Ordered product catalog keyed by `product_id`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<NormalizedProduct>", into = "Vec<NormalizedProduct>")]
pub struct Catalog {
    products: Vec<NormalizedProduct>,
    positions: HashMap<u64, usize>,
}

impl Catalog {
    /// Build a catalog from products in row order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if two products share an id.
    pub fn from_products(products: Vec<NormalizedProduct>) -> Result<Self> {
        let mut positions = HashMap::with_capacity(products.len());
        for (row, product) in products.iter().enumerate() {
            if positions.insert(product.product_id, row).is_some() {
                return Err(Error::invalid_input(format!(
                    "duplicate product_id {}",
                    product.product_id
                )));
            }
        }
        Ok(Catalog {
            products,
            positions,
        })
    }

    /// Number of products
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// True when the catalog holds no products
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Products in row order
    pub fn products(&self) -> &[NormalizedProduct] {
        &self.products
    }

    /// Product at a row position
    pub fn row(&self, row: usize) -> Option<&NormalizedProduct> {
        self.products.get(row)
    }

    /// Row position of a product id
    pub fn position(&self, product_id: u64) -> Option<usize> {
        self.positions.get(&product_id).copied()
    }

    /// Lookup by id
    pub fn get(&self, product_id: u64) -> Option<&NormalizedProduct> {
        self.position(product_id).map(|row| &self.products[row])
    }

    /// Lookup by id, failing with [`Error::ProductNotFound`]
    pub fn require(&self, product_id: u64) -> Result<&NormalizedProduct> {
        self.get(product_id)
            .ok_or(Error::ProductNotFound(product_id))
    }

    /// Distinct categories in first-seen order
    pub fn categories(&self) -> Vec<String> {
        distinct(self.products.iter().map(|p| p.category.as_str()))
    }

    /// Distinct brands in first-seen order
    pub fn brands(&self) -> Vec<String> {
        distinct(self.products.iter().map(|p| p.brand.as_str()))
    }

    /// Number of products per price tier. Tiers with no products are absent.
    pub fn price_range_counts(&self) -> BTreeMap<PriceRange, usize> {
        let mut counts = BTreeMap::new();
        for p in &self.products {
            *counts.entry(p.price_range).or_insert(0) += 1;
        }
        counts
    }

    /// Aggregate statistics over the catalog
    pub fn summary(&self) -> CatalogSummary {
        let mut categories = BTreeMap::new();
        let mut materials = BTreeMap::new();
        let mut product_types = BTreeMap::new();
        for p in &self.products {
            *categories.entry(p.category.clone()).or_insert(0) += 1;
            if let Some(m) = p.material() {
                *materials.entry(m.to_string()).or_insert(0) += 1;
            }
            for t in &p.product_types {
                *product_types.entry(t.clone()).or_insert(0) += 1;
            }
        }

        let unique_brands = self
            .products
            .iter()
            .map(|p| p.brand.as_str())
            .collect::<HashSet<_>>()
            .len();

        CatalogSummary {
            total_products: self.products.len(),
            unique_brands,
            categories,
            price_ranges: self.price_range_counts(),
            materials,
            product_types,
            price_stats: PriceStats::from_prices(self.products.iter().map(|p| p.sell_price)),
        }
    }
}

impl TryFrom<Vec<NormalizedProduct>> for Catalog {
    type Error = Error;

    fn try_from(products: Vec<NormalizedProduct>) -> Result<Self> {
        Catalog::from_products(products)
    }
}

impl From<Catalog> for Vec<NormalizedProduct> {
    fn from(catalog: Catalog) -> Self {
        catalog.products
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .filter(|v| seen.insert(*v))
        .map(String::from)
        .collect()
}

// ============================================================================
// Summary
// ============================================================================

/// Catalog-wide statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogSummary {
    /// Number of products
    pub total_products: usize,
    /// Number of distinct brands
    pub unique_brands: usize,
    /// Products per category
    pub categories: BTreeMap<String, usize>,
    /// Products per price tier
    pub price_ranges: BTreeMap<PriceRange, usize>,
    /// Products per extracted material
    pub materials: BTreeMap<String, usize>,
    /// Products per taxonomy label (a product counts once per label)
    pub product_types: BTreeMap<String, usize>,
    /// Sell price statistics, `None` for an empty catalog
    pub price_stats: Option<PriceStats>,
}

/// Min/max/mean/median of sell prices
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceStats {
    #[allow(missing_docs)]
    pub min: f64,
    #[allow(missing_docs)]
    pub max: f64,
    #[allow(missing_docs)]
    pub mean: f64,
    #[allow(missing_docs)]
    pub median: f64,
}

impl PriceStats {
    fn from_prices(prices: impl Iterator<Item = f64>) -> Option<Self> {
        let mut sorted: Vec<f64> = prices.filter(|p| !p.is_nan()).collect();
        if sorted.is_empty() {
            return None;
        }
        sorted.sort_by(|a, b| a.total_cmp(b));
        let n = sorted.len();
        let median = if n % 2 == 1 {
            sorted[n / 2]
        } else {
            (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
        };
        Some(PriceStats {
            min: sorted[0],
            max: sorted[n - 1],
            mean: sorted.iter().sum::<f64>() / n as f64,
            median,
        })
    }
}
