//! Product data model
//!
//! - RawRecord: one catalog row as ingested, every field optional free text
//! - NormalizedProduct: the cleaned, typed view derived from one RawRecord
//! - PriceRange: coarse price tier derived purely from `sell_price`
//! - ColorFamily: fixed colour palette
//! - ProductFeatures: descriptive attributes mined from the details text

use crate::config::PriceThresholds;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// RawRecord
// ============================================================================

/// One catalog row exactly as read from the source spreadsheet.
///
/// Field aliases accept the source column headers (`BrandName`, `Deatils`,
/// `SellPrice`, ...) so rows can be deserialized straight from a reader.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    /// Short product title, when the source has one
    #[serde(default, alias = "Title")]
    pub title: Option<String>,
    /// Free-text product description
    #[serde(default, alias = "Deatils", alias = "Details")]
    pub details: Option<String>,
    /// Raw category string, e.g. `westernwear-women`
    #[serde(default, alias = "Category")]
    pub category: Option<String>,
    /// Raw brand string
    #[serde(default, alias = "BrandName")]
    pub brand: Option<String>,
    /// List price text, possibly currency-prefixed and comma-grouped
    #[serde(default, alias = "MRP")]
    pub mrp: Option<String>,
    /// Selling price text
    #[serde(default, alias = "SellPrice")]
    pub sell_price: Option<String>,
    /// Raw size description, e.g. `Size:Large,Medium`
    #[serde(default, alias = "Sizes")]
    pub sizes: Option<String>,
    /// Raw discount text, e.g. `50% off`
    #[serde(default, alias = "Discount")]
    pub discount: Option<String>,
}

impl RawRecord {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set details text
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Builder: set title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Builder: set raw category
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Builder: set raw brand
    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    /// Builder: set raw list price
    pub fn with_mrp(mut self, mrp: impl Into<String>) -> Self {
        self.mrp = Some(mrp.into());
        self
    }

    /// Builder: set raw selling price
    pub fn with_sell_price(mut self, price: impl Into<String>) -> Self {
        self.sell_price = Some(price.into());
        self
    }

    /// Builder: set raw size text
    pub fn with_sizes(mut self, sizes: impl Into<String>) -> Self {
        self.sizes = Some(sizes.into());
        self
    }

    /// Builder: set raw discount text
    pub fn with_discount(mut self, discount: impl Into<String>) -> Self {
        self.discount = Some(discount.into());
        self
    }
}

// ============================================================================
// PriceRange
// ============================================================================

/// Coarse price tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PriceRange {
    /// Below the budget threshold
    #[serde(rename = "budget")]
    Budget,
    /// Between the budget and mid-range thresholds
    #[serde(rename = "mid-range")]
    MidRange,
    /// Between the mid-range and premium thresholds
    #[serde(rename = "premium")]
    Premium,
    /// At or above the premium threshold
    #[serde(rename = "luxury")]
    Luxury,
    /// No usable price
    #[serde(rename = "unknown")]
    Unknown,
}

impl PriceRange {
    /// All tiers, cheapest first
    pub const ALL: [PriceRange; 5] = [
        PriceRange::Budget,
        PriceRange::MidRange,
        PriceRange::Premium,
        PriceRange::Luxury,
        PriceRange::Unknown,
    ];

    /// Bucket a price. Lower bounds are inclusive: a price equal to a
    /// threshold lands in the tier above it.
    pub fn from_price(price: Option<f64>, thresholds: &PriceThresholds) -> Self {
        match price {
            None => PriceRange::Unknown,
            Some(p) if p.is_nan() => PriceRange::Unknown,
            Some(p) if p < thresholds.budget_below => PriceRange::Budget,
            Some(p) if p < thresholds.mid_range_below => PriceRange::MidRange,
            Some(p) if p < thresholds.premium_below => PriceRange::Premium,
            Some(_) => PriceRange::Luxury,
        }
    }

    /// Canonical label
    pub fn as_str(&self) -> &'static str {
        match self {
            PriceRange::Budget => "budget",
            PriceRange::MidRange => "mid-range",
            PriceRange::Premium => "premium",
            PriceRange::Luxury => "luxury",
            PriceRange::Unknown => "unknown",
        }
    }
}

impl fmt::Display for PriceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PriceRange {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = s.trim().to_lowercase();
        PriceRange::ALL
            .iter()
            .copied()
            .find(|r| r.as_str() == label)
            .ok_or_else(|| crate::Error::invalid_input(format!("unknown price range '{}'", s)))
    }
}

// ============================================================================
// ColorFamily
// ============================================================================

/// Colour family
///
/// Declaration order is the lookup order used by the normalizer: when two
/// families share an alias, the earlier family wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorFamily {
    #[allow(missing_docs)]
    Red,
    #[allow(missing_docs)]
    Blue,
    #[allow(missing_docs)]
    Green,
    #[allow(missing_docs)]
    Black,
    #[allow(missing_docs)]
    White,
    #[allow(missing_docs)]
    Yellow,
    #[allow(missing_docs)]
    Pink,
    #[allow(missing_docs)]
    Purple,
    #[allow(missing_docs)]
    Orange,
    #[allow(missing_docs)]
    Brown,
    #[allow(missing_docs)]
    Grey,
    #[allow(missing_docs)]
    Beige,
    /// Multi-coloured prints and mixes
    Multi,
    /// Gold, silver, bronze and other metallic finishes
    Metallic,
}

impl ColorFamily {
    /// Canonical label
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorFamily::Red => "red",
            ColorFamily::Blue => "blue",
            ColorFamily::Green => "green",
            ColorFamily::Black => "black",
            ColorFamily::White => "white",
            ColorFamily::Yellow => "yellow",
            ColorFamily::Pink => "pink",
            ColorFamily::Purple => "purple",
            ColorFamily::Orange => "orange",
            ColorFamily::Brown => "brown",
            ColorFamily::Grey => "grey",
            ColorFamily::Beige => "beige",
            ColorFamily::Multi => "multi",
            ColorFamily::Metallic => "metallic",
        }
    }
}

impl fmt::Display for ColorFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// ProductFeatures
// ============================================================================

/// Descriptive attributes mined from the details text. Each is the first
/// vocabulary entry found, or `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductFeatures {
    /// Fabric, e.g. `cotton`
    pub material: Option<String>,
    /// Fit, e.g. `slim fit`
    pub fit: Option<String>,
    /// Neckline, e.g. `v-neck`
    pub neck_type: Option<String>,
    /// Print or pattern, e.g. `floral`
    pub pattern: Option<String>,
}

impl ProductFeatures {
    /// Present features in fixed order (material, fit, neck, pattern)
    pub fn values(&self) -> impl Iterator<Item = &str> {
        [&self.material, &self.fit, &self.neck_type, &self.pattern]
            .into_iter()
            .filter_map(|f| f.as_deref())
    }
}

// ============================================================================
// NormalizedProduct
// ============================================================================

/// Cleaned product, one-to-one with a retained [`RawRecord`].
///
/// `product_id` is the source row position and is never renumbered, so ids
/// of a catalog with dropped rows have gaps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedProduct {
    /// Stable id (source row position)
    pub product_id: u64,
    /// Title carried through from the source
    pub title: Option<String>,
    /// Raw details text
    pub details: String,
    /// Lower-cased, trimmed brand
    pub brand: String,
    /// Title-cased canonical category
    pub category: String,
    /// Canonical taxonomy labels in discovery order
    pub product_types: Vec<String>,
    /// Colour family, `None` when no alias matched
    pub color_family: Option<ColorFamily>,
    /// Deduplicated, sorted canonical size tokens
    pub sizes: Vec<String>,
    /// Number of entries in `sizes`
    pub sizes_count: usize,
    /// Converted list price
    pub mrp: Option<f64>,
    /// Converted selling price, backfilled from `mrp`
    pub sell_price: f64,
    /// Discount percentage
    pub discount_pct: Option<f64>,
    /// Tier derived from `sell_price`
    pub price_range: PriceRange,
    /// Descriptive attributes
    #[serde(default)]
    pub features: ProductFeatures,
    /// Lower-cased text fed to the term index
    pub search_text: String,
}

impl NormalizedProduct {
    /// Material, when one was extracted
    pub fn material(&self) -> Option<&str> {
        self.features.material.as_deref()
    }
}
