//! Keyword-driven filter inference for free-text queries
//!
//! Each table is scanned in order against the lower-cased query; the first
//! keyword found as a substring decides that table's filter.

use crate::filter::ProductFilter;
use stylesearch_core::PriceRange;

/// Keyword → category filter
pub const CATEGORY_KEYWORDS: &[(&str, &str)] = &[
    ("dress", "Western Wear"),
    ("western", "Western Wear"),
    ("indian", "Indian Wear"),
    ("ethnic", "Indian Wear"),
    ("lingerie", "Lingerie & Nightwear"),
    ("nightwear", "Lingerie & Nightwear"),
    ("shoes", "Footwear"),
    ("footwear", "Footwear"),
    ("boots", "Footwear"),
    ("sandals", "Footwear"),
    ("watch", "Watches"),
    ("jewelry", "Jewellery"),
    ("jewellery", "Jewellery"),
    ("perfume", "Fragrance"),
    ("fragrance", "Fragrance"),
];

/// Keyword → price tier filter
pub const PRICE_KEYWORDS: &[(&str, PriceRange)] = &[
    ("cheap", PriceRange::Budget),
    ("budget", PriceRange::Budget),
    ("affordable", PriceRange::Budget),
    ("premium", PriceRange::Luxury),
    ("expensive", PriceRange::Luxury),
    ("luxury", PriceRange::Luxury),
    ("mid", PriceRange::MidRange),
];

/// Materials recognized in a query
pub const MATERIAL_KEYWORDS: &[&str] = &["cotton", "silk", "denim", "wool", "polyester", "linen"];

/// Filters inferred from a query
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchIntent {
    /// Category label to filter on
    pub category: Option<&'static str>,
    /// Price tier to filter on
    pub price_range: Option<PriceRange>,
    /// Material to filter on
    pub material: Option<&'static str>,
}

impl SearchIntent {
    /// Scan `query` against the keyword tables
    pub fn from_query(query: &str) -> Self {
        let lowered = query.to_lowercase();
        SearchIntent {
            category: CATEGORY_KEYWORDS
                .iter()
                .find(|(k, _)| lowered.contains(k))
                .map(|(_, v)| *v),
            price_range: PRICE_KEYWORDS
                .iter()
                .find(|(k, _)| lowered.contains(k))
                .map(|(_, v)| *v),
            material: MATERIAL_KEYWORDS
                .iter()
                .find(|k| lowered.contains(*k))
                .copied(),
        }
    }

    /// Equivalent product filter
    pub fn to_filter(&self) -> ProductFilter {
        ProductFilter {
            category: self.category.map(String::from),
            price_range: self.price_range,
            material: self.material.map(String::from),
            ..ProductFilter::default()
        }
    }
}
