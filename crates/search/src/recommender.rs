//! Hybrid "similar items" recommender
//!
//! `score = w_text * text + w_price * price + w_category * category` where
//! - text: cosine similarity of the term-index rows
//! - price: `1 - |p_i - p_ref| / max_j |p_j - p_ref|`, or 1 when every
//!   price equals the reference
//! - category: 1 for an exact category match, else 0
//!
//! The reference product never appears in its own recommendations.

use crate::term_index::TermIndex;
use stylesearch_core::{Catalog, Error, FeatureWeights, NormalizedProduct, Result};

/// One recommended product with its score breakdown
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation<'a> {
    /// Recommended product
    pub product: &'a NormalizedProduct,
    /// Weighted combined score
    pub score: f32,
    /// Cosine similarity of descriptions
    pub text_similarity: f32,
    /// Price proximity in `[0, 1]`
    pub price_similarity: f32,
    /// 1.0 on a category match
    pub category_similarity: f32,
}

/// Recommender over a catalog and its term index
pub struct Recommender<'a> {
    catalog: &'a Catalog,
    index: &'a TermIndex,
    weights: FeatureWeights,
}

impl<'a> Recommender<'a> {
    /// Recommender over `catalog`, whose rows must line up with `index`
    pub fn new(catalog: &'a Catalog, index: &'a TermIndex, weights: FeatureWeights) -> Self {
        Recommender {
            catalog,
            index,
            weights,
        }
    }

    /// The `top_k` products most similar to `product_id`, best first, ties
    /// by row order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ProductNotFound`] for an unknown id.
    pub fn similar(&self, product_id: u64, top_k: usize) -> Result<Vec<Recommendation<'a>>> {
        let reference_row = self
            .catalog
            .position(product_id)
            .ok_or(Error::ProductNotFound(product_id))?;
        let reference = &self.catalog.products()[reference_row];

        let text = self
            .index
            .row_similarities(reference_row)
            .ok_or_else(|| Error::corruption("term index does not cover the catalog"))?;
        let price = price_similarities(self.catalog.products(), reference.sell_price);

        let catalog: &'a Catalog = self.catalog;
        let mut scored: Vec<Recommendation<'a>> = catalog
            .products()
            .iter()
            .enumerate()
            .filter(|(row, _)| *row != reference_row)
            .map(|(row, product)| {
                let text_similarity = text[row];
                let price_similarity = price[row];
                let category_similarity = if product.category == reference.category {
                    1.0
                } else {
                    0.0
                };
                Recommendation {
                    product,
                    score: self.weights.text * text_similarity
                        + self.weights.price * price_similarity
                        + self.weights.category * category_similarity,
                    text_similarity,
                    price_similarity,
                    category_similarity,
                }
            })
            .collect();

        scored.sort_by(|a, b| b.score.total_cmp(&a.score));
        scored.truncate(top_k);
        Ok(scored)
    }
}

/// Price proximity of every product to `reference`
fn price_similarities(products: &[NormalizedProduct], reference: f64) -> Vec<f32> {
    let max_delta = products
        .iter()
        .map(|p| (p.sell_price - reference).abs())
        .fold(0.0f64, f64::max);
    products
        .iter()
        .map(|p| {
            if max_delta > 0.0 {
                (1.0 - (p.sell_price - reference).abs() / max_delta) as f32
            } else {
                1.0
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use stylesearch_core::{IndexConfig, PriceRange, ProductFeatures};

    fn product(id: u64, category: &str, price: f64, text: &str) -> NormalizedProduct {
        NormalizedProduct {
            product_id: id,
            title: None,
            details: text.to_string(),
            brand: "brand".to_string(),
            category: category.to_string(),
            product_types: vec![],
            color_family: None,
            sizes: vec![],
            sizes_count: 0,
            mrp: None,
            sell_price: price,
            discount_pct: None,
            price_range: PriceRange::from_price(Some(price), &Default::default()),
            features: ProductFeatures::default(),
            search_text: text.to_string(),
        }
    }

    fn fixture() -> (Catalog, TermIndex) {
        let catalog = Catalog::from_products(vec![
            product(10, "Indian Wear", 20.0, "red silk saree"),
            product(11, "Indian Wear", 22.0, "red cotton saree"),
            product(12, "Western Wear", 20.0, "blue denim jeans"),
            product(13, "Indian Wear", 60.0, "green silk kurta"),
        ])
        .unwrap();
        let texts: Vec<&str> = catalog.products().iter().map(|p| p.search_text.as_str()).collect();
        let config = IndexConfig {
            min_df: 1,
            max_df: 1.0,
            ..IndexConfig::default()
        };
        let index = TermIndex::build(&texts, &config);
        (catalog, index)
    }

    #[test]
    fn test_excludes_reference() {
        let (catalog, index) = fixture();
        let rec = Recommender::new(&catalog, &index, FeatureWeights::default());
        let out = rec.similar(10, 10).unwrap();
        assert_eq!(out.len(), 3);
        assert!(out.iter().all(|r| r.product.product_id != 10));
    }

    #[test]
    fn test_ranking_and_breakdown() {
        let (catalog, index) = fixture();
        let rec = Recommender::new(&catalog, &index, FeatureWeights::default());
        let out = rec.similar(10, 2).unwrap();
        assert_eq!(out[0].product.product_id, 11);
        assert_eq!(out[0].category_similarity, 1.0);
        assert!(out[0].text_similarity > 0.0);

        let expected = 0.6 * out[0].text_similarity
            + 0.2 * out[0].price_similarity
            + 0.2 * out[0].category_similarity;
        assert!((out[0].score - expected).abs() < 1e-6);
        assert!(out[0].score >= out[1].score);
    }

    #[test]
    fn test_price_similarity_scale() {
        let (catalog, _) = fixture();
        let sims = price_similarities(catalog.products(), 20.0);
        // max delta is 40 (row 3)
        assert_eq!(sims[0], 1.0);
        assert!((sims[1] - 0.95).abs() < 1e-6);
        assert_eq!(sims[2], 1.0);
        assert_eq!(sims[3], 0.0);
    }

    #[test]
    fn test_identical_prices_all_one() {
        let products = vec![
            product(0, "X", 9.0, "a"),
            product(1, "X", 9.0, "b"),
        ];
        assert_eq!(price_similarities(&products, 9.0), vec![1.0, 1.0]);
    }

    #[test]
    fn test_unknown_product() {
        let (catalog, index) = fixture();
        let rec = Recommender::new(&catalog, &index, FeatureWeights::default());
        assert!(matches!(rec.similar(99, 5), Err(Error::ProductNotFound(99))));
    }

    #[test]
    fn test_weights_are_applied_unnormalized() {
        let (catalog, index) = fixture();
        let weights = FeatureWeights {
            text: 0.0,
            price: 0.0,
            category: 2.0,
        };
        let rec = Recommender::new(&catalog, &index, weights);
        let out = rec.similar(12, 3).unwrap();
        // no other Western Wear row; everything scores 0, row order kept
        assert!(out.iter().all(|r| r.score == 0.0));
        assert_eq!(
            out.iter().map(|r| r.product.product_id).collect::<Vec<_>>(),
            vec![10, 11, 13]
        );

        let out = rec.similar(10, 1).unwrap();
        assert_eq!(out[0].score, 2.0);
    }

    const TEXTS: &[&str] = &["red silk saree", "blue denim jeans", "red kurta", "black heels"];
    const CATEGORIES: &[&str] = &["Indian Wear", "Western Wear", "Footwear"];

    proptest! {
        #[test]
        fn reference_is_never_recommended(
            rows in prop::collection::vec(
                (0usize..TEXTS.len(), 0usize..CATEGORIES.len(), 1.0f64..100.0),
                1..10,
            ),
            top_k in 0usize..12,
        ) {
            let products: Vec<NormalizedProduct> = rows
                .iter()
                .enumerate()
                .map(|(id, &(t, c, price))| product(id as u64, CATEGORIES[c], price, TEXTS[t]))
                .collect();
            let catalog = Catalog::from_products(products).unwrap();
            let texts: Vec<&str> = catalog.products().iter().map(|p| p.search_text.as_str()).collect();
            let index = TermIndex::build(&texts, &IndexConfig::default());
            let rec = Recommender::new(&catalog, &index, FeatureWeights::default());

            for reference in catalog.products() {
                let out = rec.similar(reference.product_id, top_k).unwrap();
                prop_assert_eq!(out.len(), top_k.min(catalog.len() - 1));
                prop_assert!(out.iter().all(|r| r.product.product_id != reference.product_id));
            }
        }
    }
}
