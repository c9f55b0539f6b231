//! Search engine facade
//!
//! `SearchEngine` starts uninitialized and becomes ready once a catalog is
//! built or a bundle is loaded. Every query before that returns
//! [`Error::NotReady`]. Rebuilding replaces the whole ready state.

use crate::bundle::{self, IndexBundle};
use crate::export::{export_catalog, ExportFormat};
use crate::filter::{trending, ProductFilter};
use crate::recommender::{Recommendation, Recommender};
use crate::smart::SearchIntent;
use crate::term_index::TermIndex;
use std::collections::BTreeMap;
use std::path::Path;
use stylesearch_core::{
    Catalog, CatalogSummary, Error, NormalizedProduct, PriceRange, RawRecord, Result, SearchConfig,
};
use stylesearch_extract::Normalizer;

/// One search result
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit<'a> {
    /// Matching product
    pub product: &'a NormalizedProduct,
    /// Cosine similarity to the query; `None` for filter-only searches
    pub score: Option<f32>,
}

/// One trending result
#[derive(Debug, Clone, PartialEq)]
pub struct TrendingHit<'a> {
    /// Product
    pub product: &'a NormalizedProduct,
    /// Trending score
    pub score: f64,
}

struct ReadyState {
    bundle: IndexBundle,
}

/// Facade over the catalog, term index, recommender and filters
pub struct SearchEngine {
    config: SearchConfig,
    state: Option<ReadyState>,
}

impl SearchEngine {
    /// Uninitialized engine
    pub fn new(config: SearchConfig) -> Self {
        SearchEngine {
            config,
            state: None,
        }
    }

    /// Active configuration
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// True once a catalog has been built or loaded
    pub fn is_ready(&self) -> bool {
        self.state.is_some()
    }

    fn ready(&self) -> Result<&IndexBundle> {
        self.state
            .as_ref()
            .map(|s| &s.bundle)
            .ok_or_else(|| Error::not_ready("search engine has no catalog; build or load one first"))
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// Normalize raw records, build the index and become ready. Returns the
    /// source row positions of dropped records.
    pub fn initialize_from_records<I>(&mut self, records: I) -> Result<Vec<u64>>
    where
        I: IntoIterator<Item = RawRecord>,
    {
        self.config.validate()?;
        let report = Normalizer::from_config(&self.config).normalize_all(records)?;
        self.initialize_from_catalog(report.catalog)?;
        Ok(report.dropped)
    }

    /// Build the index over an already normalized catalog and become ready
    pub fn initialize_from_catalog(&mut self, catalog: Catalog) -> Result<()> {
        self.config.validate()?;
        let texts: Vec<&str> = catalog
            .products()
            .iter()
            .map(|p| p.search_text.as_str())
            .collect();
        let index = TermIndex::build(&texts, &self.config.index);

        tracing::info!(
            target: "stylesearch::engine",
            products = catalog.len(),
            vocabulary = index.vocabulary().len(),
            "Search engine ready"
        );

        self.state = Some(ReadyState {
            bundle: IndexBundle {
                catalog,
                index,
                weights: self.config.weights,
            },
        });
        Ok(())
    }

    /// Load a persisted bundle and become ready. Weights stored in the
    /// bundle replace the configured ones.
    ///
    /// On failure the engine keeps its previous state.
    pub fn load_bundle(&mut self, path: &Path) -> Result<()> {
        let bundle = bundle::load_bundle(path)?;
        self.config.weights = bundle.weights;
        self.state = Some(ReadyState { bundle });
        Ok(())
    }

    /// Persist the current bundle
    pub fn save_bundle(&self, path: &Path) -> Result<()> {
        bundle::save_bundle(path, self.ready()?)
    }

    /// Normalized catalog
    pub fn catalog(&self) -> Result<&Catalog> {
        Ok(&self.ready()?.catalog)
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Filter, then rank the survivors against `query`.
    ///
    /// A blank query returns the first `top_k` filtered products in catalog
    /// order. Otherwise only filtered rows are scored, using the vocabulary
    /// fitted on the whole catalog, and rows with zero similarity are left
    /// out.
    pub fn search(
        &self,
        query: &str,
        filter: &ProductFilter,
        top_k: usize,
    ) -> Result<Vec<SearchHit<'_>>> {
        let bundle = self.ready()?;
        let products = bundle.catalog.products();
        let rows = filter.apply(&bundle.catalog);

        let hits = if query.trim().is_empty() {
            rows.into_iter()
                .take(top_k)
                .map(|row| SearchHit {
                    product: &products[row],
                    score: None,
                })
                .collect()
        } else {
            bundle
                .index
                .query_rows(query, &rows, top_k)
                .into_iter()
                .map(|(row, score)| SearchHit {
                    product: &products[row],
                    score: Some(score),
                })
                .collect()
        };
        Ok(hits)
    }

    /// Search with category, price tier and material inferred from the query
    pub fn smart_search(&self, query: &str, top_k: usize) -> Result<Vec<SearchHit<'_>>> {
        let intent = SearchIntent::from_query(query);
        tracing::debug!(
            target: "stylesearch::engine",
            category = ?intent.category,
            price_range = ?intent.price_range,
            material = ?intent.material,
            "Inferred search filters"
        );
        self.search(query, &intent.to_filter(), top_k)
    }

    /// Products similar to `product_id`
    pub fn recommend(&self, product_id: u64, top_k: usize) -> Result<Vec<Recommendation<'_>>> {
        let bundle = self.ready()?;
        Recommender::new(&bundle.catalog, &bundle.index, bundle.weights).similar(product_id, top_k)
    }

    /// Highest trending scores
    pub fn trending(&self, limit: usize) -> Result<Vec<TrendingHit<'_>>> {
        let bundle = self.ready()?;
        let products = bundle.catalog.products();
        Ok(trending(&bundle.catalog, &self.config.trending, limit)
            .into_iter()
            .map(|(row, score)| TrendingHit {
                product: &products[row],
                score,
            })
            .collect())
    }

    /// First `limit` products whose category contains `category`
    pub fn browse_by_category(&self, category: &str, limit: usize) -> Result<Vec<&NormalizedProduct>> {
        let bundle = self.ready()?;
        let products = bundle.catalog.products();
        Ok(ProductFilter::new()
            .with_category(category)
            .apply(&bundle.catalog)
            .into_iter()
            .take(limit)
            .map(|row| &products[row])
            .collect())
    }

    /// Distinct categories, first-seen order
    pub fn categories(&self) -> Result<Vec<String>> {
        Ok(self.ready()?.catalog.categories())
    }

    /// Distinct brands, first-seen order
    pub fn brands(&self) -> Result<Vec<String>> {
        Ok(self.ready()?.catalog.brands())
    }

    /// Products per price tier
    pub fn price_range_counts(&self) -> Result<BTreeMap<PriceRange, usize>> {
        Ok(self.ready()?.catalog.price_range_counts())
    }

    /// One product by id
    pub fn product_details(&self, product_id: u64) -> Result<&NormalizedProduct> {
        self.ready()?.catalog.require(product_id)
    }

    /// Catalog statistics
    pub fn data_summary(&self) -> Result<CatalogSummary> {
        Ok(self.ready()?.catalog.summary())
    }

    /// Export the catalog as CSV or JSON, chosen by extension
    pub fn export_catalog(&self, path: &Path) -> Result<ExportFormat> {
        let bundle = self.ready()?;
        let format = export_catalog(&bundle.catalog, path)?;
        tracing::info!(
            target: "stylesearch::engine",
            path = %path.display(),
            format = ?format,
            products = bundle.catalog.len(),
            "Exported catalog"
        );
        Ok(format)
    }
}

impl Default for SearchEngine {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}
