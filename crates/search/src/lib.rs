//! Search and recommendation over a normalized catalog
//!
//! This crate provides:
//! - Tokenizer and term-weighted index (cosine similarity over tf-idf rows)
//! - Hybrid recommender (text, price and category similarity)
//! - Attribute filters and the trending heuristic
//! - Keyword intent tables for smart search
//! - Index bundle persistence and catalog export
//! - SearchEngine facade tying the pieces together
//!
//! # Usage
//!
//! ```ignore
//! use stylesearch_search::{ProductFilter, SearchEngine};
//!
//! let mut engine = SearchEngine::default();
//! engine.initialize_from_records(records)?;
//! let hits = engine.search("red kurta", &ProductFilter::new(), 10)?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bundle;
pub mod engine;
pub mod export;
pub mod filter;
pub mod recommender;
pub mod smart;
pub mod term_index;
pub mod tokenizer;

// Re-export commonly used types
pub use bundle::{load_bundle, save_bundle, IndexBundle, BUNDLE_FILE_NAME};
pub use engine::{SearchEngine, SearchHit, TrendingHit};
pub use export::{export_catalog, ExportFormat};
pub use filter::{trending, trending_score, ProductFilter};
pub use recommender::{Recommendation, Recommender};
pub use smart::SearchIntent;
pub use term_index::{SparseVector, TermIndex, TermMatrix, Vocabulary};
pub use tokenizer::{analyze, tokenize};
