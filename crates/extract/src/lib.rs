//! Attribute extraction for stylesearch
//!
//! Turns raw catalog rows into normalized products:
//! - `taxonomy`: free text → canonical product-type labels
//! - `rules`: label-set disambiguation patches
//! - `attributes`: price, discount, category, size, colour and feature cleaners
//! - `normalizer`: per-record pipeline and batch report

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod attributes;
pub mod normalizer;
pub mod rules;
pub mod taxonomy;

pub use attributes::normalize_size_query;
pub use normalizer::{NormalizationReport, Normalizer};
pub use taxonomy::{extract_product_types, Taxonomy};
