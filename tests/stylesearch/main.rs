//! Stylesearch integration tests
//!
//! Cross-crate behaviour exercised through the public facade:
//! - facade: lifecycle, search, filters, recommendations, catalog views
//! - persistence: bundle round-trips, corruption, export
//! - properties: ranking and normalization invariants

#[path = "../common/mod.rs"]
mod common;

mod facade;
mod persistence;
mod properties;
