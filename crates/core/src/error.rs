//! Error types for stylesearch
//!
//! Every fallible operation in the workspace returns [`Result`]. The variants
//! separate caller mistakes (using the engine before it is ready, asking for
//! an unknown product) from data problems (a corrupt bundle, an unsupported
//! export format). We use `thiserror` for `Display` and `Error`.

use std::io;
use thiserror::Error;

/// Result type alias for stylesearch operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for catalog normalization, indexing and search
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error while reading or writing a bundle, export or config file
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Operation attempted before the index or engine was built
    #[error("Not ready: {0}")]
    NotReady(String),

    /// No product with the requested id exists in the catalog
    #[error("Product not found: {0}")]
    ProductNotFound(u64),

    /// Persisted bundle is damaged or incomplete
    #[error("Bundle corruption: {0}")]
    Corruption(String),

    /// Export target has an extension we cannot write
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Invalid configuration or argument
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    /// Build a [`Error::NotReady`] naming the component that was not ready
    pub fn not_ready(what: impl Into<String>) -> Self {
        Error::NotReady(what.into())
    }

    /// Build a [`Error::Corruption`]
    pub fn corruption(msg: impl Into<String>) -> Self {
        Error::Corruption(msg.into())
    }

    /// Build a [`Error::InvalidInput`]
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Error::InvalidInput(msg.into())
    }

    /// True for precondition failures (engine/index not built yet)
    pub fn is_not_ready(&self) -> bool {
        matches!(self, Error::NotReady(_))
    }

    /// True when a product lookup missed
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::ProductNotFound(_))
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
