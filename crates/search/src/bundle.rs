//! Index bundle persistence
//!
//! A bundle file holds everything needed to answer queries without
//! re-normalizing raw data:
//! - catalog (normalized products in row order)
//! - term matrix
//! - vocabulary and idf state
//! - recommender feature weights
//!
//! Layout: `magic (4) | version (u32 LE) | xxh3 of payload (u64 LE) |
//! MessagePack payload`. The payload is encoded with field names and every
//! part is optional on the wire, so a blob missing a part decodes and is
//! then rejected by name.
//!
//! Written atomically via temp + fsync + rename.

use crate::term_index::{TermIndex, TermMatrix, Vocabulary};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;
use stylesearch_core::{Catalog, Error, FeatureWeights, Result};
use xxhash_rust::xxh3::xxh3_64;

/// Magic bytes for bundle files
const BUNDLE_MAGIC: &[u8; 4] = b"SSBN";
/// Current bundle version
const BUNDLE_VERSION: u32 = 1;
/// Magic + version + checksum
const HEADER_LEN: usize = 16;
/// Conventional bundle file name
pub const BUNDLE_FILE_NAME: &str = "stylesearch.bundle";

/// Built catalog, term index and weights
#[derive(Debug, Clone, PartialEq)]
pub struct IndexBundle {
    /// Normalized products
    pub catalog: Catalog,
    /// Term index over the catalog's search text
    pub index: TermIndex,
    /// Recommender weights
    pub weights: FeatureWeights,
}

#[derive(Serialize)]
struct BundleOut<'a> {
    catalog: &'a Catalog,
    vocabulary: &'a Vocabulary,
    matrix: &'a TermMatrix,
    weights: &'a FeatureWeights,
}

#[derive(Deserialize)]
struct BundleIn {
    #[serde(default)]
    catalog: Option<Catalog>,
    #[serde(default)]
    vocabulary: Option<Vocabulary>,
    #[serde(default)]
    matrix: Option<TermMatrix>,
    #[serde(default)]
    weights: Option<FeatureWeights>,
}

/// Encode a bundle to bytes
pub fn encode(bundle: &IndexBundle) -> Result<Vec<u8>> {
    let out = BundleOut {
        catalog: &bundle.catalog,
        vocabulary: bundle.index.vocabulary(),
        matrix: bundle.index.matrix(),
        weights: &bundle.weights,
    };
    let payload = rmp_serde::to_vec_named(&out)
        .map_err(|e| Error::Serialization(format!("bundle encode error: {}", e)))?;
    Ok(frame(&payload))
}

fn frame(payload: &[u8]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(HEADER_LEN + payload.len());
    buf.extend_from_slice(BUNDLE_MAGIC);
    buf.extend_from_slice(&BUNDLE_VERSION.to_le_bytes());
    buf.extend_from_slice(&xxh3_64(payload).to_le_bytes());
    buf.extend_from_slice(payload);
    buf
}

/// Decode and validate a bundle.
///
/// # Errors
///
/// Returns [`Error::Corruption`] on bad framing, a checksum mismatch, an
/// undecodable payload, a missing part, or parts that do not agree with each
/// other.
pub fn decode(buf: &[u8]) -> Result<IndexBundle> {
    if buf.len() < HEADER_LEN {
        return Err(Error::corruption("bundle too small"));
    }
    if &buf[0..4] != BUNDLE_MAGIC {
        return Err(Error::corruption("bad bundle magic"));
    }
    let mut version = [0u8; 4];
    version.copy_from_slice(&buf[4..8]);
    let version = u32::from_le_bytes(version);
    if version != BUNDLE_VERSION {
        return Err(Error::corruption(format!(
            "unsupported bundle version {}",
            version
        )));
    }

    let mut stored = [0u8; 8];
    stored.copy_from_slice(&buf[8..HEADER_LEN]);
    let stored = u64::from_le_bytes(stored);
    let payload = &buf[HEADER_LEN..];
    let actual = xxh3_64(payload);
    if stored != actual {
        return Err(Error::corruption(format!(
            "bundle checksum mismatch: stored {:016x}, computed {:016x}",
            stored, actual
        )));
    }

    let data: BundleIn = rmp_serde::from_slice(payload)
        .map_err(|e| Error::corruption(format!("bundle decode error: {}", e)))?;

    let catalog = data.catalog.ok_or_else(|| missing("catalog"))?;
    let vocabulary = data.vocabulary.ok_or_else(|| missing("vocabulary"))?;
    let matrix = data.matrix.ok_or_else(|| missing("matrix"))?;
    let weights = data.weights.ok_or_else(|| missing("weights"))?;

    if matrix.len() != catalog.len() {
        return Err(Error::corruption(format!(
            "matrix has {} rows for {} products",
            matrix.len(),
            catalog.len()
        )));
    }
    let index = TermIndex::from_parts(vocabulary, matrix)?;

    Ok(IndexBundle {
        catalog,
        index,
        weights,
    })
}

fn missing(part: &str) -> Error {
    Error::corruption(format!("bundle is missing its {}", part))
}

/// Write a bundle atomically (temp + fsync + rename)
pub fn save_bundle(path: &Path, bundle: &IndexBundle) -> Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    std::fs::create_dir_all(dir)?;

    let buf = encode(bundle)?;

    let tmp_path = path.with_extension("bundle.tmp");
    {
        let mut file = std::fs::File::create(&tmp_path)?;
        file.write_all(&buf)?;
        file.sync_all()?;
    }
    std::fs::rename(&tmp_path, path)?;

    tracing::info!(
        target: "stylesearch::bundle",
        path = %path.display(),
        products = bundle.catalog.len(),
        bytes = buf.len(),
        "Saved index bundle"
    );
    Ok(())
}

/// Load and validate a bundle. Validation happens here, not on first query.
pub fn load_bundle(path: &Path) -> Result<IndexBundle> {
    let buf = std::fs::read(path)?;
    match decode(&buf) {
        Ok(bundle) => {
            tracing::info!(
                target: "stylesearch::bundle",
                path = %path.display(),
                products = bundle.catalog.len(),
                vocabulary = bundle.index.vocabulary().len(),
                "Loaded index bundle"
            );
            Ok(bundle)
        }
        Err(e) => {
            tracing::warn!(
                target: "stylesearch::bundle",
                path = %path.display(),
                error = %e,
                "Rejected index bundle"
            );
            Err(e)
        }
    }
}
