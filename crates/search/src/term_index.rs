//! Term-weighted index
//!
//! A fitted [`Vocabulary`] (terms + inverse document frequencies) and a
//! [`TermMatrix`] holding one L2-normalized sparse row per document.
//!
//! Weighting:
//! - tf: raw count of the term in the document
//! - idf: `ln((1 + N) / (1 + df)) + 1`
//! - row weight: `tf * idf`, then scaled to unit length
//!
//! Rows and queries are unit vectors, so cosine similarity is the dot
//! product. Columns are vocabulary terms in lexicographic order.

use crate::tokenizer::analyze;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use stylesearch_core::{Error, IndexConfig, Result};

// ============================================================================
// SparseVector
// ============================================================================

/// Sparse row: strictly increasing column indices with matching weights
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SparseVector {
    indices: Vec<u32>,
    weights: Vec<f32>,
}

impl SparseVector {
    /// Weighted, unit-length vector from per-column term counts
    fn from_counts(counts: &BTreeMap<u32, u32>, idf: &[f32]) -> Self {
        let mut indices = Vec::with_capacity(counts.len());
        let mut weights = Vec::with_capacity(counts.len());
        for (&col, &tf) in counts {
            indices.push(col);
            weights.push(tf as f32 * idf[col as usize]);
        }

        let norm = weights.iter().map(|w| w * w).sum::<f32>().sqrt();
        if norm > 0.0 {
            for w in &mut weights {
                *w /= norm;
            }
        }
        SparseVector { indices, weights }
    }

    /// Column indices
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Weights, parallel to [`indices`](Self::indices)
    pub fn weights(&self) -> &[f32] {
        &self.weights
    }

    /// Number of stored entries
    pub fn nnz(&self) -> usize {
        self.indices.len()
    }

    /// True when no term is stored
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Dot product by merging the two sorted index lists
    pub fn dot(&self, other: &SparseVector) -> f32 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0f32;
        while i < self.indices.len() && j < other.indices.len() {
            match self.indices[i].cmp(&other.indices[j]) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += self.weights[i] * other.weights[j];
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }

    fn validate(&self, columns: usize) -> Result<()> {
        if self.indices.len() != self.weights.len() {
            return Err(Error::corruption("sparse row index/weight length mismatch"));
        }
        if self.indices.windows(2).any(|w| w[0] >= w[1]) {
            return Err(Error::corruption("sparse row indices not strictly increasing"));
        }
        if let Some(&last) = self.indices.last() {
            if last as usize >= columns {
                return Err(Error::corruption(format!(
                    "sparse row column {} outside vocabulary of {}",
                    last, columns
                )));
            }
        }
        if self.weights.iter().any(|w| !w.is_finite()) {
            return Err(Error::corruption("sparse row holds a non-finite weight"));
        }
        Ok(())
    }
}

// ============================================================================
// Vocabulary
// ============================================================================

/// Serialized form of [`Vocabulary`]; the term lookup is rebuilt on load
#[derive(Serialize, Deserialize)]
pub struct VocabularyRepr {
    config: IndexConfig,
    documents: usize,
    terms: Vec<String>,
    idf: Vec<f32>,
}

/// Fitted term → column mapping with per-column idf
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "VocabularyRepr", into = "VocabularyRepr")]
pub struct Vocabulary {
    config: IndexConfig,
    documents: usize,
    terms: Vec<String>,
    idf: Vec<f32>,
    lookup: HashMap<String, u32>,
}

impl Vocabulary {
    /// Terms in column order
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// Number of columns
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// True when no term survived the document-frequency cutoffs
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Number of documents the vocabulary was fitted on
    pub fn documents(&self) -> usize {
        self.documents
    }

    /// Settings used when fitting
    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    /// Column of a term
    pub fn column(&self, term: &str) -> Option<u32> {
        self.lookup.get(term).copied()
    }

    /// Inverse document frequency of a term
    pub fn idf(&self, term: &str) -> Option<f32> {
        self.column(term).map(|c| self.idf[c as usize])
    }

    /// Weighted unit vector for `text`. Terms outside the vocabulary are
    /// ignored; text with no known term maps to the empty vector.
    pub fn transform(&self, text: &str) -> SparseVector {
        let mut counts = BTreeMap::new();
        for term in analyze(text, self.config.ngram_max) {
            if let Some(col) = self.column(&term) {
                *counts.entry(col).or_insert(0u32) += 1;
            }
        }
        SparseVector::from_counts(&counts, &self.idf)
    }
}

impl TryFrom<VocabularyRepr> for Vocabulary {
    type Error = Error;

    fn try_from(repr: VocabularyRepr) -> Result<Self> {
        repr.config
            .validate()
            .map_err(|e| Error::corruption(format!("vocabulary settings: {}", e)))?;
        if repr.terms.len() != repr.idf.len() {
            return Err(Error::corruption(format!(
                "vocabulary has {} terms but {} idf values",
                repr.terms.len(),
                repr.idf.len()
            )));
        }
        if repr.terms.windows(2).any(|w| w[0] >= w[1]) {
            return Err(Error::corruption("vocabulary terms not sorted and unique"));
        }
        if repr.idf.iter().any(|v| !v.is_finite() || *v < 1.0) {
            return Err(Error::corruption("vocabulary holds an invalid idf value"));
        }
        let lookup = repr
            .terms
            .iter()
            .enumerate()
            .map(|(i, t)| (t.clone(), i as u32))
            .collect();
        Ok(Vocabulary {
            config: repr.config,
            documents: repr.documents,
            terms: repr.terms,
            idf: repr.idf,
            lookup,
        })
    }
}

impl From<Vocabulary> for VocabularyRepr {
    fn from(v: Vocabulary) -> Self {
        VocabularyRepr {
            config: v.config,
            documents: v.documents,
            terms: v.terms,
            idf: v.idf,
        }
    }
}

// ============================================================================
// TermMatrix
// ============================================================================

/// Document-term weight matrix, one row per catalog row
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TermMatrix {
    rows: Vec<SparseVector>,
}

impl TermMatrix {
    /// Row vectors in catalog order
    pub fn rows(&self) -> &[SparseVector] {
        &self.rows
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when the matrix has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Total stored entries
    pub fn nnz(&self) -> usize {
        self.rows.iter().map(SparseVector::nnz).sum()
    }
}

// ============================================================================
// TermIndex
// ============================================================================

/// Fitted vocabulary plus the document matrix it produced
#[derive(Debug, Clone, PartialEq)]
pub struct TermIndex {
    vocabulary: Vocabulary,
    matrix: TermMatrix,
}

impl TermIndex {
    /// Fit a vocabulary on `corpus` and weight every document.
    ///
    /// Terms are kept when they occur in at least `min_df` documents and in
    /// no more than `max_df * N` documents. When more than `max_features`
    /// terms remain, the most frequent across the corpus are kept (ties by
    /// term).
    pub fn build<S: AsRef<str>>(corpus: &[S], config: &IndexConfig) -> Self {
        let counted: Vec<HashMap<String, u32>> = corpus
            .iter()
            .map(|doc| {
                let mut counts = HashMap::new();
                for term in analyze(doc.as_ref(), config.ngram_max) {
                    *counts.entry(term).or_insert(0u32) += 1;
                }
                counts
            })
            .collect();

        let n_docs = counted.len();
        let mut doc_freq: HashMap<&str, usize> = HashMap::new();
        let mut corpus_freq: HashMap<&str, u64> = HashMap::new();
        for doc in &counted {
            for (term, &tf) in doc {
                *doc_freq.entry(term.as_str()).or_insert(0) += 1;
                *corpus_freq.entry(term.as_str()).or_insert(0) += tf as u64;
            }
        }

        let max_docs = config.max_df * n_docs as f64;
        let mut kept: Vec<&str> = doc_freq
            .iter()
            .filter(|&(_, &df)| df >= config.min_df && df as f64 <= max_docs)
            .map(|(&term, _)| term)
            .collect();

        if kept.len() > config.max_features {
            kept.sort_by(|a, b| corpus_freq[b].cmp(&corpus_freq[a]).then_with(|| a.cmp(b)));
            kept.truncate(config.max_features);
        }
        kept.sort_unstable();

        let idf: Vec<f32> = kept
            .iter()
            .map(|t| smooth_idf(n_docs, doc_freq[t]))
            .collect();
        let lookup: HashMap<String, u32> = kept
            .iter()
            .enumerate()
            .map(|(i, t)| (t.to_string(), i as u32))
            .collect();

        let rows = counted
            .iter()
            .map(|doc| {
                let counts: BTreeMap<u32, u32> = doc
                    .iter()
                    .filter_map(|(term, &tf)| lookup.get(term).map(|&col| (col, tf)))
                    .collect();
                SparseVector::from_counts(&counts, &idf)
            })
            .collect();

        let vocabulary = Vocabulary {
            config: *config,
            documents: n_docs,
            terms: kept.iter().map(|t| t.to_string()).collect(),
            idf,
            lookup,
        };
        let matrix = TermMatrix { rows };

        if vocabulary.is_empty() && n_docs > 0 {
            tracing::warn!(
                target: "stylesearch::index",
                documents = n_docs,
                min_df = config.min_df,
                max_df = config.max_df,
                "No terms survived the document-frequency cutoffs"
            );
        }
        tracing::info!(
            target: "stylesearch::index",
            documents = n_docs,
            vocabulary = vocabulary.len(),
            nnz = matrix.nnz(),
            "Built term index"
        );

        TermIndex { vocabulary, matrix }
    }

    /// Reassemble an index from persisted parts.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Corruption`] if the row count differs from the
    /// number of documents the vocabulary was fitted on, or a row refers to
    /// a column outside the vocabulary or is otherwise malformed.
    pub fn from_parts(vocabulary: Vocabulary, matrix: TermMatrix) -> Result<Self> {
        if matrix.len() != vocabulary.documents() {
            return Err(Error::corruption(format!(
                "matrix has {} rows but the vocabulary was fitted on {} documents",
                matrix.len(),
                vocabulary.documents()
            )));
        }
        for row in &matrix.rows {
            row.validate(vocabulary.len())?;
        }
        Ok(TermIndex { vocabulary, matrix })
    }

    /// Split into persisted parts
    pub fn into_parts(self) -> (Vocabulary, TermMatrix) {
        (self.vocabulary, self.matrix)
    }

    /// Fitted vocabulary
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Document matrix
    pub fn matrix(&self) -> &TermMatrix {
        &self.matrix
    }

    /// Number of indexed documents
    pub fn len(&self) -> usize {
        self.matrix.len()
    }

    /// True when no document is indexed
    pub fn is_empty(&self) -> bool {
        self.matrix.is_empty()
    }

    /// Top `top_k` rows by cosine similarity to `text`, scores > 0 only,
    /// ties by row order.
    pub fn query(&self, text: &str, top_k: usize) -> Vec<(usize, f32)> {
        let query = self.vocabulary.transform(text);
        rank(
            self.matrix.rows.iter().enumerate().map(|(row, v)| (row, query.dot(v))),
            top_k,
        )
    }

    /// [`query`](Self::query) restricted to `rows`. Ties keep the order of
    /// `rows`. Rows outside the matrix are skipped.
    pub fn query_rows(&self, text: &str, rows: &[usize], top_k: usize) -> Vec<(usize, f32)> {
        let query = self.vocabulary.transform(text);
        rank(
            rows.iter()
                .filter_map(|&row| self.matrix.rows.get(row).map(|v| (row, query.dot(v)))),
            top_k,
        )
    }

    /// Cosine similarity of `row` to every row, in row order. `None` when
    /// `row` is out of range.
    pub fn row_similarities(&self, row: usize) -> Option<Vec<f32>> {
        let reference = self.matrix.rows.get(row)?;
        Some(self.matrix.rows.iter().map(|v| reference.dot(v)).collect())
    }
}

fn smooth_idf(n_docs: usize, df: usize) -> f32 {
    (((1 + n_docs) as f64 / (1 + df) as f64).ln() + 1.0) as f32
}

/// Positive scores, highest first, stable on input order
fn rank(scores: impl Iterator<Item = (usize, f32)>, top_k: usize) -> Vec<(usize, f32)> {
    if top_k == 0 {
        return Vec::new();
    }
    let mut hits: Vec<(usize, f32)> = scores.filter(|(_, s)| *s > 0.0).collect();
    hits.sort_by(|a, b| b.1.total_cmp(&a.1));
    hits.truncate(top_k);
    hits
}
