//! Similarity index trait - the pluggable retrieval backend seam

use async_trait::async_trait;

use super::Corpus;
use crate::error::Result;

/// A fragment returned by a backend query, ranked by the backend's own
/// similarity metric
#[derive(Debug, Clone)]
pub struct Candidate {
    pub text: String,
    pub source_tag: i64,
    pub token_count: usize,
    /// Position in the corpus, stable tie-break identity
    pub corpus_order: usize,
    /// Backend-native similarity, only comparable within one query
    pub backend_score: f32,
}

/// Trait for similarity backends
///
/// `store` replaces the whole corpus atomically; a query never observes
/// a partially updated index. `query` on an empty or uninitialized
/// corpus returns an empty result, and `k` is clamped to corpus size.
#[async_trait]
pub trait SimilarityIndex: Send + Sync {
    /// Replace the indexed corpus
    async fn store(&mut self, corpus: Corpus) -> Result<()>;

    /// Up to `k` candidates ranked by backend similarity
    async fn query(&self, text: &str, k: usize) -> Result<Vec<Candidate>>;

    /// Number of indexed fragments
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
