//! Vector backend - embedding provider plus usearch in-memory index
//!
//! The exact nearest-neighbor backend. Fragment texts are embedded
//! through the configured provider and held in a usearch inner-product
//! index built entirely in memory; each `store` builds the replacement
//! index before swapping it in, so queries never see a partial corpus.

use async_trait::async_trait;
use tracing::info;
use usearch::{Index, IndexOptions, MetricKind, ScalarKind};

use super::traits::{Candidate, SimilarityIndex};
use super::Corpus;
use crate::embedding::{get_token_limit, truncate_to_token_limit, EmbeddingProvider};
use crate::error::{Result, RetrievalError};

/// Embedding-backed similarity index
pub struct VectorIndex {
    provider: EmbeddingProvider,
    /// Input ceiling of the embedding model, in its own token unit
    token_limit: usize,
    state: Option<VectorState>,
}

struct VectorState {
    index: Index,
    corpus: Corpus,
}

impl VectorIndex {
    pub fn new(provider: EmbeddingProvider) -> Self {
        let token_limit = get_token_limit(provider.model_name());
        Self {
            provider,
            token_limit,
            state: None,
        }
    }

    fn index_options(&self) -> IndexOptions {
        IndexOptions {
            dimensions: self.provider.dimensions(),
            metric: MetricKind::IP,
            quantization: ScalarKind::F32,
            connectivity: 32,
            expansion_add: 64,
            expansion_search: 64,
            multi: false,
        }
    }
}

#[async_trait]
impl SimilarityIndex for VectorIndex {
    async fn store(&mut self, corpus: Corpus) -> Result<()> {
        if corpus.is_empty() {
            self.state = None;
            return Ok(());
        }

        let texts: Vec<String> = corpus
            .fragments()
            .iter()
            .map(|f| f.text.clone())
            .collect();
        let truncated = truncate_to_token_limit(&texts, self.token_limit);
        let refs: Vec<&str> = truncated.iter().map(String::as_str).collect();

        let embeddings = self
            .provider
            .embed(&refs)
            .await
            .map_err(RetrievalError::backend)?;

        let index = Index::new(&self.index_options()).map_err(RetrievalError::backend)?;
        index
            .reserve(embeddings.len())
            .map_err(RetrievalError::backend)?;

        for (i, embedding) in embeddings.iter().enumerate() {
            index
                .add(i as u64, embedding)
                .map_err(RetrievalError::backend)?;
        }

        info!("Vector index rebuilt with {} fragments", corpus.len());

        // Swap only after the full rebuild succeeded
        self.state = Some(VectorState { index, corpus });
        Ok(())
    }

    async fn query(&self, text: &str, k: usize) -> Result<Vec<Candidate>> {
        let Some(state) = &self.state else {
            return Ok(Vec::new());
        };
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }

        let k = k.min(state.corpus.len());
        if k == 0 {
            return Ok(Vec::new());
        }

        let embeddings = self
            .provider
            .embed(&[text])
            .await
            .map_err(RetrievalError::backend)?;
        let query_vec = embeddings
            .first()
            .ok_or_else(|| RetrievalError::backend(anyhow::anyhow!("provider returned no query vector")))?;

        let matches = state
            .index
            .search(query_vec, k)
            .map_err(RetrievalError::backend)?;

        let candidates = matches
            .keys
            .iter()
            .zip(matches.distances.iter())
            .filter_map(|(key, score)| {
                let order = *key as usize;
                state.corpus.get(order).map(|fragment| Candidate {
                    text: fragment.text.clone(),
                    source_tag: fragment.source_tag,
                    token_count: fragment.token_count,
                    corpus_order: order,
                    backend_score: *score,
                })
            })
            .collect();

        Ok(candidates)
    }

    fn len(&self) -> usize {
        self.state.as_ref().map_or(0, |s| s.corpus.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::EmbeddingMode;

    async fn offline_index() -> VectorIndex {
        let provider = EmbeddingProvider::new(
            "nomic-embed-text".to_string(),
            EmbeddingMode::Ollama { host: None },
        )
        .await
        .unwrap();
        VectorIndex::new(provider)
    }

    #[tokio::test]
    async fn test_query_before_store_returns_empty() {
        let index = offline_index().await;
        let results = index.query("天氣", 5).await.unwrap();
        assert!(results.is_empty());
        assert!(index.is_empty());
    }

    #[tokio::test]
    async fn test_store_empty_corpus_clears_state() {
        let mut index = offline_index().await;
        index.store(Corpus::default()).await.unwrap();
        assert_eq!(index.len(), 0);
        assert!(index.query("任何問題", 3).await.unwrap().is_empty());
    }
}
