//! Lexical fallback backend - in-process similarity without embeddings
//!
//! Used when no vector backend is available. Ranks fragments by the
//! simple two-signal metric (term overlap + edit-distance similarity)
//! and drops fragments that share nothing with the query.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use super::scorer::{RelevanceScorer, ScoringPolicy};
use super::traits::{Candidate, SimilarityIndex};
use super::Corpus;
use crate::error::Result;
use crate::segment::Segmenter;

/// In-process lexical similarity index
pub struct LexicalIndex {
    corpus: Corpus,
    scorer: RelevanceScorer,
}

impl LexicalIndex {
    pub fn new(policy: ScoringPolicy, segmenter: Arc<Segmenter>) -> Self {
        Self {
            corpus: Corpus::default(),
            scorer: RelevanceScorer::new(policy, segmenter),
        }
    }
}

#[async_trait]
impl SimilarityIndex for LexicalIndex {
    async fn store(&mut self, corpus: Corpus) -> Result<()> {
        debug!("Lexical index storing {} fragments", corpus.len());
        self.corpus = corpus;
        Ok(())
    }

    async fn query(&self, text: &str, k: usize) -> Result<Vec<Candidate>> {
        if self.corpus.is_empty() || text.trim().is_empty() {
            return Ok(Vec::new());
        }

        let k = k.min(self.corpus.len());

        let mut candidates: Vec<Candidate> = self
            .corpus
            .fragments()
            .iter()
            .enumerate()
            .map(|(order, fragment)| Candidate {
                text: fragment.text.clone(),
                source_tag: fragment.source_tag,
                token_count: fragment.token_count,
                corpus_order: order,
                backend_score: self.scorer.simple_score(text, &fragment.text),
            })
            .filter(|c| c.backend_score > 0.0)
            .collect();

        // Stable sort keeps corpus order on ties
        candidates.sort_by(|a, b| {
            b.backend_score
                .partial_cmp(&a.backend_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        candidates.truncate(k);

        Ok(candidates)
    }

    fn len(&self) -> usize {
        self.corpus.len()
    }
}
