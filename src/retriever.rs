//! Retriever - ingestion and the question pipeline
//!
//! Owns one corpus per uploaded document and resolves one question at a
//! time: expand → query the similarity index → re-score → assemble
//! under the context budget. A backend failure is logged and degraded
//! to an empty context so callers only ever see "no relevant passages".

use std::sync::Arc;

use tracing::{info, warn};

use crate::assemble::{assemble, RetrievedContext, ScoredCandidate};
use crate::chunker::{Chunker, OverlapChunker};
use crate::config::{Config, RetrievalConfig};
use crate::error::{Result, RetrievalError};
use crate::index::{Corpus, LexicalIndex, RelevanceScorer, SimilarityIndex};
use crate::segment::Segmenter;
use crate::synonyms::{QueryExpander, SynonymTable};

/// Retrieval pipeline over a pluggable similarity backend
pub struct Retriever {
    chunker: OverlapChunker,
    index: Box<dyn SimilarityIndex>,
    expander: QueryExpander,
    scorer: RelevanceScorer,
    top_k: usize,
    max_context_tokens: usize,
}

impl Retriever {
    /// Lexical retriever straight from a loaded [`Config`], threading
    /// its `[synonyms]` table into the expander
    pub fn from_config(config: &Config) -> Self {
        let synonyms = SynonymTable::from_map(config.synonyms.clone());
        Self::lexical(&config.retrieval, synonyms)
    }

    /// Retriever over the in-process lexical fallback backend
    pub fn lexical(config: &RetrievalConfig, synonyms: SynonymTable) -> Self {
        let segmenter = Arc::new(Segmenter::with_lexicon(synonyms.terms()));
        let index = Box::new(LexicalIndex::new(config.scoring.clone(), segmenter.clone()));
        Self::build(config, synonyms, segmenter, index)
    }

    /// Retriever over an externally constructed backend (e.g. a vector
    /// index)
    pub fn with_index(
        config: &RetrievalConfig,
        synonyms: SynonymTable,
        index: Box<dyn SimilarityIndex>,
    ) -> Self {
        let segmenter = Arc::new(Segmenter::with_lexicon(synonyms.terms()));
        Self::build(config, synonyms, segmenter, index)
    }

    fn build(
        config: &RetrievalConfig,
        synonyms: SynonymTable,
        segmenter: Arc<Segmenter>,
        index: Box<dyn SimilarityIndex>,
    ) -> Self {
        Self {
            chunker: OverlapChunker::new(config.chunk_size, config.chunk_overlap),
            index,
            expander: QueryExpander::new(synonyms, segmenter.clone()),
            scorer: RelevanceScorer::new(config.scoring.clone(), segmenter),
            top_k: config.top_k,
            max_context_tokens: config.max_context_tokens,
        }
    }

    /// Chunk extracted page texts and replace the indexed corpus
    ///
    /// Returns the number of fragments indexed.
    pub async fn ingest(&mut self, page_texts: &[String], source_tags: &[i64]) -> Result<usize> {
        if page_texts.len() != source_tags.len() {
            return Err(RetrievalError::MalformedInput(format!(
                "{} page texts but {} source tags",
                page_texts.len(),
                source_tags.len()
            )));
        }

        let mut fragments = Vec::new();
        for (text, tag) in page_texts.iter().zip(source_tags) {
            fragments.extend(self.chunker.chunk(text, *tag));
        }

        let count = fragments.len();
        self.index.store(Corpus::new(fragments)).await?;
        info!("Ingested {} fragments from {} pages", count, page_texts.len());

        Ok(count)
    }

    /// Resolve a question into budget-fitted fragments and their tags
    pub async fn get_context(&self, question: &str) -> Result<RetrievedContext> {
        let question = question.trim();
        if question.is_empty() {
            return Ok(RetrievedContext::default());
        }

        let expanded = self.expander.expand(question);
        let backend_query = augment_query(question, &expanded);

        let candidates = match self.index.query(&backend_query, self.top_k).await {
            Ok(candidates) => candidates,
            Err(RetrievalError::BackendUnavailable(err)) => {
                warn!("Similarity backend failed, returning empty context: {err:#}");
                return Ok(RetrievedContext::default());
            }
            Err(err) => return Err(err),
        };

        let scored: Vec<ScoredCandidate> = candidates
            .into_iter()
            .map(|c| {
                let score = self.scorer.score(question, &expanded, &c.text);
                ScoredCandidate {
                    text: c.text,
                    source_tag: c.source_tag,
                    token_count: c.token_count,
                    corpus_order: c.corpus_order,
                    score,
                }
            })
            .collect();

        Ok(assemble(scored, self.max_context_tokens))
    }
}

/// Append synonym expansions to the backend query so fragments phrased
/// with an alternate term still surface as candidates
fn augment_query(question: &str, expanded: &rustc_hash::FxHashSet<String>) -> String {
    let mut extra: Vec<&str> = expanded
        .iter()
        .map(String::as_str)
        .filter(|term| term.chars().count() > 1 && !question.contains(*term))
        .collect();

    if extra.is_empty() {
        return question.to_string();
    }

    // Sorted so the augmented query is deterministic
    extra.sort_unstable();
    format!("{} {}", question, extra.join(" "))
}
