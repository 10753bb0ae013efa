//! docqa - retrieval engine for single-document question answering
//!
//! Chunk an uploaded document into overlapping fragments, index them in
//! a pluggable similarity backend, broaden questions through a synonym
//! table, re-score candidates with a composite lexical heuristic, and
//! assemble a token-budgeted context for an LLM answer.

pub mod assemble;
pub mod chunker;
pub mod config;
pub mod embedding;
pub mod error;
mod http;
pub mod index;
pub mod llm;
pub mod qa;
pub mod retriever;
pub mod segment;
pub mod synonyms;

pub use assemble::{assemble as assemble_context, build_context, RetrievedContext, ScoredCandidate};
pub use chunker::{Chunker, Fragment, OverlapChunker};
pub use config::{Config, RetrievalConfig};
pub use error::{Result, RetrievalError};
pub use index::{
    Candidate, Corpus, LexicalIndex, RelevanceScorer, ScoringPolicy, SimilarityIndex, VectorIndex,
};
pub use qa::QaEngine;
pub use retriever::Retriever;
pub use segment::Segmenter;
pub use synonyms::{QueryExpander, SynonymTable};
