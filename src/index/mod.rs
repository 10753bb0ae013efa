//! Index module - corpus storage, similarity backends, and scoring

mod corpus;
mod lexical;
mod scorer;
mod traits;
mod vector;

pub use corpus::Corpus;
pub use lexical::LexicalIndex;
pub use scorer::{similarity_ratio, RelevanceScorer, ScoringPolicy};
pub use traits::{Candidate, SimilarityIndex};
pub use vector::VectorIndex;
