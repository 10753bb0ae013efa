//! Chunking module - splits extracted document text into fragments
//!
//! Fragments are the retrieval unit: a bounded slice of document text
//! carrying the page it came from and its size in budget units (chars).

mod overlap;

pub use overlap::OverlapChunker;

/// A bounded slice of document text tagged with its source page
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    pub text: String,
    /// Page number (or paragraph/line index, depending on the extractor)
    pub source_tag: i64,
    /// Size in budget units, chars
    pub token_count: usize,
}

impl Fragment {
    pub fn new(text: String, source_tag: i64) -> Self {
        let token_count = text.chars().count();
        Self {
            text,
            source_tag,
            token_count,
        }
    }
}

/// Trait for chunkers
pub trait Chunker {
    /// Split one page of text into fragments carrying the page's tag
    fn chunk(&self, text: &str, source_tag: i64) -> Vec<Fragment>;
}
