//! Corpus - the indexed fragment set for one uploaded document

use crate::chunker::Fragment;
use crate::error::{Result, RetrievalError};

/// Ordered fragment set owned by a similarity index
///
/// One corpus corresponds to one uploaded document and is replaced
/// wholesale on the next ingestion. Fragment position (corpus order) is
/// the stable identity used to break ranking ties.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    fragments: Vec<Fragment>,
}

impl Corpus {
    pub fn new(fragments: Vec<Fragment>) -> Self {
        Self { fragments }
    }

    /// Build a corpus from parallel text/tag slices
    pub fn from_parts(texts: &[String], source_tags: &[i64]) -> Result<Self> {
        if texts.len() != source_tags.len() {
            return Err(RetrievalError::MalformedInput(format!(
                "{} texts but {} source tags",
                texts.len(),
                source_tags.len()
            )));
        }

        let fragments = texts
            .iter()
            .zip(source_tags)
            .map(|(text, tag)| Fragment::new(text.clone(), *tag))
            .collect();

        Ok(Self { fragments })
    }

    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    pub fn get(&self, idx: usize) -> Option<&Fragment> {
        self.fragments.get(idx)
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_parts() {
        let corpus = Corpus::from_parts(
            &["天氣很好".to_string(), "適合出門".to_string()],
            &[1, 2],
        )
        .unwrap();
        assert_eq!(corpus.len(), 2);
        assert_eq!(corpus.get(0).unwrap().source_tag, 1);
        assert_eq!(corpus.get(1).unwrap().token_count, 4);
    }

    #[test]
    fn test_from_parts_length_mismatch() {
        let result = Corpus::from_parts(&["a".to_string()], &[1, 2]);
        assert!(matches!(result, Err(RetrievalError::MalformedInput(_))));
    }
}
