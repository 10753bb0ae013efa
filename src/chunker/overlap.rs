//! Overlapping chunker with sentence-boundary preference

use super::{Chunker, Fragment};

/// Extra chars past the size target searched for a sentence boundary
const BOUNDARY_SLACK: usize = 2;

/// Chars that end a sentence and make a preferred cut point
const BOUNDARY_CHARS: [char; 9] = ['。', '！', '？', '；', '.', '!', '?', ';', '\n'];

/// Splits text into fragments of roughly `chunk_size` chars, where each
/// fragment after the first starts with the tail of the previous one
pub struct OverlapChunker {
    /// Target fragment size in chars
    chunk_size: usize,
    /// Chars carried over from the previous fragment
    overlap: usize,
}

impl OverlapChunker {
    pub fn new(chunk_size: usize, overlap: usize) -> Self {
        let chunk_size = chunk_size.max(1);
        Self {
            chunk_size,
            overlap: overlap.min(chunk_size - 1),
        }
    }
}

impl Chunker for OverlapChunker {
    fn chunk(&self, text: &str, source_tag: i64) -> Vec<Fragment> {
        if text.trim().is_empty() {
            return Vec::new();
        }

        let chars: Vec<char> = text.chars().collect();
        let mut fragments = Vec::new();
        let mut tail: Vec<char> = Vec::new();
        let mut pos = 0;

        while pos < chars.len() {
            // The carried tail counts toward the size target, so a full
            // fragment never exceeds chunk_size + BOUNDARY_SLACK chars.
            let target = self.chunk_size - tail.len();
            let body_end = cut_point(&chars, pos, target);

            let mut fragment: String = tail.iter().collect();
            fragment.extend(&chars[pos..body_end]);

            tail = fragment
                .chars()
                .rev()
                .take(self.overlap)
                .collect::<Vec<_>>()
                .into_iter()
                .rev()
                .collect();

            fragments.push(Fragment::new(fragment, source_tag));
            pos = body_end;
        }

        fragments
    }
}

/// End of the next fragment body starting at `pos`
///
/// Takes the whole remainder when it fits the target; otherwise cuts
/// after the last sentence boundary inside the look-ahead window, or at
/// the hard target limit when the window holds no boundary.
fn cut_point(chars: &[char], pos: usize, target: usize) -> usize {
    let remaining = chars.len() - pos;
    if remaining <= target {
        return chars.len();
    }

    let window_end = (pos + target + BOUNDARY_SLACK).min(chars.len());
    let boundary = chars[pos..window_end]
        .iter()
        .rposition(|c| BOUNDARY_CHARS.contains(c));

    match boundary {
        Some(offset) => pos + offset + 1,
        None => pos + target,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(fragments: &[Fragment]) -> Vec<&str> {
        fragments.iter().map(|f| f.text.as_str()).collect()
    }

    #[test]
    fn test_empty_text_yields_no_fragments() {
        let chunker = OverlapChunker::new(10, 2);
        assert!(chunker.chunk("", 1).is_empty());
        assert!(chunker.chunk("   \n  ", 1).is_empty());
    }

    #[test]
    fn test_short_text_single_fragment() {
        let chunker = OverlapChunker::new(100, 10);
        let fragments = chunker.chunk("短文。", 3);
        assert_eq!(texts(&fragments), vec!["短文。"]);
        assert_eq!(fragments[0].source_tag, 3);
        assert_eq!(fragments[0].token_count, 3);
    }

    #[test]
    fn test_chinese_two_sentence_scenario() {
        let chunker = OverlapChunker::new(10, 2);
        let fragments = chunker.chunk("台北的天氣很好。今天適合出門。", 1);

        assert!(fragments.len() >= 2);
        for f in &fragments {
            assert!(f.token_count <= 12, "fragment too long: {}", f.text);
        }

        let first_tail: String = fragments[0].text.chars().rev().take(2).collect::<Vec<_>>()
            .into_iter().rev().collect();
        assert!(fragments[1].text.starts_with(&first_tail));
    }

    #[test]
    fn test_prefers_sentence_boundary() {
        let chunker = OverlapChunker::new(10, 0);
        let fragments = chunker.chunk("台北的天氣很好。今天適合出門。", 1);
        assert_eq!(fragments[0].text, "台北的天氣很好。");
    }

    #[test]
    fn test_hard_cut_without_boundary() {
        let chunker = OverlapChunker::new(5, 0);
        let fragments = chunker.chunk("abcdefghij", 1);
        assert_eq!(texts(&fragments), vec!["abcde", "fghij"]);
    }

    #[test]
    fn test_bodies_reconstruct_original() {
        let chunker = OverlapChunker::new(10, 3);
        let text = "台北的天氣很好。今天適合出門。我們去爬山吧，山上風景不錯。";
        let fragments = chunker.chunk(text, 1);

        let mut rebuilt = String::new();
        let mut carried = 0;
        for f in &fragments {
            rebuilt.extend(f.text.chars().skip(carried));
            carried = f.token_count.min(3);
        }
        assert_eq!(rebuilt, text);
    }

    #[test]
    fn test_deterministic() {
        let chunker = OverlapChunker::new(10, 2);
        let text = "台北的天氣很好。今天適合出門。我們去爬山吧。";
        assert_eq!(chunker.chunk(text, 1), chunker.chunk(text, 1));
    }

    #[test]
    fn test_overlap_clamped_below_chunk_size() {
        let chunker = OverlapChunker::new(4, 10);
        let fragments = chunker.chunk("abcdefghijkl", 1);
        // Clamped overlap still makes progress on every fragment
        assert!(fragments.len() > 1);
        assert!(fragments.iter().all(|f| f.token_count <= 4 + 2));
    }
}
