//! Language-aware text segmentation
//!
//! Questions and fragments are compared term-by-term, so both sides must
//! segment the same way. Latin and digit runs become lowercased word
//! tokens; Han runs are segmented by forward maximum matching against a
//! lexicon (seeded from the synonym table), falling back to single
//! characters when no lexicon entry matches.

use std::sync::LazyLock;

use regex::Regex;
use rustc_hash::FxHashSet;

/// Token run scanner: alphanumeric words or spans of CJK ideographs/kana/hangul
static RUN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Za-z0-9]+|[\p{Han}\p{Hiragana}\p{Katakana}\p{Hangul}]+").unwrap()
});

/// Segmenter with an optional word lexicon for CJK text
#[derive(Debug, Clone, Default)]
pub struct Segmenter {
    lexicon: FxHashSet<String>,
    /// Longest lexicon entry in chars, bounds the matching window
    max_word_len: usize,
}

impl Segmenter {
    /// Create a segmenter with no lexicon (single-character CJK fallback)
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a segmenter whose CJK matcher knows the given words
    pub fn with_lexicon<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut lexicon = FxHashSet::default();
        let mut max_word_len = 0;

        for word in words {
            let word = word.as_ref();
            let len = word.chars().count();
            if len > 1 {
                max_word_len = max_word_len.max(len);
                lexicon.insert(word.to_string());
            }
        }

        Self {
            lexicon,
            max_word_len,
        }
    }

    /// Split text into terms
    pub fn segment(&self, text: &str) -> Vec<String> {
        let mut tokens = Vec::new();

        for run in RUN_REGEX.find_iter(text) {
            let run = run.as_str();
            if run.is_ascii() {
                tokens.push(run.to_lowercase());
            } else {
                self.segment_cjk(run, &mut tokens);
            }
        }

        tokens
    }

    /// Forward maximum matching over a CJK run
    fn segment_cjk(&self, run: &str, tokens: &mut Vec<String>) {
        let chars: Vec<char> = run.chars().collect();
        let mut i = 0;

        while i < chars.len() {
            let mut matched = 0;

            if self.max_word_len > 1 {
                let limit = self.max_word_len.min(chars.len() - i);
                for len in (2..=limit).rev() {
                    let candidate: String = chars[i..i + len].iter().collect();
                    if self.lexicon.contains(&candidate) {
                        tokens.push(candidate);
                        matched = len;
                        break;
                    }
                }
            }

            if matched == 0 {
                tokens.push(chars[i].to_string());
                matched = 1;
            }

            i += matched;
        }
    }
}

/// Adjacent-term bigrams, concatenated
pub fn bigrams(tokens: &[String]) -> Vec<String> {
    tokens
        .windows(2)
        .map(|pair| format!("{}{}", pair[0], pair[1]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_ascii() {
        let seg = Segmenter::new();
        let tokens = seg.segment("Hello, World! 42");
        assert_eq!(tokens, vec!["hello", "world", "42"]);
    }

    #[test]
    fn test_segment_cjk_single_char_fallback() {
        let seg = Segmenter::new();
        let tokens = seg.segment("天氣很好");
        assert_eq!(tokens, vec!["天", "氣", "很", "好"]);
    }

    #[test]
    fn test_segment_cjk_with_lexicon() {
        let seg = Segmenter::with_lexicon(["天氣", "出門"]);
        let tokens = seg.segment("台北的天氣很好");
        assert_eq!(tokens, vec!["台", "北", "的", "天氣", "很", "好"]);
    }

    #[test]
    fn test_segment_mixed_scripts() {
        let seg = Segmenter::with_lexicon(["天氣"]);
        let tokens = seg.segment("API 回傳天氣 data");
        assert_eq!(tokens, vec!["api", "回", "傳", "天氣", "data"]);
    }

    #[test]
    fn test_lexicon_ignores_single_char_entries() {
        let seg = Segmenter::with_lexicon(["天"]);
        let tokens = seg.segment("天氣");
        assert_eq!(tokens, vec!["天", "氣"]);
    }

    #[test]
    fn test_bigrams() {
        let tokens: Vec<String> = ["天氣", "很", "好"].iter().map(|s| s.to_string()).collect();
        assert_eq!(bigrams(&tokens), vec!["天氣很", "很好"]);
        assert!(bigrams(&tokens[..1]).is_empty());
    }
}
