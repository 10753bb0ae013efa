//! Relevance scoring - composite lexical heuristic
//!
//! Candidates coming back from a similarity backend are re-scored with
//! signals the backend itself cannot see: term overlap against the
//! segmented question, raw edit-distance similarity, paraphrase credit
//! for near-matching bigrams, and hits from the synonym-expanded term
//! set. The result is a weighted sum, deliberately heuristic.

use std::sync::Arc;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::segment::{bigrams, Segmenter};

/// Scoring weights, tunable independently of control flow
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringPolicy {
    /// Weight of the term-overlap ratio
    #[serde(default = "default_overlap_weight")]
    pub overlap_weight: f32,

    /// Weight of the raw edit-distance similarity ratio
    #[serde(default = "default_similarity_weight")]
    pub similarity_weight: f32,

    /// Score added per expanded term found in the fragment
    #[serde(default = "default_expanded_hit_weight")]
    pub expanded_hit_weight: f32,

    /// Minimum bigram similarity that earns partial credit
    #[serde(default = "default_bigram_threshold")]
    pub bigram_threshold: f32,

    /// Partial credit per near-matching bigram pair
    #[serde(default = "default_bigram_bonus")]
    pub bigram_bonus: f32,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            overlap_weight: default_overlap_weight(),
            similarity_weight: default_similarity_weight(),
            expanded_hit_weight: default_expanded_hit_weight(),
            bigram_threshold: default_bigram_threshold(),
            bigram_bonus: default_bigram_bonus(),
        }
    }
}

fn default_overlap_weight() -> f32 {
    0.7
}

fn default_similarity_weight() -> f32 {
    0.3
}

fn default_expanded_hit_weight() -> f32 {
    1.0
}

fn default_bigram_threshold() -> f32 {
    0.8
}

fn default_bigram_bonus() -> f32 {
    0.5
}

/// Scores fragments against a question under a [`ScoringPolicy`]
pub struct RelevanceScorer {
    policy: ScoringPolicy,
    segmenter: Arc<Segmenter>,
}

impl RelevanceScorer {
    pub fn new(policy: ScoringPolicy, segmenter: Arc<Segmenter>) -> Self {
        Self { policy, segmenter }
    }

    /// Full composite score: overlap + similarity + bigram credit +
    /// expanded-term hits
    pub fn score(&self, question: &str, expanded: &FxHashSet<String>, fragment: &str) -> f32 {
        let q_tokens = self.segmenter.segment(question);
        let f_tokens = self.segmenter.segment(fragment);

        let mut score = self.policy.overlap_weight * overlap_ratio(&q_tokens, &f_tokens)
            + self.policy.similarity_weight * similarity_ratio(question, fragment);

        let q_bigrams = bigrams(&q_tokens);
        let f_bigrams = bigrams(&f_tokens);
        for q_bigram in &q_bigrams {
            for f_bigram in &f_bigrams {
                if similarity_ratio(q_bigram, f_bigram) > self.policy.bigram_threshold {
                    score += self.policy.bigram_bonus;
                }
            }
        }

        let hits = expanded
            .iter()
            .filter(|term| term.chars().count() > 1 && fragment.contains(term.as_str()))
            .count();
        score += self.policy.expanded_hit_weight * hits as f32;

        score
    }

    /// Simple two-signal score, the lexical fallback backend's metric
    pub fn simple_score(&self, question: &str, fragment: &str) -> f32 {
        let q_tokens = self.segmenter.segment(question);
        let f_tokens = self.segmenter.segment(fragment);

        self.policy.overlap_weight * overlap_ratio(&q_tokens, &f_tokens)
            + self.policy.similarity_weight * similarity_ratio(question, fragment)
    }
}

/// Share of distinct question terms present in the fragment, 0 when the
/// question segments to nothing
fn overlap_ratio(q_tokens: &[String], f_tokens: &[String]) -> f32 {
    if q_tokens.is_empty() {
        return 0.0;
    }

    let q_set: FxHashSet<&str> = q_tokens.iter().map(String::as_str).collect();
    let f_set: FxHashSet<&str> = f_tokens.iter().map(String::as_str).collect();
    let common = q_set.intersection(&f_set).count();

    common as f32 / q_set.len() as f32
}

/// Normalized edit-distance similarity in `[0, 1]`
///
/// `1.0` for identical strings, `0.0` when every char differs.
pub fn similarity_ratio(a: &str, b: &str) -> f32 {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let max_len = a_chars.len().max(b_chars.len());

    if max_len == 0 {
        return 1.0;
    }

    let distance = levenshtein(&a_chars, &b_chars);
    1.0 - distance as f32 / max_len as f32
}

/// Char-level Levenshtein distance, two-row dynamic programming
fn levenshtein(a: &[char], b: &[char]) -> usize {
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0usize; b.len() + 1];

    for (i, &ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let substitution = prev[j] + usize::from(ca != cb);
            curr[j + 1] = substitution.min(prev[j + 1] + 1).min(curr[j] + 1);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}
