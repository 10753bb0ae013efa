//! Context assembly - token-budgeted fragment selection
//!
//! Scored candidates are accepted best-first until the next fragment
//! would overflow the budget. The scan stops at the first overflow
//! rather than backfilling smaller fragments, so acceptance order is
//! always a prefix of score order.

use serde::Serialize;

/// A fragment with its composite relevance score, ephemeral per query
#[derive(Debug, Clone)]
pub struct ScoredCandidate {
    pub text: String,
    pub source_tag: i64,
    pub token_count: usize,
    /// Position in the corpus, breaks score ties deterministically
    pub corpus_order: usize,
    pub score: f32,
}

/// Fragments accepted into the answer context, with their source tags
#[derive(Debug, Clone, Default, Serialize)]
pub struct RetrievedContext {
    pub fragments: Vec<String>,
    pub source_tags: Vec<i64>,
}

impl RetrievedContext {
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }
}

/// Select top-scoring candidates whose combined size fits `token_budget`
pub fn assemble(mut candidates: Vec<ScoredCandidate>, token_budget: usize) -> RetrievedContext {
    if candidates.is_empty() || token_budget == 0 {
        return RetrievedContext::default();
    }

    candidates.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.corpus_order.cmp(&b.corpus_order))
    });

    let mut context = RetrievedContext::default();
    let mut used = 0usize;

    for candidate in candidates {
        if used + candidate.token_count > token_budget {
            break;
        }
        used += candidate.token_count;
        context.fragments.push(candidate.text);
        context.source_tags.push(candidate.source_tag);
    }

    context
}

/// Render the accepted fragments as numbered paragraphs for the prompt
pub fn build_context(context: &RetrievedContext) -> String {
    context
        .fragments
        .iter()
        .enumerate()
        .map(|(i, fragment)| format!("段落{}：{}", i + 1, fragment))
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(text: &str, tokens: usize, order: usize, score: f32) -> ScoredCandidate {
        ScoredCandidate {
            text: text.to_string(),
            source_tag: order as i64 + 1,
            token_count: tokens,
            corpus_order: order,
            score,
        }
    }

    #[test]
    fn test_empty_candidates() {
        let result = assemble(Vec::new(), 100);
        assert!(result.is_empty());
    }

    #[test]
    fn test_zero_budget() {
        let result = assemble(vec![candidate("a", 1, 0, 1.0)], 0);
        assert!(result.is_empty());
    }

    #[test]
    fn test_strict_greedy_stops_at_first_overflow() {
        let candidates = vec![
            candidate("一", 3, 0, 3.0),
            candidate("二", 3, 1, 2.0),
            candidate("三", 3, 2, 1.0),
        ];

        // 3 fits, 3+3 would exceed 5, scan stops even though nothing
        // smaller follows.
        let result = assemble(candidates, 5);
        assert_eq!(result.fragments, vec!["一"]);
        assert_eq!(result.source_tags, vec![1]);
    }

    #[test]
    fn test_budget_never_exceeded() {
        let candidates = vec![
            candidate("aa", 2, 0, 5.0),
            candidate("bbb", 3, 1, 4.0),
            candidate("cccc", 4, 2, 3.0),
        ];

        let result = assemble(candidates, 6);
        let total: usize = result.fragments.iter().map(|f| f.chars().count()).sum();
        assert!(total <= 6);
        assert_eq!(result.fragments, vec!["aa", "bbb"]);
    }

    #[test]
    fn test_accepts_in_score_order() {
        let candidates = vec![
            candidate("low", 1, 0, 0.5),
            candidate("high", 1, 1, 2.0),
        ];

        let result = assemble(candidates, 10);
        assert_eq!(result.fragments, vec!["high", "low"]);
        assert_eq!(result.source_tags, vec![2, 1]);
    }

    #[test]
    fn test_score_ties_keep_corpus_order() {
        let candidates = vec![
            candidate("second", 1, 7, 1.0),
            candidate("first", 1, 2, 1.0),
        ];

        let result = assemble(candidates, 10);
        assert_eq!(result.fragments, vec!["first", "second"]);
    }

    #[test]
    fn test_zero_score_candidates_retained_when_budget_allows() {
        let candidates = vec![
            candidate("hit", 1, 0, 1.0),
            candidate("filler", 1, 1, 0.0),
        ];

        let result = assemble(candidates, 10);
        assert_eq!(result.fragments.len(), 2);
    }

    #[test]
    fn test_build_context_labels_paragraphs() {
        let context = RetrievedContext {
            fragments: vec!["天氣很好".to_string(), "適合出門".to_string()],
            source_tags: vec![1, 2],
        };

        let rendered = build_context(&context);
        assert_eq!(rendered, "段落1：天氣很好\n\n段落2：適合出門");
    }
}
