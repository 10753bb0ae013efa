//! Synonym table and query expansion
//!
//! A question is broadened into a term set before scoring: every term
//! that belongs to a synonym group pulls in the whole group, so a
//! question asking about "費用" also matches fragments that say "價格"
//! or "成本".

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::debug;

use crate::segment::Segmenter;

/// Static mapping from canonical terms to interchangeable alternates
///
/// Loaded once at construction, read-only afterwards. Each group holds
/// the canonical term plus all listed synonyms; membership lookup covers
/// every term in the group, not just the canonical key.
#[derive(Debug, Clone, Default)]
pub struct SynonymTable {
    groups: Vec<Vec<String>>,
    membership: FxHashMap<String, usize>,
}

impl SynonymTable {
    /// Build a table from canonical → alternates pairs
    pub fn from_map(map: BTreeMap<String, Vec<String>>) -> Self {
        let mut groups = Vec::with_capacity(map.len());
        let mut membership = FxHashMap::default();

        for (canonical, alternates) in map {
            let mut group = Vec::with_capacity(alternates.len() + 1);
            group.push(canonical);
            group.extend(alternates);

            let idx = groups.len();
            for term in &group {
                membership.entry(term.clone()).or_insert(idx);
            }
            groups.push(group);
        }

        Self { groups, membership }
    }

    /// Load a table from a TOML file of `canonical = ["alt", ...]` entries
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let map: BTreeMap<String, Vec<String>> = toml::from_str(&content)?;
        let table = Self::from_map(map);
        debug!("Loaded {} synonym groups from {:?}", table.groups.len(), path);
        Ok(table)
    }

    /// Full group for a term, if the term belongs to one
    pub fn group_of(&self, term: &str) -> Option<&[String]> {
        self.membership
            .get(term)
            .map(|idx| self.groups[*idx].as_slice())
    }

    /// All terms across all groups (lexicon seed for the segmenter)
    pub fn terms(&self) -> impl Iterator<Item = &String> {
        self.groups.iter().flatten()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Expands a question into a broadened, deduplicated term set
pub struct QueryExpander {
    table: SynonymTable,
    segmenter: Arc<Segmenter>,
}

impl QueryExpander {
    pub fn new(table: SynonymTable, segmenter: Arc<Segmenter>) -> Self {
        Self { table, segmenter }
    }

    /// Segment the question and union each term with its synonym group
    ///
    /// Every raw term of the question is always present in the result;
    /// terms without a group expand to themselves alone.
    pub fn expand(&self, question: &str) -> FxHashSet<String> {
        let mut expanded = FxHashSet::default();

        for term in self.segmenter.segment(question) {
            if let Some(group) = self.table.group_of(&term) {
                expanded.extend(group.iter().cloned());
            }
            expanded.insert(term);
        }

        expanded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn price_table() -> SynonymTable {
        let mut map = BTreeMap::new();
        map.insert(
            "價格".to_string(),
            vec!["費用".to_string(), "成本".to_string()],
        );
        SynonymTable::from_map(map)
    }

    fn expander(table: SynonymTable) -> QueryExpander {
        let segmenter = Arc::new(Segmenter::with_lexicon(table.terms()));
        QueryExpander::new(table, segmenter)
    }

    #[test]
    fn test_group_lookup_covers_alternates() {
        let table = price_table();
        assert!(table.group_of("價格").is_some());
        assert!(table.group_of("成本").is_some());
        assert!(table.group_of("天氣").is_none());
    }

    #[test]
    fn test_expand_pulls_in_whole_group() {
        let exp = expander(price_table());
        let terms = exp.expand("費用是多少");
        assert!(terms.contains("價格"));
        assert!(terms.contains("費用"));
        assert!(terms.contains("成本"));
    }

    #[test]
    fn test_expand_contains_every_raw_term() {
        let exp = expander(price_table());
        let terms = exp.expand("費用是多少");
        for raw in ["費用", "是", "多", "少"] {
            assert!(terms.contains(raw), "missing raw term {}", raw);
        }
    }

    #[test]
    fn test_expand_without_table_is_identity() {
        let exp = expander(SynonymTable::default());
        let terms = exp.expand("hello world");
        assert_eq!(terms.len(), 2);
        assert!(terms.contains("hello"));
        assert!(terms.contains("world"));
    }

    #[test]
    fn test_from_toml() {
        let map: BTreeMap<String, Vec<String>> =
            toml::from_str(r#"價格 = ["費用", "成本"]"#).unwrap();
        let table = SynonymTable::from_map(map);
        assert_eq!(table.group_of("費用").unwrap().len(), 3);
    }
}
