//! Configuration file support
//!
//! Config file location: ~/.config/docqa/config.toml
//!
//! Example config:
//! ```toml
//! [retrieval]
//! chunk_size = 500
//! chunk_overlap = 100
//! top_k = 10
//! max_context_tokens = 6000
//!
//! [retrieval.scoring]
//! overlap_weight = 0.7
//! similarity_weight = 0.3
//!
//! [synonyms]
//! 價格 = ["費用", "成本"]
//! ```

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::index::ScoringPolicy;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub retrieval: RetrievalConfig,

    /// Canonical term → interchangeable alternates
    #[serde(default)]
    pub synonyms: BTreeMap<String, Vec<String>>,
}

/// Retrieval tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalConfig {
    /// Fragment size target in chars
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Chars carried over between adjacent fragments
    #[serde(default = "default_chunk_overlap")]
    pub chunk_overlap: usize,

    /// Candidates fetched from the similarity backend per question
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    /// Combined size ceiling of the assembled context, in chars
    #[serde(default = "default_max_context_tokens")]
    pub max_context_tokens: usize,

    /// Scoring weights
    #[serde(default)]
    pub scoring: ScoringPolicy,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
            chunk_overlap: default_chunk_overlap(),
            top_k: default_top_k(),
            max_context_tokens: default_max_context_tokens(),
            scoring: ScoringPolicy::default(),
        }
    }
}

fn default_chunk_size() -> usize {
    500
}

fn default_chunk_overlap() -> usize {
    100
}

fn default_top_k() -> usize {
    10
}

fn default_max_context_tokens() -> usize {
    6000
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("docqa")
            .join("config.toml")
    }

    /// Load config from file, returning defaults if not found
    ///
    /// Pair with [`crate::retriever::Retriever::from_config`] or
    /// [`crate::qa::QaEngine::from_config`] so the `[synonyms]` section
    /// reaches the query expander.
    pub fn load() -> Self {
        let path = Self::config_path();
        if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(content) => match toml::from_str(&content) {
                    Ok(config) => {
                        tracing::debug!("Loaded config from {:?}", path);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to parse config file: {}", e);
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read config file: {}", e);
                }
            }
        }
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.retrieval.chunk_size, 500);
        assert_eq!(config.retrieval.chunk_overlap, 100);
        assert_eq!(config.retrieval.top_k, 10);
        assert_eq!(config.retrieval.max_context_tokens, 6000);
        assert!(config.synonyms.is_empty());
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
[retrieval]
chunk_size = 200
top_k = 5

[retrieval.scoring]
overlap_weight = 0.6

[synonyms]
價格 = ["費用", "成本"]
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.retrieval.chunk_size, 200);
        assert_eq!(config.retrieval.top_k, 5);
        assert_eq!(config.retrieval.chunk_overlap, 100);
        assert_eq!(config.retrieval.scoring.overlap_weight, 0.6);
        assert_eq!(config.retrieval.scoring.similarity_weight, 0.3);
        assert_eq!(config.synonyms["價格"].len(), 2);
    }
}
