//! Token truncation using tiktoken
//!
//! Embedding models reject over-long inputs, so fragment texts are cut
//! to the model's input ceiling before the embed call. This unit (model
//! tokens) is unrelated to the char-based context budget.

use tiktoken_rs::cl100k_base;
use tracing::warn;

/// Token limits for common embedding models
pub fn get_token_limit(model_name: &str) -> usize {
    let base_name = model_name.split(':').next().unwrap_or(model_name);

    match base_name {
        // OpenAI models
        "text-embedding-3-small" | "text-embedding-3-large" | "text-embedding-ada-002" => 8192,

        // Ollama/local models
        "nomic-embed-text" | "nomic-embed-text-v1.5" => 2048,
        "nomic-embed-text-v2" => 512,
        "mxbai-embed-large" => 512,
        "all-minilm" => 512,
        "bge-m3" => 8192,
        "snowflake-arctic-embed" => 512,

        // Default fallback
        _ => 2048,
    }
}

/// Truncate texts to fit within token limit
pub fn truncate_to_token_limit(texts: &[String], token_limit: usize) -> Vec<String> {
    if texts.is_empty() {
        return Vec::new();
    }

    let bpe = cl100k_base().expect("Failed to load tiktoken encoding");

    let mut truncated = Vec::with_capacity(texts.len());
    let mut truncation_count = 0;

    for (i, text) in texts.iter().enumerate() {
        let tokens = bpe.encode_with_special_tokens(text);
        let original_length = tokens.len();

        if original_length <= token_limit {
            truncated.push(text.clone());
        } else {
            let kept_tokens: Vec<u32> = tokens.into_iter().take(token_limit).collect();
            let kept_text = bpe
                .decode(kept_tokens)
                .unwrap_or_else(|_| text.chars().take(token_limit * 4).collect());

            truncated.push(kept_text);
            truncation_count += 1;

            if truncation_count <= 3 {
                warn!(
                    "Fragment {} truncated for embedding: {} → {} tokens",
                    i + 1,
                    original_length,
                    token_limit
                );
            }
        }
    }

    if truncation_count > 3 {
        warn!(
            "Truncation summary: {}/{} fragments truncated",
            truncation_count,
            texts.len()
        );
    }

    truncated
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_limit_lookup() {
        assert_eq!(get_token_limit("text-embedding-3-small"), 8192);
        assert_eq!(get_token_limit("nomic-embed-text"), 2048);
        assert_eq!(get_token_limit("nomic-embed-text:latest"), 2048);
        assert_eq!(get_token_limit("unknown-model"), 2048);
    }

    #[test]
    fn test_short_text_untouched() {
        let short_text = "台北的天氣很好".to_string();
        let result = truncate_to_token_limit(&[short_text.clone()], 100);
        assert_eq!(result[0], short_text);
    }

    #[test]
    fn test_long_text_truncated() {
        let long_text = "天氣".repeat(5000);
        let result = truncate_to_token_limit(&[long_text.clone()], 64);
        assert!(result[0].len() < long_text.len());
    }
}
