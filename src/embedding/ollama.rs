//! Ollama embedding provider

use std::env;
use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::http::{api_client, post_json};

/// Embedding batches return quickly relative to generation
const EMBED_TIMEOUT: Duration = Duration::from_secs(60);

/// Ollama embedding provider
pub struct OllamaEmbedding {
    client: Client,
    host: String,
    model_name: String,
    dimensions: usize,
}

#[derive(Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Deserialize)]
struct EmbedResponse {
    embeddings: Vec<Vec<f32>>,
}

impl OllamaEmbedding {
    /// Create a new Ollama embedding provider
    pub fn new(model_name: String, host: Option<String>) -> anyhow::Result<Self> {
        let host = host
            .or_else(|| env::var("DOCQA_OLLAMA_HOST").ok())
            .or_else(|| env::var("OLLAMA_HOST").ok())
            .unwrap_or_else(|| "http://localhost:11434".to_string());

        // Default dimensions for common embedding models
        let dimensions = match model_name.split(':').next().unwrap_or(&model_name) {
            "nomic-embed-text" => 768,
            "mxbai-embed-large" => 1024,
            "all-minilm" => 384,
            "bge-m3" => 1024,
            "snowflake-arctic-embed" => 1024,
            _ => 768, // Default
        };

        info!(
            "Ollama embedding provider: {} @ {} ({} dims)",
            model_name, host, dimensions
        );

        Ok(Self {
            client: api_client(EMBED_TIMEOUT),
            host,
            model_name,
            dimensions,
        })
    }

    /// Get dimensions
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// Compute embeddings
    pub async fn embed(&self, texts: &[&str]) -> anyhow::Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let texts_vec: Vec<String> = texts.iter().map(|s| s.to_string()).collect();
        let url = format!("{}/api/embed", self.host);

        // Process in batches of 32 (Ollama recommendation)
        let batch_size = 32;
        let mut all_embeddings = Vec::with_capacity(texts.len());

        for batch in texts_vec.chunks(batch_size) {
            let request = EmbedRequest {
                model: &self.model_name,
                input: batch,
            };

            let response: EmbedResponse =
                post_json(&self.client, &url, "Ollama", &request).await?;
            all_embeddings.extend(response.embeddings);
        }

        Ok(all_embeddings)
    }
}
