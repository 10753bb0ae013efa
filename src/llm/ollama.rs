//! Ollama LLM provider

use std::env;
use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::http::{api_client, post_json};

/// Local inference can be slow on long contexts
const GENERATE_TIMEOUT: Duration = Duration::from_secs(180);

/// Ollama LLM provider
pub struct OllamaLlm {
    client: Client,
    host: String,
    model_name: String,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    system: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

impl OllamaLlm {
    /// Create a new Ollama LLM provider
    pub fn new(model_name: String, host: Option<String>) -> anyhow::Result<Self> {
        let host = host
            .or_else(|| env::var("DOCQA_OLLAMA_HOST").ok())
            .or_else(|| env::var("OLLAMA_HOST").ok())
            .unwrap_or_else(|| "http://localhost:11434".to_string());

        info!("Ollama LLM provider: {} @ {}", model_name, host);

        Ok(Self {
            client: api_client(GENERATE_TIMEOUT),
            host,
            model_name,
        })
    }

    /// Generate an answer from assistant instructions and a user prompt
    ///
    /// With `stream: false` Ollama replies with one JSON object.
    pub async fn generate(&self, system: &str, prompt: &str) -> anyhow::Result<String> {
        let request = GenerateRequest {
            model: &self.model_name,
            system,
            prompt,
            stream: false,
        };

        let response: GenerateResponse = post_json(
            &self.client,
            &format!("{}/api/generate", self.host),
            "Ollama",
            &request,
        )
        .await?;

        Ok(response.response)
    }
}
