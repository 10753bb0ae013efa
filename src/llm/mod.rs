//! LLM module - answer-generation providers

mod ollama;
mod openai;
mod simulated;

use tracing::info;

/// LLM provider type
#[derive(Debug, Clone)]
pub enum LlmType {
    Ollama {
        host: Option<String>,
    },
    OpenAI {
        api_key: Option<String>,
        base_url: Option<String>,
    },
    /// Canned responses for tests, no network
    Simulated,
}

/// Unified LLM provider
pub struct LlmProvider {
    model_name: String,
    inner: LlmProviderInner,
}

enum LlmProviderInner {
    Ollama(ollama::OllamaLlm),
    OpenAI(openai::OpenAILlm),
    Simulated(simulated::SimulatedLlm),
}

impl LlmProvider {
    /// Create a new LLM provider
    pub fn new(model_name: String, llm_type: LlmType) -> anyhow::Result<Self> {
        let inner = match llm_type {
            LlmType::Ollama { host } => {
                LlmProviderInner::Ollama(ollama::OllamaLlm::new(model_name.clone(), host)?)
            }
            LlmType::OpenAI { api_key, base_url } => LlmProviderInner::OpenAI(
                openai::OpenAILlm::new(model_name.clone(), api_key, base_url)?,
            ),
            LlmType::Simulated => {
                LlmProviderInner::Simulated(simulated::SimulatedLlm::new(model_name.clone())?)
            }
        };

        info!("Initialized LLM provider: {}", model_name);

        Ok(Self { model_name, inner })
    }

    /// Generate an answer from assistant instructions and a user prompt
    pub async fn generate(&self, system: &str, prompt: &str) -> anyhow::Result<String> {
        match &self.inner {
            LlmProviderInner::Ollama(llm) => llm.generate(system, prompt).await,
            LlmProviderInner::OpenAI(llm) => llm.generate(system, prompt).await,
            LlmProviderInner::Simulated(llm) => llm.generate(system, prompt).await,
        }
    }

    /// Get model name
    pub fn model_name(&self) -> &str {
        &self.model_name
    }
}
