//! Simulated LLM for testing
//!
//! Returns canned responses without requiring external API calls.

/// Simulated LLM provider for testing
pub struct SimulatedLlm {
    model_name: String,
}

impl SimulatedLlm {
    /// Create a new simulated LLM
    pub fn new(model_name: String) -> anyhow::Result<Self> {
        Ok(Self { model_name })
    }

    /// Generate a simulated response
    pub async fn generate(&self, _system: &str, prompt: &str) -> anyhow::Result<String> {
        // Extract the question from the prompt if present
        let question = prompt
            .split("問題：")
            .nth(1)
            .or_else(|| prompt.split("Question:").nth(1))
            .and_then(|s| s.lines().next())
            .map(|s| s.trim())
            .unwrap_or("your question");

        let has_context = prompt.contains("段落1：");

        let response = if has_context {
            format!(
                "根據提供的段落，以下是對「{question}」的回答：\
                 相關內容出現在檢索到的段落中。\
                 （simulated response, model: {}）",
                self.model_name
            )
        } else {
            format!(
                "沒有可用的段落，無法依據文件回答「{question}」。\
                 （simulated response, model: {}）",
                self.model_name
            )
        };

        Ok(response)
    }
}
