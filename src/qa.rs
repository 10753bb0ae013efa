//! QA engine - retrieval-augmented answering
//!
//! Bridges the retriever and the LLM collaborator: retrieved fragments
//! become numbered paragraphs in the prompt, and the answer cites the
//! paragraph numbers. Retrieval coming back empty (including after a
//! backend failure) produces a fixed no-content answer, never an error.

use tracing::warn;

use crate::assemble::build_context;
use crate::config::Config;
use crate::error::RetrievalError;
use crate::llm::LlmProvider;
use crate::retriever::Retriever;

/// Instructions prepended to every answer prompt
const SYSTEM_PROMPT: &str = "你是一個專業的文件問答助手。\n\
1. 請仔細分析所有提供的段落\n\
2. 綜合所有相關信息提供完整答案\n\
3. 引用具體的段落編號說明信息來源\n\
4. 如果不同段落有互補信息，請整合在一起\n\
5. 對於模糊匹配的內容，請說明相關度和可信度";

/// Answer returned when no usable passage was retrieved
const NO_CONTENT_ANSWER: &str = "抱歉，找不到相關資訊。";

/// Question answering over one ingested document
pub struct QaEngine {
    retriever: Retriever,
    llm: LlmProvider,
}

impl QaEngine {
    pub fn new(retriever: Retriever, llm: LlmProvider) -> Self {
        Self { retriever, llm }
    }

    /// Engine over the lexical backend, wired from a loaded
    /// configuration (see [`Config::load`])
    pub fn from_config(config: &Config, llm: LlmProvider) -> Self {
        Self::new(Retriever::from_config(config), llm)
    }

    /// Ingest an extracted document, replacing any previous one
    ///
    /// A backend failure leaves the engine answering "no relevant
    /// content" instead of erroring; malformed input still propagates.
    pub async fn ingest(
        &mut self,
        page_texts: &[String],
        source_tags: &[i64],
    ) -> anyhow::Result<usize> {
        match self.retriever.ingest(page_texts, source_tags).await {
            Ok(count) => Ok(count),
            Err(RetrievalError::BackendUnavailable(err)) => {
                warn!("Similarity backend failed during ingestion: {err:#}");
                Ok(0)
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Answer a question, returning the answer text and the source tags
    /// of the passages it was grounded on
    pub async fn answer(&self, question: &str) -> (String, Vec<i64>) {
        let context = match self.retriever.get_context(question).await {
            Ok(context) => context,
            Err(err) => {
                warn!("Retrieval failed: {}", err);
                return (NO_CONTENT_ANSWER.to_string(), Vec::new());
            }
        };

        if context.is_empty() {
            return (NO_CONTENT_ANSWER.to_string(), Vec::new());
        }

        let prompt = format!(
            "根據以下內容回答問題：\n\n{}\n\n問題：{}",
            build_context(&context),
            question
        );

        match self.llm.generate(SYSTEM_PROMPT, &prompt).await {
            Ok(answer) => (answer, context.source_tags),
            Err(err) => (format!("生成答案時發生錯誤: {}", err), Vec::new()),
        }
    }
}
