//! The question-answering pipeline

use std::sync::Arc;

use tracing::debug;

use otvet_core::{Error, GenerationConfig, LlmProvider, Result, Retriever, SearchConfig};
use otvet_rag::{AnswerExtractor, PromptBuilder};

/// Strings retrieval, prompt construction, generation and extraction
/// together into a single `answer` call
///
/// Holds the once-loaded retriever and the inference client behind their
/// seams; one retrieval and one outbound call per question, no retries.
pub struct QaEngine {
    retriever: Arc<dyn Retriever>,
    llm: Arc<dyn LlmProvider>,
    prompts: PromptBuilder,
    extractor: AnswerExtractor,
    search: SearchConfig,
}

impl QaEngine {
    pub fn new(retriever: Arc<dyn Retriever>, llm: Arc<dyn LlmProvider>) -> Self {
        Self {
            retriever,
            llm,
            prompts: PromptBuilder::new(),
            extractor: AnswerExtractor::new(),
            search: SearchConfig::default(),
        }
    }

    /// Answer a question in one sentence
    pub async fn answer(&self, question: &str) -> Result<String> {
        let question = question.trim();
        if question.is_empty() {
            return Err(Error::InvalidInput("question is empty".to_string()));
        }

        let chunks = self.retriever.retrieve(question, &self.search)?;
        debug!(retrieved = chunks.len(), "retrieved passages");

        let prompt = self.prompts.build(question, &chunks);
        let raw = self
            .llm
            .generate_with_config(&prompt, &GenerationConfig::default())
            .await?;

        Ok(self.extractor.extract(&raw, &prompt))
    }
}
