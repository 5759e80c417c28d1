//! Prompt construction for the generation endpoint

use std::sync::LazyLock;

use regex::Regex;

use otvet_core::Chunk;

/// Hard cap on the joined context, in characters
pub const MAX_CONTEXT_CHARS: usize = 2000;

// Indexing artifacts like `doc_42` must never reach the model
static MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"doc_\d+").expect("valid marker pattern"));

/// Builds the fixed instruction prompt around retrieved chunks and a query
///
/// Deterministic: the same query and chunks always yield the same prompt.
pub struct PromptBuilder;

impl PromptBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Strip artifact markers and surrounding whitespace from chunk text
    pub fn clean_content(&self, text: &str) -> String {
        MARKER_RE.replace_all(text, "").trim().to_string()
    }

    /// Join cleaned chunks and truncate to the context budget
    ///
    /// The cutoff is by characters, not bytes, and not sentence-aware: a
    /// chunk may be cut mid-sentence, which is accepted behavior.
    pub fn build_context(&self, chunks: &[Chunk]) -> String {
        let cleaned: Vec<String> = chunks
            .iter()
            .map(|chunk| self.clean_content(&chunk.content))
            .collect();
        truncate_chars(&cleaned.join("\n"), MAX_CONTEXT_CHARS).to_string()
    }

    /// Interpolate the instruction template around the context and query
    pub fn build(&self, query: &str, chunks: &[Chunk]) -> String {
        let context = self.build_context(chunks);

        format!(
            "<s>[INST] <<SYS>>\n\
             Язык ответа: Русский.\n\
             Ты ассистент, отвечающий исключительно на основе предоставленных данных на русском языке. Строго соблюдай правила:\n\
             \n\
             1. Если ответа нет в данных → \"Информация не найдена\"\n\
             2. Только 1 предложение (50-100 символов) на русском языке.\n\
             3. Запрещено:\n\
             \x20 - Упоминать источники/документы\n\
             \x20 - Технические термины (doc_123, @sys)\n\
             \x20 - Маркированные списки\n\
             \x20 - Любые разделы кроме ответа\n\
             \x20 - Выдумывать ответы\n\
             \x20 - Повторять вопрос\n\
             <</SYS>>\n\
             \n\
             ### Контекст ###\n\
             {context}\n\
             \n\
             ### Примеры ###\n\
             Вопрос: Какая площадь России?\n\
             Ответ: 17.1 млн км².\n\
             \n\
             Вопрос: Сколько сейчас времени?\n\
             Ответ: Информация не найдена.\n\
             \n\
             ### Задача ###\n\
             Вопрос: {query}\n\
             Ответ: [/INST]</s>"
        )
    }
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Truncate to at most `max` characters, never splitting a code point
fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn chunk(content: &str) -> Chunk {
        Chunk {
            id: "test".to_string(),
            content: content.to_string(),
            embedding: Vec::new(),
            metadata: json!({}),
            score: Some(0.9),
        }
    }

    #[test]
    fn markers_are_stripped() {
        let builder = PromptBuilder::new();
        let chunks = vec![
            chunk("doc_1 Москва является столицей России doc_23"),
            chunk("В doc_456 городе живет много людей"),
        ];
        let context = builder.build_context(&chunks);
        assert!(!MARKER_RE.is_match(&context));
        assert!(context.contains("Москва является столицей России"));
        assert!(context.contains("В  городе живет много людей"));
    }

    #[test]
    fn context_is_capped_at_budget() {
        let builder = PromptBuilder::new();
        let chunks: Vec<Chunk> = (0..10)
            .map(|_| chunk(&"статья о географии России ".repeat(50)))
            .collect();
        let context = builder.build_context(&chunks);
        assert!(context.chars().count() <= MAX_CONTEXT_CHARS);
    }

    #[test]
    fn truncation_counts_characters_not_bytes() {
        // Cyrillic characters are two bytes each; a byte cutoff would halve
        // the budget or split a code point
        let builder = PromptBuilder::new();
        let chunks = vec![chunk(&"я".repeat(3000))];
        let context = builder.build_context(&chunks);
        assert_eq!(context.chars().count(), MAX_CONTEXT_CHARS);
    }

    #[test]
    fn prompt_contains_query_and_examples() {
        let builder = PromptBuilder::new();
        let prompt = builder.build("Где находится Кремль?", &[chunk("Кремль находится в Москве")]);

        assert!(prompt.contains("Вопрос: Где находится Кремль?"));
        assert!(prompt.contains("Какая площадь России?"));
        assert!(prompt.contains("Информация не найдена"));
        assert!(prompt.starts_with("<s>[INST] <<SYS>>"));
        assert!(prompt.ends_with("Ответ: [/INST]</s>"));
    }

    #[test]
    fn empty_chunks_yield_empty_context() {
        let builder = PromptBuilder::new();
        assert_eq!(builder.build_context(&[]), "");
    }
}
