//! Answer extraction from raw generated text

use std::sync::LazyLock;

use regex::Regex;

/// Fixed answer when the model produced nothing usable
pub const NOT_FOUND_ANSWER: &str = "Информация не найдена.";

// Street/building/name abbreviations common in the corpus; a period after
// one of these does not end a sentence
const ABBREVIATIONS: [&str; 10] = [
    "г.", "ул.", "пр.", "д.", "стр.", "корп.", "к.", "им.", "т.", "п.",
];

// Candidate sentence boundaries: terminal punctuation followed by whitespace
static BOUNDARY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]\s+").expect("valid boundary pattern"));

/// Extracts the final one-sentence answer from a generated continuation
///
/// The inference endpoint echoes the prompt back followed by the
/// continuation, so extraction first slices the prompt prefix off, then
/// keeps the first sentence and normalizes terminal punctuation.
pub struct AnswerExtractor;

impl AnswerExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Extract the first sentence of the continuation
    ///
    /// An empty continuation (the prompt echoed back verbatim with nothing
    /// appended) yields the fixed not-found answer rather than a failure.
    pub fn extract(&self, raw: &str, prompt: &str) -> String {
        let continuation = strip_prompt_prefix(raw, prompt);

        let first = first_sentence(continuation).trim();
        if first.is_empty() {
            return NOT_FOUND_ANSWER.to_string();
        }

        let mut answer = first.to_string();
        if !matches!(answer.chars().last(), Some('.' | '!' | '?')) {
            answer.push('.');
        }
        answer
    }
}

impl Default for AnswerExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Slice the echoed prompt off the front of the raw text
///
/// Exact prefix match is the expected case. If the backend altered the echo,
/// fall back to the original length-based slice: skip as many characters as
/// the prompt has. That slice silently misaligns when the echo differs — a
/// documented contract risk, not something to guess around.
fn strip_prompt_prefix<'a>(raw: &'a str, prompt: &str) -> &'a str {
    match raw.strip_prefix(prompt) {
        Some(rest) => rest,
        None => skip_chars(raw, prompt.chars().count()),
    }
}

fn skip_chars(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((idx, _)) => &s[idx..],
        None => "",
    }
}

/// Text up to and including the first real sentence boundary
///
/// A boundary candidate is vetoed when the text before it ends in an
/// abbreviation, a two-letter capitalized abbreviation, or a digit directly
/// before the period. With no surviving boundary the whole text is one
/// sentence.
fn first_sentence(text: &str) -> &str {
    for m in BOUNDARY_RE.find_iter(text) {
        // The punctuation class is ASCII, so the boundary char is one byte
        let head = &text[..m.start() + 1];
        if is_suppressed_boundary(head) {
            continue;
        }
        return head;
    }
    text
}

fn is_suppressed_boundary(head: &str) -> bool {
    // Only periods participate in abbreviations
    if !head.ends_with('.') {
        return false;
    }

    if ABBREVIATIONS.iter().any(|abbr| head.ends_with(abbr)) {
        return true;
    }

    let before = &head[..head.len() - 1];
    let mut rev = before.chars().rev();
    let last = rev.next();
    let second_last = rev.next();

    // Numeric period, e.g. "17." inside "17.1 млн"
    if last.is_some_and(|c| c.is_ascii_digit()) {
        return true;
    }

    // Capitalized two-letter abbreviation, e.g. "См."
    if let (Some(lo), Some(up)) = (last, second_last) {
        if ('А'..='Я').contains(&up) && ('а'..='я').contains(&lo) {
            return true;
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROMPT: &str = "### Задача ###\nВопрос: тест\nОтвет: [/INST]</s>";

    fn raw(continuation: &str) -> String {
        format!("{PROMPT}{continuation}")
    }

    #[test]
    fn keeps_only_first_sentence() {
        let extractor = AnswerExtractor::new();
        let result = extractor.extract(&raw("Answer. Second sentence."), PROMPT);
        assert_eq!(result, "Answer.");
    }

    #[test]
    fn appends_terminal_period() {
        let extractor = AnswerExtractor::new();
        let result = extractor.extract(&raw("Информация не найдена"), PROMPT);
        assert_eq!(result, "Информация не найдена.");
    }

    #[test]
    fn preserves_existing_terminal_punctuation() {
        let extractor = AnswerExtractor::new();
        let result = extractor.extract(&raw("Неужели?"), PROMPT);
        assert_eq!(result, "Неужели?");
    }

    #[test]
    fn empty_continuation_falls_back_to_not_found() {
        // Prompt echoed back verbatim with nothing appended
        let extractor = AnswerExtractor::new();
        let result = extractor.extract(PROMPT, PROMPT);
        assert_eq!(result, NOT_FOUND_ANSWER);
    }

    #[test]
    fn whitespace_continuation_falls_back_to_not_found() {
        let extractor = AnswerExtractor::new();
        let result = extractor.extract(&raw("   \n "), PROMPT);
        assert_eq!(result, NOT_FOUND_ANSWER);
    }

    #[test]
    fn raw_shorter_than_prompt_falls_back_to_not_found() {
        let extractor = AnswerExtractor::new();
        let result = extractor.extract("truncated echo", PROMPT);
        assert_eq!(result, NOT_FOUND_ANSWER);
    }

    #[test]
    fn street_abbreviations_do_not_split() {
        let extractor = AnswerExtractor::new();
        let result = extractor.extract(&raw("См. ул. Ленина. Далее текст."), PROMPT);
        assert_eq!(result, "См. ул. Ленина.");
    }

    #[test]
    fn numeric_period_does_not_split() {
        let extractor = AnswerExtractor::new();
        let result = extractor.extract(&raw("Площадь 17. 1 млн км² велика. Вторая."), PROMPT);
        assert_eq!(result, "Площадь 17. 1 млн км² велика.");
    }

    #[test]
    fn year_abbreviation_does_not_split() {
        let extractor = AnswerExtractor::new();
        let result = extractor.extract(&raw("В 2020 г. построен новый музей. Вторая фраза."), PROMPT);
        assert_eq!(result, "В 2020 г. построен новый музей.");
    }

    #[test]
    fn continuation_with_leading_whitespace_is_trimmed() {
        let extractor = AnswerExtractor::new();
        let result = extractor.extract(&raw("\nМосква — столица России. Ещё текст."), PROMPT);
        assert_eq!(result, "Москва — столица России.");
    }

    #[test]
    fn exclamation_boundary_splits() {
        let extractor = AnswerExtractor::new();
        let result = extractor.extract(&raw("Это точно! Не сомневайтесь."), PROMPT);
        assert_eq!(result, "Это точно!");
    }
}
