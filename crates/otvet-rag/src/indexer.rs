//! Corpus indexing: plain-text files into a persisted vector store

use std::fs;
use std::path::Path;

use serde_json::json;
use tracing::info;

use otvet_core::{Embedder, Error, Result};

use crate::store::FileVectorStore;

/// Upper bound on chunk size, in characters
pub const MAX_CHUNK_CHARS: usize = 500;

/// Build a vector store from the `.txt` files in a corpus directory
///
/// Each file is split into paragraph-aligned chunks of at most
/// [`MAX_CHUNK_CHARS`] characters, embedded, and written to `store_dir`.
/// Returns the number of chunks indexed.
pub fn index_corpus<E: Embedder>(
    corpus_dir: &Path,
    store_dir: &Path,
    embedder: E,
) -> Result<usize> {
    if !corpus_dir.is_dir() {
        return Err(Error::InvalidInput(format!(
            "corpus directory not found: {}",
            corpus_dir.display()
        )));
    }

    let mut store = FileVectorStore::create(embedder);

    let mut entries: Vec<_> = fs::read_dir(corpus_dir)?
        .collect::<std::io::Result<Vec<_>>>()?
        .into_iter()
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "txt"))
        .collect();
    entries.sort();

    for path in &entries {
        let text = fs::read_to_string(path)?;
        let source = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default();

        let chunks = split_chunks(&text);
        let count = chunks.len();

        for (i, content) in chunks.into_iter().enumerate() {
            let id = format!("{:x}-{}", md5::compute(content.as_bytes()), i);
            store.add(id, content, json!({ "source": source, "chunk": i }))?;
        }

        info!(source = %source, chunks = count, "indexed file");
    }

    if store.is_empty() {
        return Err(Error::InvalidInput(format!(
            "no .txt files with content in {}",
            corpus_dir.display()
        )));
    }

    store.save(store_dir)?;
    info!(total = store.len(), store = %store_dir.display(), "store written");

    Ok(store.len())
}

/// Split text into paragraph-aligned chunks of bounded size
///
/// Paragraphs are packed together until the budget is reached; a paragraph
/// longer than the budget is split on whitespace.
fn split_chunks(text: &str) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();

    for paragraph in text.split("\n\n") {
        let paragraph = paragraph.trim();
        if paragraph.is_empty() {
            continue;
        }

        for piece in split_long_paragraph(paragraph) {
            let needed = piece.chars().count() + if current.is_empty() { 0 } else { 1 };
            if !current.is_empty() && current.chars().count() + needed > MAX_CHUNK_CHARS {
                chunks.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push('\n');
            }
            current.push_str(&piece);
        }
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}

fn split_long_paragraph(paragraph: &str) -> Vec<String> {
    if paragraph.chars().count() <= MAX_CHUNK_CHARS {
        return vec![paragraph.to_string()];
    }

    let mut pieces = Vec::new();
    let mut current = String::new();

    for word in paragraph.split_whitespace() {
        if !current.is_empty()
            && current.chars().count() + 1 + word.chars().count() > MAX_CHUNK_CHARS
        {
            pieces.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }

    if !current.is_empty() {
        pieces.push(current);
    }

    pieces
}
