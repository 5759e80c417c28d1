//! Retrieval and text processing for the otvet question-answering service
//!
//! This crate provides the file-backed vector store, the deterministic
//! hash-feature embedder, corpus indexing, and the prompt-construction and
//! answer-extraction logic around the generation call.

mod answer;
mod embed;
mod indexer;
mod prompt;
mod store;

pub use answer::{AnswerExtractor, NOT_FOUND_ANSWER};
pub use embed::HashEmbedder;
pub use indexer::{MAX_CHUNK_CHARS, index_corpus};
pub use prompt::{MAX_CONTEXT_CHARS, PromptBuilder};
pub use store::FileVectorStore;

// Re-export core types for convenience
pub use otvet_core::{Chunk, Embedder, Error, Result, Retriever, SearchConfig};
