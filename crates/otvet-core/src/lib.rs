//! Core traits and types for otvet
//!
//! This crate defines the fundamental traits and types used across the
//! question-answering service: the shared error type, the LLM provider
//! interface, and the retrieval/embedding seams. Keeping the seams here
//! makes the pipeline test-friendly and the backends replaceable.

pub mod embed;
pub mod error;
pub mod llm;
pub mod store;

pub use embed::Embedder;
pub use error::{Error, Result};
pub use llm::{GenerationConfig, LlmProvider};
pub use store::{Chunk, Retriever, SearchConfig};
