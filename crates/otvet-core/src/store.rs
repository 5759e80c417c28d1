//! Retrieval trait and chunk types

use serde::{Deserialize, Serialize};

use crate::Result;

/// A text chunk stored in the vector index
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chunk {
    pub id: String,
    pub content: String,
    pub embedding: Vec<f32>,
    pub metadata: serde_json::Value,
    /// Similarity score, populated on search results
    pub score: Option<f32>,
}

/// Configuration for similarity search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    pub top_k: usize,
    pub score_threshold: Option<f32>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            top_k: 3,
            score_threshold: None,
        }
    }
}

/// Trait for similarity-based retrieval over an indexed corpus
///
/// Retrieval is local CPU work against an in-memory index loaded once at
/// startup, so the trait is synchronous and object-safe.
pub trait Retriever: Send + Sync {
    /// Return the chunks most similar to the query, best first
    fn retrieve(&self, query: &str, config: &SearchConfig) -> Result<Vec<Chunk>>;
}
