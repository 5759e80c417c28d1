//! Embedding trait

use crate::Result;

/// Trait for text embedding models
///
/// An embedder turns text into a fixed-dimension vector. The persisted
/// index records the dimension it was built with; a store refuses to load
/// against an embedder of a different dimension.
pub trait Embedder: Send + Sync {
    /// Embed a piece of text into a vector
    fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// The dimension of the vectors this embedder produces
    fn dimension(&self) -> usize;
}
