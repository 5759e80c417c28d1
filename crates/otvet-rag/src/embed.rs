//! Deterministic hash-feature embedder

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use otvet_core::{Embedder, Result};

/// Embedder that derives vectors from word-hash features
///
/// Each word contributes to three hash-selected dimensions with a weight
/// that decays by position, bigrams contribute one dimension each, and the
/// final vector is L2-normalized. The same text always produces the same
/// vector, so an index written by one process loads cleanly in another.
#[derive(Debug)]
pub struct HashEmbedder {
    dimension: usize,
}

impl HashEmbedder {
    pub const DIMENSION: usize = 384;

    pub fn new() -> Self {
        Self {
            dimension: Self::DIMENSION,
        }
    }

    fn hash_word(word: &str) -> u64 {
        let mut hasher = DefaultHasher::new();
        word.hash(&mut hasher);
        hasher.finish()
    }
}

impl Default for HashEmbedder {
    fn default() -> Self {
        Self::new()
    }
}

impl Embedder for HashEmbedder {
    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let normalized = text.to_lowercase();
        let words: Vec<&str> = normalized.split_whitespace().collect();

        let mut embedding = vec![0.0f32; self.dimension];

        for (pos, word) in words.iter().enumerate() {
            let hash = Self::hash_word(word);

            let idx1 = (hash % self.dimension as u64) as usize;
            let idx2 = ((hash >> 16) % self.dimension as u64) as usize;
            let idx3 = ((hash >> 32) % self.dimension as u64) as usize;

            // Earlier words get higher weight
            let position_weight = 1.0 / (pos as f32 + 1.0);

            embedding[idx1] += position_weight;
            embedding[idx2] += position_weight * 0.7;
            embedding[idx3] += position_weight * 0.5;
        }

        for pair in words.windows(2) {
            let bigram = format!("{} {}", pair[0], pair[1]);
            let idx = (Self::hash_word(&bigram) % self.dimension as u64) as usize;
            embedding[idx] += 0.8;
        }

        let magnitude: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
        if magnitude > 0.0 {
            for val in embedding.iter_mut() {
                *val /= magnitude;
            }
        }

        Ok(embedding)
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}
