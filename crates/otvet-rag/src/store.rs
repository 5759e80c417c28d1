//! File-backed vector store

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use otvet_core::{Chunk, Embedder, Error, Result, Retriever, SearchConfig};

const INDEX_FILE: &str = "index.json";

#[derive(Serialize, Deserialize)]
struct IndexData {
    dimension: usize,
    chunks: Vec<Chunk>,
}

/// Vector store persisted as a JSON index inside a directory
///
/// The artifact is produced by this system (`index_corpus`), so loading it
/// is trusted deserialization of a local file. Loading happens once at
/// process startup; afterwards the store is read-only shared state.
#[derive(Debug)]
pub struct FileVectorStore<E: Embedder> {
    embedder: E,
    dimension: usize,
    chunks: Vec<Chunk>,
}

impl<E: Embedder> FileVectorStore<E> {
    /// Create an empty store for the given embedder
    pub fn create(embedder: E) -> Self {
        let dimension = embedder.dimension();
        Self {
            embedder,
            dimension,
            chunks: Vec::new(),
        }
    }

    /// Load a persisted index from a directory
    ///
    /// Fails if the directory or index file is missing, the JSON does not
    /// parse, or the persisted dimension differs from the embedder's. The
    /// caller treats any of these as a fatal startup error.
    pub fn load(dir: &Path, embedder: E) -> Result<Self> {
        let index_path = dir.join(INDEX_FILE);
        if !index_path.exists() {
            return Err(Error::VectorStore(format!(
                "index file not found: {}",
                index_path.display()
            )));
        }

        let content = fs::read_to_string(&index_path)?;
        let data: IndexData = serde_json::from_str(&content).map_err(|e| {
            Error::VectorStore(format!(
                "incompatible index format in {}: {}",
                index_path.display(),
                e
            ))
        })?;

        if data.dimension != embedder.dimension() {
            return Err(Error::VectorStore(format!(
                "index dimension {} does not match embedder dimension {}",
                data.dimension,
                embedder.dimension()
            )));
        }

        Ok(Self {
            embedder,
            dimension: data.dimension,
            chunks: data.chunks,
        })
    }

    /// Persist the index into a directory, creating it if needed
    pub fn save(&self, dir: &Path) -> Result<()> {
        fs::create_dir_all(dir)?;
        let data = IndexData {
            dimension: self.dimension,
            chunks: self.chunks.clone(),
        };
        let content = serde_json::to_string_pretty(&data)
            .map_err(|e| Error::Serialization(e.to_string()))?;
        fs::write(dir.join(INDEX_FILE), content)?;
        Ok(())
    }

    /// Embed and add a chunk, replacing any existing chunk with the same id
    pub fn add(&mut self, id: String, content: String, metadata: serde_json::Value) -> Result<()> {
        let embedding = self.embedder.embed(&content)?;
        self.chunks.retain(|chunk| chunk.id != id);
        self.chunks.push(Chunk {
            id,
            content,
            embedding,
            metadata,
            score: None,
        });
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Search for the chunks most similar to the query
    pub fn search(&self, query: &str, config: &SearchConfig) -> Result<Vec<Chunk>> {
        let query_embedding = self.embedder.embed(query)?;

        let mut scored: Vec<(f32, &Chunk)> = self
            .chunks
            .iter()
            .map(|chunk| {
                (
                    cosine_similarity(&query_embedding, &chunk.embedding),
                    chunk,
                )
            })
            .collect();

        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));

        let results = scored
            .into_iter()
            .filter(|(score, _)| {
                config
                    .score_threshold
                    .map_or(true, |threshold| *score >= threshold)
            })
            .take(config.top_k)
            .map(|(score, chunk)| {
                let mut chunk = chunk.clone();
                chunk.score = Some(score);
                chunk
            })
            .collect();

        Ok(results)
    }
}

impl<E: Embedder> Retriever for FileVectorStore<E> {
    fn retrieve(&self, query: &str, config: &SearchConfig) -> Result<Vec<Chunk>> {
        self.search(query, config)
    }
}

/// Cosine similarity between two vectors
fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let magnitude_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let magnitude_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if magnitude_a == 0.0 || magnitude_b == 0.0 {
        return 0.0;
    }

    dot / (magnitude_a * magnitude_b)
}
