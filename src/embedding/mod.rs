//! Chunk embedding.
//!
//! [`Embedder`] maps an ordered chunk list to an ordered vector list through
//! an [`EmbeddingGenerator`]. The output always has one vector per chunk, in
//! input order; any failure aborts the whole call.

mod hash;
mod model;

pub use self::hash::HashEmbeddingGenerator;
pub use self::model::{FastEmbedGenerator, parse_model, supported_models};

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::document::{Chunk, Embedding};
use crate::error::EmbeddingError;

/// Produces fixed-length vectors for text.
pub trait EmbeddingGenerator: Send + Sync {
    /// One vector per input text, in input order.
    fn generate_embeddings(&self, texts: &[&str]) -> Result<Vec<Embedding>, EmbeddingError>;

    /// Length of every produced vector.
    fn dimension(&self) -> usize;

    /// Model identifier for logs and metadata.
    fn model_name(&self) -> &str;
}

/// Which generator to construct.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbeddingBackend {
    /// Pretrained ONNX sentence-embedding model.
    #[default]
    FastEmbed,
    /// Feature hashing over word tokens. No model download.
    Hash,
}

/// Embedding configuration, fixed at construction time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedderConfig {
    #[serde(default)]
    pub backend: EmbeddingBackend,

    /// Model name, e.g. "AllMiniLML6V2".
    #[serde(default = "default_model")]
    pub model: String,

    /// Texts per model call.
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Model cache directory. Defaults to the user cache dir.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_dir: Option<PathBuf>,

    #[serde(default = "default_true")]
    pub show_download_progress: bool,

    /// Vector length for the hash backend.
    #[serde(default = "default_hash_dimension")]
    pub hash_dimension: usize,
}

fn default_model() -> String {
    "AllMiniLML6V2".to_string()
}

fn default_batch_size() -> usize {
    64
}

fn default_true() -> bool {
    true
}

fn default_hash_dimension() -> usize {
    384
}

impl Default for EmbedderConfig {
    fn default() -> Self {
        Self {
            backend: EmbeddingBackend::default(),
            model: default_model(),
            batch_size: default_batch_size(),
            cache_dir: None,
            show_download_progress: default_true(),
            hash_dimension: default_hash_dimension(),
        }
    }
}

impl EmbedderConfig {
    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), String> {
        if self.batch_size == 0 {
            return Err("embedding.batch_size must be greater than 0".to_string());
        }
        if self.backend == EmbeddingBackend::Hash && self.hash_dimension == 0 {
            return Err("embedding.hash_dimension must be greater than 0".to_string());
        }
        if self.backend == EmbeddingBackend::FastEmbed && parse_model(&self.model).is_err() {
            return Err(format!(
                "embedding.model '{}' is not supported (expected one of: {})",
                self.model,
                supported_models().join(", ")
            ));
        }
        Ok(())
    }

    /// Cache directory for downloaded model files.
    pub fn effective_cache_dir(&self) -> PathBuf {
        self.cache_dir.clone().unwrap_or_else(|| {
            dirs::cache_dir()
                .unwrap_or_else(std::env::temp_dir)
                .join("docqa")
                .join("models")
        })
    }

    /// Construct the configured generator.
    pub fn build_generator(&self) -> Result<Box<dyn EmbeddingGenerator>, EmbeddingError> {
        match self.backend {
            EmbeddingBackend::FastEmbed => Ok(Box::new(FastEmbedGenerator::new(
                &self.model,
                self.effective_cache_dir(),
                self.show_download_progress,
            )?)),
            EmbeddingBackend::Hash => Ok(Box::new(HashEmbeddingGenerator::new(self.hash_dimension))),
        }
    }
}

/// Owns the embedding model for the lifetime of a session.
pub struct Embedder {
    generator: Box<dyn EmbeddingGenerator>,
    batch_size: usize,
}

impl std::fmt::Debug for Embedder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Embedder")
            .field("model", &self.generator.model_name())
            .field("dimension", &self.generator.dimension())
            .field("batch_size", &self.batch_size)
            .finish()
    }
}

impl Embedder {
    /// Load the model described by `config`.
    pub fn new(config: &EmbedderConfig) -> Result<Self, EmbeddingError> {
        let generator = config.build_generator()?;
        Ok(Self::with_generator(generator, config.batch_size))
    }

    /// Wrap an existing generator.
    pub fn with_generator(generator: Box<dyn EmbeddingGenerator>, batch_size: usize) -> Self {
        Self {
            generator,
            batch_size: batch_size.max(1),
        }
    }

    pub fn dimension(&self) -> usize {
        self.generator.dimension()
    }

    /// Embed every chunk, preserving order.
    ///
    /// Returns exactly `chunks.len()` vectors of [`Self::dimension`] length,
    /// or an error if any batch fails or violates that contract.
    pub fn embed_chunks(&self, chunks: &[Chunk]) -> Result<Vec<Embedding>, EmbeddingError> {
        let texts: Vec<&str> = chunks.iter().map(Chunk::as_str).collect();
        self.embed_texts(&texts).inspect_err(|e| {
            tracing::warn!(target: "embedding", "embedding {} chunks failed: {e}", chunks.len());
        })
    }

    /// Embed a single query string.
    pub fn embed_query(&self, query: &str) -> Result<Embedding, EmbeddingError> {
        let mut vectors = self.embed_texts(&[query])?;
        vectors.pop().ok_or(EmbeddingError::CountMismatch {
            expected: 1,
            actual: 0,
        })
    }

    fn embed_texts(&self, texts: &[&str]) -> Result<Vec<Embedding>, EmbeddingError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let dimension = self.generator.dimension();
        let mut embeddings = Vec::with_capacity(texts.len());

        for (batch_index, batch) in texts.chunks(self.batch_size).enumerate() {
            let offset = batch_index * self.batch_size;
            let vectors = self.generator.generate_embeddings(batch)?;

            if vectors.len() != batch.len() {
                return Err(EmbeddingError::CountMismatch {
                    expected: batch.len(),
                    actual: vectors.len(),
                });
            }
            if let Some((i, v)) = vectors.iter().enumerate().find(|(_, v)| v.len() != dimension) {
                return Err(EmbeddingError::DimensionMismatch {
                    index: offset + i,
                    expected: dimension,
                    actual: v.len(),
                });
            }

            tracing::trace!(
                target: "embedding",
                "batch {batch_index}: {} texts embedded",
                batch.len()
            );
            embeddings.extend(vectors);
        }

        tracing::debug!(
            target: "embedding",
            "embedded {} texts with {} ({dimension} dims)",
            embeddings.len(),
            self.generator.model_name()
        );

        Ok(embeddings)
    }
}

/// Cosine similarity between two vectors. Zero-length vectors score 0.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let magnitude_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let magnitude_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if magnitude_a == 0.0 || magnitude_b == 0.0 {
        return 0.0;
    }

    dot_product / (magnitude_a * magnitude_b)
}
