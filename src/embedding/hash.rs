//! Model-free generator based on feature hashing.

use sha2::{Digest, Sha256};

use super::EmbeddingGenerator;
use crate::document::Embedding;
use crate::error::EmbeddingError;

/// Signed feature hashing of lowercase word tokens, L2-normalised.
///
/// Deterministic and dependency-free at runtime. Texts sharing words get
/// positive cosine similarity, which is enough for offline runs and tests.
#[derive(Debug, Clone)]
pub struct HashEmbeddingGenerator {
    dimension: usize,
    model_name: String,
}

impl HashEmbeddingGenerator {
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension: dimension.max(1),
            model_name: format!("hash-{}", dimension.max(1)),
        }
    }

    fn embed_one(&self, text: &str) -> Embedding {
        let mut vector = vec![0.0f32; self.dimension];

        for token in text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
        {
            let digest = Sha256::digest(token.to_lowercase().as_bytes());
            let mut bucket = [0u8; 8];
            bucket.copy_from_slice(&digest[..8]);
            let hash = u64::from_le_bytes(bucket);

            let index = (hash % self.dimension as u64) as usize;
            let sign = if digest[8] & 1 == 0 { 1.0 } else { -1.0 };
            vector[index] += sign;
        }

        let norm = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            vector.iter_mut().for_each(|x| *x /= norm);
        }
        vector
    }
}

impl Default for HashEmbeddingGenerator {
    fn default() -> Self {
        Self::new(384)
    }
}

impl EmbeddingGenerator for HashEmbeddingGenerator {
    fn generate_embeddings(&self, texts: &[&str]) -> Result<Vec<Embedding>, EmbeddingError> {
        Ok(texts.iter().map(|t| self.embed_one(t)).collect())
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}
