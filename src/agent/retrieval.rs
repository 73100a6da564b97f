use serde::{Deserialize, Serialize};

use super::Agent;
use crate::document::{Chunk, Embedding, ExtractedDocument};
use crate::embedding::cosine_similarity;
use crate::error::{ProcessingError, ProcessingResult};
use crate::processor::DocumentProcessor;

/// Retrieval settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievalConfig {
    /// Maximum passages in an answer.
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    /// Minimum cosine similarity for a passage to be included.
    #[serde(default = "default_threshold")]
    pub threshold: f32,
}

fn default_top_k() -> usize {
    4
}

fn default_threshold() -> f32 {
    0.0
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: default_top_k(),
            threshold: default_threshold(),
        }
    }
}

impl RetrievalConfig {
    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), String> {
        if self.top_k == 0 {
            return Err("retrieval.top_k must be greater than 0".to_string());
        }
        if !(-1.0..=1.0).contains(&self.threshold) {
            return Err(format!(
                "retrieval.threshold ({}) must be between -1.0 and 1.0",
                self.threshold
            ));
        }
        Ok(())
    }
}

/// A chunk selected for an answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievedPassage {
    /// Position of the chunk in the document's chunk sequence.
    pub position: usize,
    pub score: f32,
    pub content: String,
}

/// Score chunks against a query vector and keep the best `top_k`.
///
/// Results are ordered by descending score; equal scores keep document order.
/// Chunks and embeddings pair by position; any surplus on either side is
/// ignored.
pub fn rank_passages(
    chunks: &[Chunk],
    embeddings: &[Embedding],
    query: &[f32],
    config: &RetrievalConfig,
) -> Vec<RetrievedPassage> {
    if chunks.len() != embeddings.len() {
        tracing::warn!(
            target: "agent",
            "{} chunks but {} embeddings, ranking the common prefix",
            chunks.len(),
            embeddings.len()
        );
    }

    let mut scored: Vec<(usize, f32, &Chunk)> = chunks
        .iter()
        .zip(embeddings)
        .enumerate()
        .map(|(i, (chunk, e))| (i, cosine_similarity(query, e), chunk))
        .filter(|(_, score, _)| *score >= config.threshold)
        .collect();

    scored.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
    scored.truncate(config.top_k);

    scored
        .into_iter()
        .map(|(position, score, chunk)| RetrievedPassage {
            position,
            score,
            content: chunk.as_str().to_string(),
        })
        .collect()
}

/// Local agent: embeds the document, ranks chunks by similarity to the
/// query, and answers with the best matching passages.
#[derive(Debug, Clone, Default)]
pub struct RetrievalAgent {
    config: RetrievalConfig,
}

impl RetrievalAgent {
    pub fn new(config: RetrievalConfig) -> Self {
        Self { config }
    }

    /// Retrieve passages without formatting an answer.
    pub fn retrieve(
        &self,
        document: &ExtractedDocument,
        query: &str,
        processor: &DocumentProcessor,
    ) -> ProcessingResult<Vec<RetrievedPassage>> {
        let query = query.trim();
        if query.is_empty() {
            return Err(ProcessingError::EmptyQuery);
        }

        let chunks = processor.chunk_document(document);
        let embeddings = processor.embed_chunks(&chunks)?;
        let query_vector = processor.embed_query(query)?;

        let passages = rank_passages(&chunks, &embeddings, &query_vector, &self.config);

        tracing::debug!(
            target: "agent",
            "retrieved {} of {} chunks (top_k={}, threshold={})",
            passages.len(),
            chunks.len(),
            self.config.top_k,
            self.config.threshold
        );

        Ok(passages)
    }
}

impl Agent for RetrievalAgent {
    fn analyze(
        &self,
        document: &ExtractedDocument,
        query: &str,
        processor: &DocumentProcessor,
    ) -> ProcessingResult<String> {
        let passages = self.retrieve(document, query, processor)?;
        Ok(format_answer(query.trim(), &passages))
    }
}

fn format_answer(query: &str, passages: &[RetrievedPassage]) -> String {
    if passages.is_empty() {
        return format!("No passages in the document match the query \"{query}\".");
    }

    let mut answer = format!("Most relevant passages for \"{query}\":\n");
    for (rank, passage) in passages.iter().enumerate() {
        answer.push_str(&format!(
            "\n{}. [chunk {}, score {:.3}]\n{}\n",
            rank + 1,
            passage.position,
            passage.score,
            passage.content
        ));
    }
    answer
}
