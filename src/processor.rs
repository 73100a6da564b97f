//! Ingestion façade: extraction, chunking and embedding behind one type.

use std::io::Read;

use crate::chunking::ChunkingConfig;
use crate::document::{Chunk, DocumentKind, Embedding, ExtractedDocument, Table, TableBundle};
use crate::embedding::{Embedder, EmbedderConfig, EmbeddingGenerator};
use crate::error::{EmbeddingError, ExtractionError};
use crate::extract;

/// Holds the chunking limits and the loaded embedding model.
///
/// Stateless after construction apart from the model handle, which is only
/// used for inference. Create one per session.
#[derive(Debug)]
pub struct DocumentProcessor {
    chunking: ChunkingConfig,
    embedder: Embedder,
}

impl DocumentProcessor {
    /// Load the embedding model and keep the chunking limits.
    pub fn new(chunking: ChunkingConfig, embedding: &EmbedderConfig) -> Result<Self, EmbeddingError> {
        Ok(Self {
            chunking,
            embedder: Embedder::new(embedding)?,
        })
    }

    /// Build around an already constructed generator.
    pub fn with_generator(
        chunking: ChunkingConfig,
        generator: Box<dyn EmbeddingGenerator>,
        batch_size: usize,
    ) -> Self {
        Self {
            chunking,
            embedder: Embedder::with_generator(generator, batch_size),
        }
    }

    pub fn read_pdf<R: Read>(&self, reader: R) -> Result<String, ExtractionError> {
        extract::read_pdf(reader)
    }

    pub fn read_csv<R: Read>(&self, reader: R) -> Result<TableBundle, ExtractionError> {
        extract::read_csv(reader)
    }

    pub fn extract<R: Read>(&self, kind: DocumentKind, reader: R) -> Result<ExtractedDocument, ExtractionError> {
        extract::extract(kind, reader)
    }

    /// Chunk text with the configured `chunk_size`.
    pub fn chunk_text(&self, text: &str) -> Vec<Chunk> {
        self.chunking.text_chunker().chunk(text)
    }

    /// Chunk a table with the configured `row_chunk_size`.
    pub fn chunk_csv(&self, table: &Table) -> Vec<Chunk> {
        self.chunking.row_chunker().chunk(table)
    }

    /// Chunk whichever form the document took.
    pub fn chunk_document(&self, document: &ExtractedDocument) -> Vec<Chunk> {
        match document {
            ExtractedDocument::Text(text) => self.chunk_text(text),
            ExtractedDocument::Table(bundle) => self.chunk_csv(&bundle.table),
        }
    }

    pub fn embed_chunks(&self, chunks: &[Chunk]) -> Result<Vec<Embedding>, EmbeddingError> {
        self.embedder.embed_chunks(chunks)
    }

    pub fn embed_query(&self, query: &str) -> Result<Embedding, EmbeddingError> {
        self.embedder.embed_query(query)
    }
}
