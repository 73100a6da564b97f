//! Document question answering over PDF and CSV files.
//!
//! The ingestion pipeline is extract → chunk → embed; an [`Agent`] consumes
//! the result and answers a free-text query.

pub mod agent;
pub mod chunking;
pub mod cli;
pub mod config;
pub mod document;
pub mod embedding;
pub mod error;
pub mod extract;
pub mod logging;
pub mod processor;
pub mod session;

pub use agent::{Agent, RetrievalAgent};
pub use chunking::{ChunkingConfig, RowChunker, TextChunker};
pub use config::Settings;
pub use document::{CellValue, Chunk, Column, DocumentKind, Embedding, ExtractedDocument, Table, TableBundle};
pub use embedding::{Embedder, EmbedderConfig, EmbeddingGenerator, FastEmbedGenerator, HashEmbeddingGenerator};
pub use error::{EmbeddingError, ExtractionError, ProcessingError};
pub use processor::DocumentProcessor;
pub use session::Session;
