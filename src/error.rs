//! Error types for extraction, embedding and request handling.

use thiserror::Error;

/// Failure to turn raw file bytes into text or a table.
#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF parse error: {0}")]
    Pdf(String),

    #[error("CSV parse error: {0}")]
    Csv(String),

    #[error("CSV input has no header row")]
    EmptyCsv,
}

impl From<lopdf::Error> for ExtractionError {
    fn from(err: lopdf::Error) -> Self {
        ExtractionError::Pdf(err.to_string())
    }
}

impl From<csv::Error> for ExtractionError {
    fn from(err: csv::Error) -> Self {
        ExtractionError::Csv(err.to_string())
    }
}

/// Failure inside the embedding model or its contract checks.
#[derive(Error, Debug)]
pub enum EmbeddingError {
    #[error("Failed to initialize embedding model: {0}")]
    ModelInit(String),

    #[error("Unknown embedding model '{0}'")]
    UnknownModel(String),

    #[error("Failed to generate embeddings: {0}")]
    Generation(String),

    #[error("Embedding count mismatch: sent {expected} texts, received {actual} vectors")]
    CountMismatch { expected: usize, actual: usize },

    #[error("Embedding dimension mismatch at position {index}: expected {expected}, got {actual}")]
    DimensionMismatch {
        index: usize,
        expected: usize,
        actual: usize,
    },
}

/// Request-level failure reported to the front end.
#[derive(Error, Debug)]
pub enum ProcessingError {
    #[error("Unsupported file type: {0}")]
    UnsupportedType(String),

    #[error("Could not extract data from the document: {0}")]
    NoData(#[from] ExtractionError),

    #[error("Could not extract data from the document: no text found")]
    EmptyDocument,

    #[error(transparent)]
    Embedding(#[from] EmbeddingError),

    #[error("Query must not be empty")]
    EmptyQuery,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ProcessingError {
    /// True when the document itself yielded nothing usable.
    pub fn is_no_data(&self) -> bool {
        matches!(
            self,
            ProcessingError::NoData(_) | ProcessingError::EmptyDocument
        )
    }
}

pub type ProcessingResult<T> = Result<T, ProcessingError>;
