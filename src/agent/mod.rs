//! Question answering over an extracted document.

mod retrieval;

pub use retrieval::{RetrievalAgent, RetrievalConfig, RetrievedPassage, rank_passages};

use crate::document::ExtractedDocument;
use crate::error::ProcessingResult;
use crate::processor::DocumentProcessor;

/// Answers a query about one document.
///
/// Implementations receive the session's processor so they can chunk and
/// embed with the same configuration and model the session was built with.
pub trait Agent: Send + Sync {
    fn analyze(
        &self,
        document: &ExtractedDocument,
        query: &str,
        processor: &DocumentProcessor,
    ) -> ProcessingResult<String>;
}
