//! One user's request flow: detect, extract, analyze.
//!
//! A [`Session`] owns its processor and agent, so concurrent users get
//! separate model handles and nothing is shared between them. Loading a
//! document needs no model and is available as free functions.

use std::io::Read;
use std::path::Path;

use crate::agent::{Agent, RetrievalAgent};
use crate::config::Settings;
use crate::document::{DocumentKind, ExtractedDocument};
use crate::error::{ProcessingError, ProcessingResult};
use crate::extract;
use crate::processor::DocumentProcessor;

/// Extract a document, treating an empty PDF text as no data.
pub fn load_document<R: Read>(kind: DocumentKind, reader: R) -> ProcessingResult<ExtractedDocument> {
    non_empty(extract::extract(kind, reader)?)
}

/// Open `path` and extract it as `kind`.
pub fn load_file(kind: DocumentKind, path: &Path) -> ProcessingResult<ExtractedDocument> {
    non_empty(extract::extract_file(kind, path)?)
}

fn non_empty(document: ExtractedDocument) -> ProcessingResult<ExtractedDocument> {
    if let ExtractedDocument::Text(text) = &document
        && text.is_empty()
    {
        tracing::warn!(target: "session", "PDF contained no extractable text");
        return Err(ProcessingError::EmptyDocument);
    }
    Ok(document)
}

pub struct Session {
    processor: DocumentProcessor,
    agent: Box<dyn Agent>,
}

impl Session {
    /// Build a session from settings, loading the embedding model.
    pub fn from_settings(settings: &Settings) -> ProcessingResult<Self> {
        settings.validate().map_err(ProcessingError::InvalidConfig)?;
        let processor = DocumentProcessor::new(settings.chunking.clone(), &settings.embedding)?;
        let agent = RetrievalAgent::new(settings.retrieval.clone());
        Ok(Self::new(processor, Box::new(agent)))
    }

    pub fn new(processor: DocumentProcessor, agent: Box<dyn Agent>) -> Self {
        Self { processor, agent }
    }

    /// Answer `query` about the document read from `reader`.
    pub fn ask<R: Read>(&self, kind: DocumentKind, reader: R, query: &str) -> ProcessingResult<String> {
        check_query(query)?;
        let document = load_document(kind, reader)?;
        self.analyze(&document, query)
    }

    /// Answer `query` about the file at `path`, read as `kind`.
    pub fn ask_file(&self, path: &Path, kind: DocumentKind, query: &str) -> ProcessingResult<String> {
        check_query(query)?;
        let document = load_file(kind, path)?;
        self.analyze(&document, query)
    }

    fn analyze(&self, document: &ExtractedDocument, query: &str) -> ProcessingResult<String> {
        tracing::info!(
            target: "session",
            "analyzing {} document ({} chars)",
            document.kind(),
            document.text().len()
        );
        self.agent.analyze(document, query, &self.processor)
    }
}

fn check_query(query: &str) -> ProcessingResult<()> {
    if query.trim().is_empty() {
        return Err(ProcessingError::EmptyQuery);
    }
    Ok(())
}
