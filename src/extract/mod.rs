//! Text extraction from uploaded PDF and CSV documents.
//!
//! Parser failures are logged under the `extract` target and returned as
//! [`ExtractionError`]; callers decide how to surface them.

mod csv;
mod pdf;
mod render;

pub use self::csv::read_csv;
pub use self::pdf::read_pdf;
pub use self::render::render_table;

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::document::{DocumentKind, ExtractedDocument};
use crate::error::ExtractionError;

/// Extract a document of a known kind from any reader.
pub fn extract<R: Read>(kind: DocumentKind, reader: R) -> Result<ExtractedDocument, ExtractionError> {
    match kind {
        DocumentKind::Pdf => read_pdf(reader).map(ExtractedDocument::Text),
        DocumentKind::Csv => read_csv(reader).map(ExtractedDocument::Table),
    }
}

/// Open `path` and extract it as `kind`.
pub fn extract_file(kind: DocumentKind, path: &Path) -> Result<ExtractedDocument, ExtractionError> {
    let file = File::open(path).inspect_err(|e| {
        tracing::warn!(target: "extract", "cannot open {}: {e}", path.display());
    })?;
    extract(kind, BufReader::new(file))
}
