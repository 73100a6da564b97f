use std::io::Read;

use lopdf::Document;

use crate::error::ExtractionError;

/// Read every page of a PDF in page order and return the trimmed text.
///
/// A page whose text cannot be extracted contributes nothing. Only a failure
/// to load the document itself is an error.
pub fn read_pdf<R: Read>(reader: R) -> Result<String, ExtractionError> {
    extract_pages(reader).inspect_err(|e| {
        tracing::warn!(target: "extract", "PDF processing error: {e}");
    })
}

fn extract_pages<R: Read>(mut reader: R) -> Result<String, ExtractionError> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;

    let document = Document::load_mem(&bytes)?;
    let pages = document.get_pages();

    let mut text = String::new();
    for page_number in pages.keys() {
        match document.extract_text(&[*page_number]) {
            Ok(page_text) => text.push_str(&page_text),
            Err(e) => {
                tracing::debug!(target: "extract", "page {page_number} yielded no text: {e}");
            }
        }
    }

    tracing::debug!(
        target: "extract",
        "extracted {} chars from {} pages",
        text.len(),
        pages.len()
    );

    Ok(text.trim().to_string())
}
