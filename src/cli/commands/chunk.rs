//! Chunk command: extract a document and show how it would be split.
//!
//! No embedding model is loaded, so this works offline.

use std::path::Path;
use std::process::ExitCode;

use comfy_table::{ContentArrangement, Table, presets::UTF8_FULL_CONDENSED};
use serde::Serialize;

use super::resolve_kind;
use crate::chunking::{chunk_csv, chunk_text};
use crate::config::Settings;
use crate::document::{Chunk, DocumentKind, ExtractedDocument};
use crate::error::{ProcessingError, ProcessingResult};
use crate::session;

#[derive(Serialize)]
struct ChunkReport<'a> {
    file: String,
    kind: DocumentKind,
    chunk_count: usize,
    chunks: &'a [Chunk],
}

pub fn run(
    file: &Path,
    mime: Option<&str>,
    preview: usize,
    json: bool,
    settings: &Settings,
) -> ExitCode {
    let (kind, chunks) = match chunk_file(file, mime, settings) {
        Ok(result) => result,
        Err(e) => return super::ask::report_error(&e),
    };

    if json {
        let report = ChunkReport {
            file: file.display().to_string(),
            kind,
            chunk_count: chunks.len(),
            chunks: &chunks,
        };
        return match serde_json::to_string_pretty(&report) {
            Ok(out) => {
                println!("{out}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Error serializing chunks: {e}");
                ExitCode::FAILURE
            }
        };
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["#", "Chars", "Preview"]);
    for (i, chunk) in chunks.iter().enumerate() {
        let mut shown = chunk.preview(preview).replace('\n', " | ");
        if chunk.char_count() > preview {
            shown.push_str("...");
        }
        table.add_row(vec![i.to_string(), chunk.char_count().to_string(), shown]);
    }

    println!("{} ({kind}): {} chunks", file.display(), chunks.len());
    println!("{table}");
    ExitCode::SUCCESS
}

fn chunk_file(
    file: &Path,
    mime: Option<&str>,
    settings: &Settings,
) -> ProcessingResult<(DocumentKind, Vec<Chunk>)> {
    settings
        .chunking
        .validate()
        .map_err(ProcessingError::InvalidConfig)?;
    let kind = resolve_kind(file, mime)?;
    let document = session::load_file(kind, file)?;

    let chunks = match &document {
        ExtractedDocument::Text(text) => chunk_text(text, settings.chunking.chunk_size),
        ExtractedDocument::Table(bundle) => chunk_csv(&bundle.table, settings.chunking.row_chunk_size),
    };
    Ok((kind, chunks))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_chunk_file_csv_windows() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("rows.csv");
        let mut content = String::from("n\n");
        for i in 0..7 {
            content.push_str(&format!("{i}\n"));
        }
        fs::write(&path, content).unwrap();

        let mut settings = Settings::default();
        settings.chunking.row_chunk_size = 3;
        let (kind, chunks) = chunk_file(&path, None, &settings).unwrap();
        assert_eq!(kind, DocumentKind::Csv);
        assert_eq!(chunks.len(), 3);
    }

    #[test]
    fn test_chunk_file_rejects_zero_size() {
        let mut settings = Settings::default();
        settings.chunking.chunk_size = 0;
        let err = chunk_file(Path::new("a.pdf"), None, &settings).unwrap_err();
        assert!(matches!(err, ProcessingError::InvalidConfig(_)));
    }

    #[test]
    fn test_chunk_file_missing_is_no_data() {
        let temp_dir = TempDir::new().unwrap();
        let err = chunk_file(&temp_dir.path().join("gone.csv"), None, &Settings::default())
            .unwrap_err();
        assert!(err.is_no_data());
    }
}
