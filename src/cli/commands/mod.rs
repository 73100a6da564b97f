//! Command implementations.

pub mod ask;
pub mod chunk;
pub mod init;

use std::path::Path;
use std::process::ExitCode;

use crate::cli::Commands;
use crate::config::Settings;
use crate::document::DocumentKind;
use crate::error::ProcessingResult;

/// Run the parsed command against loaded settings.
pub fn dispatch(command: Commands, settings: Settings) -> ExitCode {
    match command {
        Commands::Init { force } => init::run_init(force),
        Commands::Config => init::run_config(&settings),
        Commands::Chunk {
            file,
            chunk_size,
            row_chunk_size,
            mime,
            preview,
            json,
        } => {
            let mut settings = settings;
            if let Some(size) = chunk_size {
                settings.chunking.chunk_size = size;
            }
            if let Some(size) = row_chunk_size {
                settings.chunking.row_chunk_size = size;
            }
            chunk::run(&file, mime.as_deref(), preview, json, &settings)
        }
        Commands::Ask {
            file,
            query,
            top_k,
            mime,
            json,
        } => {
            let mut settings = settings;
            if let Some(k) = top_k {
                settings.retrieval.top_k = k;
            }
            ask::run(&file, &query, mime.as_deref(), json, &settings)
        }
    }
}

/// MIME override wins over the file extension.
pub(crate) fn resolve_kind(path: &Path, mime: Option<&str>) -> ProcessingResult<DocumentKind> {
    match mime {
        Some(mime) => DocumentKind::from_mime(mime),
        None => DocumentKind::from_path(path),
    }
}
