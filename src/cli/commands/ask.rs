//! Ask command: answer a query about one document.

use std::path::Path;
use std::process::ExitCode;

use serde::Serialize;

use super::resolve_kind;
use crate::config::Settings;
use crate::error::{ProcessingError, ProcessingResult};
use crate::session::Session;

#[derive(Serialize)]
struct AskReport<'a> {
    file: String,
    query: &'a str,
    answer: String,
}

pub fn run(file: &Path, query: &str, mime: Option<&str>, json: bool, settings: &Settings) -> ExitCode {
    let answer = match answer(file, query, mime, settings) {
        Ok(answer) => answer,
        Err(e) => return report_error(&e),
    };

    if json {
        let report = AskReport {
            file: file.display().to_string(),
            query,
            answer,
        };
        match serde_json::to_string_pretty(&report) {
            Ok(out) => println!("{out}"),
            Err(e) => {
                eprintln!("Error serializing answer: {e}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        println!("{answer}");
    }
    ExitCode::SUCCESS
}

fn answer(file: &Path, query: &str, mime: Option<&str>, settings: &Settings) -> ProcessingResult<String> {
    let kind = resolve_kind(file, mime)?;
    // Checked before the model loads
    if query.trim().is_empty() {
        return Err(ProcessingError::EmptyQuery);
    }

    let session = Session::from_settings(settings)?;
    session.ask_file(file, kind, query)
}

/// Print a processing failure the way the front end reports it.
pub(crate) fn report_error(error: &ProcessingError) -> ExitCode {
    tracing::debug!(target: "cli", "request failed: {error:?}");
    if error.is_no_data() {
        eprintln!("Could not extract data from the document");
    } else {
        eprintln!("Document processing error: {error}");
    }
    ExitCode::FAILURE
}
