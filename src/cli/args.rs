//! CLI argument parsing using clap.

use clap::{
    Parser, Subcommand,
    builder::styling::{AnsiColor, Effects, Styles},
};
use std::path::PathBuf;

fn clap_cargo_style() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .usage(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Green.on_default())
}

/// Ask questions about PDF and CSV documents
#[derive(Parser)]
#[command(
    name = "docqa",
    version = env!("CARGO_PKG_VERSION"),
    about = "Ask questions about PDF and CSV documents",
    long_about = "Extract, chunk and embed a PDF or CSV document, then answer a query from its most relevant passages.",
    styles = clap_cargo_style(),
    after_help = "Examples:\n  docqa init\n  docqa chunk report.pdf --chunk-size 300\n  docqa chunk sales.csv --row-chunk-size 25 --json\n  docqa ask report.pdf \"What was the revenue in 2023?\"\n  docqa ask upload.bin \"totals\" --mime text/csv"
)]
pub struct Cli {
    /// Path to custom settings.toml file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Debug-level logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Initialize project
    #[command(about = "Create .docqa/settings.toml with default configuration")]
    Init {
        /// Force overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },

    /// Show current configuration settings
    #[command(about = "Display active settings")]
    Config,

    /// Extract and chunk a document without embedding it
    #[command(about = "Show how a document is split into chunks")]
    Chunk {
        /// PDF or CSV file
        file: PathBuf,

        /// Maximum characters per text chunk (overrides config)
        #[arg(long)]
        chunk_size: Option<usize>,

        /// Maximum rows per table chunk (overrides config)
        #[arg(long)]
        row_chunk_size: Option<usize>,

        /// MIME type of the file (detected from the extension otherwise)
        #[arg(long)]
        mime: Option<String>,

        /// Characters of each chunk to show
        #[arg(long, default_value = "60")]
        preview: usize,

        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Answer a query about a document
    #[command(about = "Ask a question about a PDF or CSV document")]
    Ask {
        /// PDF or CSV file
        file: PathBuf,

        /// Free-text query
        query: String,

        /// Number of passages to include (overrides config)
        #[arg(short = 'k', long)]
        top_k: Option<usize>,

        /// MIME type of the file (detected from the extension otherwise)
        #[arg(long)]
        mime: Option<String>,

        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },
}
