//! Document chunking.
//!
//! Text is packed greedily into word-aligned chunks bounded by a character
//! budget; tables are cut into fixed-size row windows.

mod rows;
mod text;

pub use rows::RowChunker;
pub use text::TextChunker;

use serde::{Deserialize, Serialize};

use crate::document::{Chunk, Table};

/// Chunk size limits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkingConfig {
    /// Maximum characters per text chunk, counting one separator per word.
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Maximum rows per table chunk.
    #[serde(default = "default_row_chunk_size")]
    pub row_chunk_size: usize,
}

fn default_chunk_size() -> usize {
    500
}

fn default_row_chunk_size() -> usize {
    10
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
            row_chunk_size: default_row_chunk_size(),
        }
    }
}

impl ChunkingConfig {
    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), String> {
        if self.chunk_size == 0 {
            return Err("chunking.chunk_size must be greater than 0".to_string());
        }
        if self.row_chunk_size == 0 {
            return Err("chunking.row_chunk_size must be greater than 0".to_string());
        }
        Ok(())
    }

    pub fn text_chunker(&self) -> TextChunker {
        TextChunker::new(self.chunk_size)
    }

    pub fn row_chunker(&self) -> RowChunker {
        RowChunker::new(self.row_chunk_size)
    }
}

/// Split `text` into word-aligned chunks of at most `chunk_size` characters.
pub fn chunk_text(text: &str, chunk_size: usize) -> Vec<Chunk> {
    TextChunker::new(chunk_size).chunk(text)
}

/// Split `table` into windows of at most `row_chunk_size` rows.
pub fn chunk_csv(table: &Table, row_chunk_size: usize) -> Vec<Chunk> {
    RowChunker::new(row_chunk_size).chunk(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunking_config_defaults() {
        let config = ChunkingConfig::default();
        assert_eq!(config.chunk_size, 500);
        assert_eq!(config.row_chunk_size, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_chunking_config_validation() {
        let mut config = ChunkingConfig {
            chunk_size: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        config.chunk_size = 100;
        config.row_chunk_size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_chunk_text_packs_words_greedily() {
        let chunks = chunk_text("a bb ccc dddd", 5);
        let contents: Vec<&str> = chunks.iter().map(Chunk::as_str).collect();
        assert_eq!(contents, vec!["a bb", "ccc", "dddd"]);

        assert!(chunk_text("   ", 5).is_empty());
    }

    #[test]
    fn test_chunk_csv_windows_rows() {
        use crate::document::{CellValue, Column};

        let table = Table::new(vec![Column::new(
            "n",
            (0..25).map(CellValue::Int).collect(),
        )])
        .unwrap();

        let chunks = chunk_csv(&table, 10);
        let rows: Vec<usize> = chunks
            .iter()
            .map(|c| c.as_str().lines().count() - 1)
            .collect();
        assert_eq!(rows, vec![10, 10, 5]);
        assert!(chunks.iter().all(|c| c.as_str().trim_start().starts_with('n')));
        assert!(chunk_csv(&table.slice_rows(0, 0), 10).is_empty());
    }

    #[test]
    fn test_partial_deserialize_uses_defaults() {
        let config: ChunkingConfig = toml::from_str("chunk_size = 42").unwrap();
        assert_eq!(config.chunk_size, 42);
        assert_eq!(config.row_chunk_size, 10);
    }
}
