use crate::document::{Chunk, Table};
use crate::extract::render_table;

/// Cuts a table into contiguous, non-overlapping row windows.
///
/// Each window is rendered with the column headers and no index column;
/// column widths are computed per window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowChunker {
    row_chunk_size: usize,
}

impl RowChunker {
    /// A size of zero is treated as one row per chunk.
    pub fn new(row_chunk_size: usize) -> Self {
        Self {
            row_chunk_size: row_chunk_size.max(1),
        }
    }

    /// Row ranges of every window, in order.
    pub fn windows(&self, row_count: usize) -> impl Iterator<Item = (usize, usize)> + use<> {
        let size = self.row_chunk_size;
        (0..row_count)
            .step_by(size)
            .map(move |start| (start, (start + size).min(row_count)))
    }

    pub fn chunk(&self, table: &Table) -> Vec<Chunk> {
        let chunks: Vec<Chunk> = self
            .windows(table.row_count())
            .map(|(start, end)| Chunk::new(render_table(&table.slice_rows(start, end))))
            .collect();

        tracing::debug!(
            target: "chunking",
            "table of {} rows split into {} chunks (row_chunk_size={})",
            table.row_count(),
            chunks.len(),
            self.row_chunk_size
        );

        chunks
    }
}
