//! Core types shared by extraction, chunking and embedding.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use crate::error::ProcessingError;

/// A single embedding vector. Linked to its chunk by position only.
pub type Embedding = Vec<f32>;

/// A bounded-size fragment of a document prepared for embedding.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Chunk(String);

impl Chunk {
    pub fn new(content: impl Into<String>) -> Self {
        Self(content.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length in characters.
    pub fn char_count(&self) -> usize {
        self.0.chars().count()
    }

    /// First `max_chars` characters, on a char boundary.
    pub fn preview(&self, max_chars: usize) -> &str {
        match self.0.char_indices().nth(max_chars) {
            Some((end, _)) => &self.0[..end],
            None => &self.0,
        }
    }
}

impl AsRef<str> for Chunk {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Chunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A scalar table cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Null => f.write_str("NaN"),
            CellValue::Bool(true) => f.write_str("True"),
            CellValue::Bool(false) => f.write_str("False"),
            CellValue::Int(v) => write!(f, "{v}"),
            CellValue::Float(v) if v.is_finite() && v.fract() == 0.0 => write!(f, "{v:.1}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Text(s) => f.write_str(s),
        }
    }
}

/// A named column of cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub cells: Vec<CellValue>,
}

impl Column {
    pub fn new(name: impl Into<String>, cells: Vec<CellValue>) -> Self {
        Self {
            name: name.into(),
            cells,
        }
    }
}

/// Column-oriented table. All columns have the same length.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    columns: Vec<Column>,
    row_count: usize,
}

impl Table {
    /// Build a table, rejecting columns of unequal length.
    pub fn new(columns: Vec<Column>) -> Result<Self, String> {
        let row_count = columns.first().map_or(0, |c| c.cells.len());
        if let Some(bad) = columns.iter().find(|c| c.cells.len() != row_count) {
            return Err(format!(
                "column '{}' has {} cells, expected {row_count}",
                bad.name,
                bad.cells.len()
            ));
        }
        Ok(Self { columns, row_count })
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.row_count == 0
    }

    /// Rows `start..end` as a new table with the same columns.
    pub fn slice_rows(&self, start: usize, end: usize) -> Table {
        let end = end.min(self.row_count);
        let start = start.min(end);
        Table {
            columns: self
                .columns
                .iter()
                .map(|c| Column::new(c.name.clone(), c.cells[start..end].to_vec()))
                .collect(),
            row_count: end - start,
        }
    }

    /// One record per row, keys in column order.
    pub fn records(&self) -> Vec<IndexMap<String, CellValue>> {
        (0..self.row_count)
            .map(|row| {
                self.columns
                    .iter()
                    .map(|c| (c.name.clone(), c.cells[row].clone()))
                    .collect()
            })
            .collect()
    }
}

/// The three synchronized projections produced from a CSV input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableBundle {
    pub table: Table,
    /// Whitespace-aligned rendering of every row.
    pub text: String,
    /// JSON array of per-row records.
    pub json: String,
}

/// Output of extraction, input to chunking.
#[derive(Debug, Clone, PartialEq)]
pub enum ExtractedDocument {
    Text(String),
    Table(TableBundle),
}

impl ExtractedDocument {
    /// Full textual form of the document.
    pub fn text(&self) -> &str {
        match self {
            ExtractedDocument::Text(text) => text,
            ExtractedDocument::Table(bundle) => &bundle.text,
        }
    }

    pub fn kind(&self) -> DocumentKind {
        match self {
            ExtractedDocument::Text(_) => DocumentKind::Pdf,
            ExtractedDocument::Table(_) => DocumentKind::Csv,
        }
    }
}

/// Recognized upload types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Pdf,
    Csv,
}

impl DocumentKind {
    pub fn mime_type(&self) -> &'static str {
        match self {
            DocumentKind::Pdf => "application/pdf",
            DocumentKind::Csv => "text/csv",
        }
    }

    /// Resolve a MIME type as reported by an upload.
    pub fn from_mime(mime: &str) -> Result<Self, ProcessingError> {
        let essence = mime.split(';').next().unwrap_or_default().trim();
        match essence.to_ascii_lowercase().as_str() {
            "application/pdf" => Ok(DocumentKind::Pdf),
            "text/csv" => Ok(DocumentKind::Csv),
            _ => Err(ProcessingError::UnsupportedType(mime.to_string())),
        }
    }

    /// Resolve from a file extension, case-insensitively.
    pub fn from_path(path: &Path) -> Result<Self, ProcessingError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("pdf") => Ok(DocumentKind::Pdf),
            Some("csv") => Ok(DocumentKind::Csv),
            _ => Err(ProcessingError::UnsupportedType(path.display().to_string())),
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mime_type())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn sample_table() -> Table {
        Table::new(vec![
            Column::new("id", vec![CellValue::Int(1), CellValue::Int(2), CellValue::Int(3)]),
            Column::new(
                "name",
                vec![
                    CellValue::Text("a".into()),
                    CellValue::Null,
                    CellValue::Text("c".into()),
                ],
            ),
        ])
        .unwrap()
    }

    #[test]
    fn test_table_rejects_ragged_columns() {
        let result = Table::new(vec![
            Column::new("a", vec![CellValue::Int(1)]),
            Column::new("b", vec![]),
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_slice_rows_clamps_range() {
        let table = sample_table();
        let slice = table.slice_rows(2, 10);
        assert_eq!(slice.row_count(), 1);
        assert_eq!(slice.columns()[0].cells, vec![CellValue::Int(3)]);
        assert_eq!(table.slice_rows(5, 9).row_count(), 0);
    }

    #[test]
    fn test_records_keep_column_order() {
        let json = serde_json::to_string(&sample_table().records()).unwrap();
        assert_eq!(
            json,
            r#"[{"id":1,"name":"a"},{"id":2,"name":null},{"id":3,"name":"c"}]"#
        );
    }

    #[test]
    fn test_cell_display() {
        assert_eq!(CellValue::Float(2.0).to_string(), "2.0");
        assert_eq!(CellValue::Float(2.5).to_string(), "2.5");
        assert_eq!(CellValue::Null.to_string(), "NaN");
        assert_eq!(CellValue::Bool(true).to_string(), "True");
    }

    #[test]
    fn test_chunk_preview_respects_char_boundaries() {
        let chunk = Chunk::new("héllo wörld");
        assert_eq!(chunk.preview(4), "héll");
        assert_eq!(chunk.preview(100), "héllo wörld");
        assert_eq!(chunk.char_count(), 11);
    }

    #[test]
    fn test_document_kind_detection() {
        assert_eq!(DocumentKind::from_mime("application/pdf").unwrap(), DocumentKind::Pdf);
        assert_eq!(
            DocumentKind::from_mime("text/csv; charset=utf-8").unwrap(),
            DocumentKind::Csv
        );
        assert!(DocumentKind::from_mime("image/png").is_err());

        assert_eq!(
            DocumentKind::from_path(&PathBuf::from("Report.PDF")).unwrap(),
            DocumentKind::Pdf
        );
        assert_eq!(
            DocumentKind::from_path(&PathBuf::from("data.csv")).unwrap(),
            DocumentKind::Csv
        );
        assert!(matches!(
            DocumentKind::from_path(&PathBuf::from("notes.txt")),
            Err(ProcessingError::UnsupportedType(_))
        ));
    }
}
