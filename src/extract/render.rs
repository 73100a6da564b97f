use crate::document::{CellValue, Table};

/// Most decimals shown for a float column.
const MAX_FLOAT_PRECISION: usize = 6;

/// Render a table as whitespace-aligned text without an index column.
///
/// Every cell is right-aligned to its column width and preceded by a single
/// space. The output has one header line and one line per row, joined by
/// newlines, with no trailing newline.
pub fn render_table(table: &Table) -> String {
    let columns = table.columns();
    if columns.is_empty() {
        return String::new();
    }

    let rendered: Vec<Vec<String>> = columns.iter().map(|c| render_cells(&c.cells)).collect();

    let widths: Vec<usize> = columns
        .iter()
        .zip(&rendered)
        .map(|(column, cells)| {
            cells
                .iter()
                .map(|s| s.chars().count())
                .chain(std::iter::once(column.name.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut lines = Vec::with_capacity(table.row_count() + 1);

    let mut header = String::new();
    for (column, &width) in columns.iter().zip(&widths) {
        header.push_str(&format!(" {:>width$}", column.name));
    }
    lines.push(header);

    for row in 0..table.row_count() {
        let mut line = String::new();
        for (cells, &width) in rendered.iter().zip(&widths) {
            line.push_str(&format!(" {:>width$}", cells[row]));
        }
        lines.push(line);
    }

    lines.join("\n")
}

/// Format one column's cells. Floats share the column's precision: the
/// largest number of decimals any value needs, at least one and at most
/// [`MAX_FLOAT_PRECISION`].
fn render_cells(cells: &[CellValue]) -> Vec<String> {
    let precision = cells
        .iter()
        .filter_map(|cell| match cell {
            CellValue::Float(v) if v.is_finite() => Some(decimals(*v)),
            _ => None,
        })
        .max();

    let Some(precision) = precision else {
        return cells.iter().map(ToString::to_string).collect();
    };
    let precision = precision.clamp(1, MAX_FLOAT_PRECISION);

    cells
        .iter()
        .map(|cell| match cell {
            CellValue::Float(v) if v.is_finite() => format!("{v:.precision$}"),
            other => other.to_string(),
        })
        .collect()
}

/// Decimals in the shortest representation of `v`.
fn decimals(v: f64) -> usize {
    let repr = v.to_string();
    repr.split_once('.').map_or(0, |(_, frac)| frac.len())
}
