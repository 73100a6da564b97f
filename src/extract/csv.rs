use std::collections::HashMap;
use std::io::Read;

use csv::ReaderBuilder;

use super::render::render_table;
use crate::document::{CellValue, Column, Table, TableBundle};
use crate::error::ExtractionError;

/// Cell strings read as missing values.
const NA_VALUES: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Parse CSV input into a table plus its text and JSON projections.
///
/// The first record is the header. Rows with fewer fields than the header are
/// padded with nulls; rows with more fields are rejected.
pub fn read_csv<R: Read>(reader: R) -> Result<TableBundle, ExtractionError> {
    parse_bundle(reader).inspect_err(|e| {
        tracing::warn!(target: "extract", "CSV processing error: {e}");
    })
}

fn parse_bundle<R: Read>(reader: R) -> Result<TableBundle, ExtractionError> {
    let table = parse_table(reader)?;
    let text = render_table(&table).trim().to_string();
    let json = serde_json::to_string(&table.records())
        .map_err(|e| ExtractionError::Csv(format!("failed to serialize rows: {e}")))?;

    tracing::debug!(
        target: "extract",
        "parsed CSV: {} rows x {} columns",
        table.row_count(),
        table.column_count()
    );

    Ok(TableBundle { table, text, json })
}

fn parse_table<R: Read>(reader: R) -> Result<Table, ExtractionError> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    if headers.is_empty() {
        return Err(ExtractionError::EmptyCsv);
    }
    let names = column_names(headers.iter());
    let width = names.len();

    let mut raw: Vec<Vec<String>> = vec![Vec::new(); width];
    for (index, record) in csv_reader.records().enumerate() {
        let record = record?;
        if record.len() > width {
            // Line numbers are 1-based and the header is line 1.
            return Err(ExtractionError::Csv(format!(
                "expected {width} fields in line {}, saw {}",
                index + 2,
                record.len()
            )));
        }
        for (column, cells) in raw.iter_mut().enumerate() {
            cells.push(record.get(column).unwrap_or_default().to_string());
        }
    }

    let columns = names
        .into_iter()
        .zip(raw)
        .map(|(name, cells)| Column::new(name, infer_cells(&cells)))
        .collect();

    Table::new(columns).map_err(ExtractionError::Csv)
}

/// Fill blank headers and make duplicates unique (`a`, `a.1`, `a.2`).
fn column_names<'a>(headers: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    headers
        .enumerate()
        .map(|(i, raw)| {
            let base = if raw.is_empty() {
                format!("Unnamed: {i}")
            } else {
                raw.to_string()
            };
            let count = seen.entry(base.clone()).or_insert(0);
            let name = if *count == 0 {
                base
            } else {
                format!("{base}.{count}")
            };
            *count += 1;
            name
        })
        .collect()
}

fn is_na(cell: &str) -> bool {
    NA_VALUES.contains(&cell)
}

/// Infer a single type for the whole column.
///
/// Integers cannot hold a missing value, so an integer column with any null
/// becomes a float column.
fn infer_cells(cells: &[String]) -> Vec<CellValue> {
    let present = || cells.iter().filter(|c| !is_na(c));
    let has_null = cells.iter().any(|c| is_na(c));

    if !has_null && present().all(|c| c.parse::<i64>().is_ok()) {
        return convert(cells, |c| c.parse().ok().map(CellValue::Int));
    }
    if present().all(|c| c.parse::<f64>().is_ok()) {
        return convert(cells, |c| c.parse().ok().map(CellValue::Float));
    }
    if present().all(|c| parse_bool(c).is_some()) {
        return convert(cells, |c| parse_bool(c).map(CellValue::Bool));
    }
    convert(cells, |c| Some(CellValue::Text(c.to_string())))
}

fn convert(cells: &[String], parse: impl Fn(&str) -> Option<CellValue>) -> Vec<CellValue> {
    cells
        .iter()
        .map(|c| {
            if is_na(c) {
                CellValue::Null
            } else {
                parse(c.as_str()).unwrap_or(CellValue::Null)
            }
        })
        .collect()
}

fn parse_bool(cell: &str) -> Option<bool> {
    if cell.eq_ignore_ascii_case("true") {
        Some(true)
    } else if cell.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundle_projections() {
        let input = "name,age,score\nann,31,9.5\nbo,7,8\n";
        let bundle = read_csv(input.as_bytes()).unwrap();

        assert_eq!(bundle.table.row_count(), 2);
        assert_eq!(bundle.table.column_count(), 3);
        assert_eq!(bundle.text, "name age score\n  ann  31   9.5\n   bo   7   8.0");
        assert_eq!(
            bundle.json,
            r#"[{"name":"ann","age":31,"score":9.5},{"name":"bo","age":7,"score":8.0}]"#
        );
    }

    #[test]
    fn test_column_type_inference() {
        let input = "i,f,b,t\n1,1.5,true,x\n,2,FALSE,\n3,NaN,,3\n";
        let table = read_csv(input.as_bytes()).unwrap().table;
        let cols = table.columns();

        assert_eq!(
            cols[0].cells,
            vec![CellValue::Float(1.0), CellValue::Null, CellValue::Float(3.0)]
        );
        assert_eq!(
            cols[1].cells,
            vec![CellValue::Float(1.5), CellValue::Float(2.0), CellValue::Null]
        );
        assert_eq!(
            cols[2].cells,
            vec![CellValue::Bool(true), CellValue::Bool(false), CellValue::Null]
        );
        assert_eq!(
            cols[3].cells,
            vec![
                CellValue::Text("x".into()),
                CellValue::Null,
                CellValue::Text("3".into())
            ]
        );
    }

    #[test]
    fn test_integer_column_with_nulls_becomes_float() {
        let bundle = read_csv("id,v\n1,a\n,b\n3,c\n".as_bytes()).unwrap();
        assert_eq!(bundle.text, "id v\n 1.0 a\n NaN b\n 3.0 c");
        assert_eq!(
            bundle.json,
            r#"[{"id":1.0,"v":"a"},{"id":null,"v":"b"},{"id":3.0,"v":"c"}]"#
        );
    }

    #[test]
    fn test_short_rows_are_padded() {
        let table = read_csv("a,b\n1\n2,3\n".as_bytes()).unwrap().table;
        assert_eq!(table.columns()[1].cells, vec![CellValue::Null, CellValue::Float(3.0)]);
    }

    #[test]
    fn test_long_rows_are_rejected() {
        let result = read_csv("a,b\n1,2,3\n".as_bytes());
        assert!(matches!(result, Err(ExtractionError::Csv(msg)) if msg.contains("line 2")));
    }

    #[test]
    fn test_empty_input_is_error() {
        assert!(matches!(read_csv("".as_bytes()), Err(ExtractionError::EmptyCsv)));
    }

    #[test]
    fn test_invalid_utf8_is_error() {
        let bytes: &[u8] = b"a,b\n\xff\xfe,1\n";
        assert!(matches!(read_csv(bytes), Err(ExtractionError::Csv(_))));
    }

    #[test]
    fn test_header_names_are_unique() {
        let names = column_names(["a", "", "a", "a"].into_iter());
        assert_eq!(names, vec!["a", "Unnamed: 1", "a.1", "a.2"]);
    }

    #[test]
    fn test_header_only_csv() {
        let bundle = read_csv("x,y\n".as_bytes()).unwrap();
        assert!(bundle.table.is_empty());
        assert_eq!(bundle.text, "x y");
        assert_eq!(bundle.json, "[]");
    }
}
