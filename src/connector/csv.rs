//! CSV file connector

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::model::{CellValue, Column, Table};

use super::Connector;

/// Reads a raw table from a local CSV file.
pub struct CsvConnector {
    path: PathBuf,
}

impl CsvConnector {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl Connector for CsvConnector {
    fn fetch(&self) -> Result<Table> {
        let file = File::open(&self.path)
            .with_context(|| format!("Failed to open file: {}", self.path.display()))?;
        let reader = BufReader::new(file);
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers = csv_reader
            .headers()
            .context("Failed to read CSV headers")?
            .clone();

        let columns: Vec<Column> = headers
            .iter()
            .enumerate()
            .map(|(i, name)| Column::new(name.to_string(), i))
            .collect();

        let mut table = Table::new(columns);

        for (line_num, result) in csv_reader.records().enumerate() {
            let record = result
                .with_context(|| format!("Failed to read CSV row {}", line_num + 2))?; // +2 for 1-indexing and header

            let mut cells: Vec<CellValue> = record.iter().map(raw_cell).collect();

            // Pad with absence if the row has fewer columns
            if cells.len() < table.column_count() {
                cells.resize(table.column_count(), CellValue::Absent);
            }

            table.add_row(cells, line_num + 2);
        }

        tracing::debug!(path = %self.path.display(), rows = table.row_count(), "fetched csv source");
        Ok(table)
    }
}

/// Verbatim text cell; only a truly empty field is absent.
fn raw_cell(s: &str) -> CellValue {
    if s.is_empty() {
        CellValue::Absent
    } else {
        CellValue::Text(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_fetch_reads_cells_verbatim() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "a,b\n1,NULL\nx,").unwrap();

        let table = CsvConnector::new(file.path().to_path_buf()).fetch().unwrap();
        assert_eq!(table.row_count(), 2);
        // No inference: numbers and sentinels stay text for the cleaner
        assert_eq!(table.rows[0].cells[0], CellValue::Text("1".into()));
        assert_eq!(table.rows[0].cells[1], CellValue::Text("NULL".into()));
        assert_eq!(table.rows[1].cells[1], CellValue::Absent);
        assert_eq!(table.rows[0].source_line, 2);
    }
}
