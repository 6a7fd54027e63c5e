//! Table, Row, and Cell data structures

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::schema::{CellType, Column};

/// A cell value with type information.
///
/// `Absent` is a true "no value" state, distinct from any text — in
/// particular distinct from the literal string `"NULL"` that the raw
/// sources use as a sentinel.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Absent,
    Int(i64),
    Float(f64),
    Text(String),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
}

impl PartialEq for CellValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (CellValue::Absent, CellValue::Absent) => true,
            (CellValue::Int(a), CellValue::Int(b)) => a == b,
            (CellValue::Float(a), CellValue::Float(b)) => {
                if a.is_nan() && b.is_nan() {
                    true
                } else {
                    a == b
                }
            }
            (CellValue::Text(a), CellValue::Text(b)) => a == b,
            (CellValue::Date(a), CellValue::Date(b)) => a == b,
            (CellValue::DateTime(a), CellValue::DateTime(b)) => a == b,
            (CellValue::Int(a), CellValue::Float(b)) => (*a as f64) == *b,
            (CellValue::Float(a), CellValue::Int(b)) => *a == (*b as f64),
            _ => false,
        }
    }
}

impl CellValue {
    /// Check if the value is absent
    pub fn is_absent(&self) -> bool {
        matches!(self, CellValue::Absent)
    }

    /// The type tag for this value
    pub fn cell_type(&self) -> CellType {
        match self {
            CellValue::Absent => CellType::Absent,
            CellValue::Int(_) => CellType::Int,
            CellValue::Float(_) => CellType::Float,
            CellValue::Text(_) => CellType::Text,
            CellValue::Date(_) => CellType::Date,
            CellValue::DateTime(_) => CellType::DateTime,
        }
    }

    /// Convert to a display string (absent renders as empty)
    pub fn display(&self) -> String {
        match self {
            CellValue::Absent => String::new(),
            CellValue::Int(i) => i.to_string(),
            CellValue::Float(f) => f.to_string(),
            CellValue::Text(s) => s.clone(),
            CellValue::Date(d) => d.to_string(),
            CellValue::DateTime(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

impl std::fmt::Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<i64> for CellValue {
    fn from(i: i64) -> Self {
        CellValue::Int(i)
    }
}

impl From<f64> for CellValue {
    fn from(f: f64) -> Self {
        CellValue::Float(f)
    }
}

/// A row in the table
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    /// Cell values in column order
    pub cells: Vec<CellValue>,
    /// Original line/record number in the source (1-indexed)
    pub source_line: usize,
}

impl Row {
    pub fn new(cells: Vec<CellValue>, source_line: usize) -> Self {
        Self { cells, source_line }
    }

    /// Get a cell value by column index
    pub fn get(&self, index: usize) -> Option<&CellValue> {
        self.cells.get(index)
    }

    /// Count of non-absent cells
    pub fn present_count(&self) -> usize {
        self.cells.iter().filter(|c| !c.is_absent()).count()
    }
}

/// A table containing columns and rows
#[derive(Debug, Clone)]
pub struct Table {
    /// Column definitions
    pub columns: Vec<Column>,
    /// All rows in the table
    pub rows: Vec<Row>,
}

impl Table {
    /// Create a new empty table with column definitions
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Build a table from column names
    pub fn with_columns(names: &[&str]) -> Self {
        let columns = names
            .iter()
            .enumerate()
            .map(|(i, name)| Column::new(name.to_string(), i))
            .collect();
        Self::new(columns)
    }

    /// Add a row to the table
    pub fn add_row(&mut self, cells: Vec<CellValue>, source_line: usize) {
        self.rows.push(Row::new(cells, source_line));
    }

    /// Get column index by name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Get column by name
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Number of rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Append a column, filling every existing row with the given cells.
    ///
    /// `cells` must have one entry per row.
    pub fn push_column(&mut self, name: impl Into<String>, cells: Vec<CellValue>) {
        debug_assert_eq!(cells.len(), self.rows.len());
        let index = self.columns.len();
        self.columns.push(Column::new(name, index));
        for (row, cell) in self.rows.iter_mut().zip(cells) {
            row.cells.push(cell);
        }
    }

    /// Remove the named columns, renumbering the remainder
    pub fn remove_columns(&mut self, names: &[&str]) {
        let dropped: Vec<usize> = self
            .columns
            .iter()
            .filter(|c| names.contains(&c.name.as_str()))
            .map(|c| c.index)
            .collect();

        self.columns.retain(|c| !dropped.contains(&c.index));
        for (i, col) in self.columns.iter_mut().enumerate() {
            col.index = i;
        }
        for row in &mut self.rows {
            let mut keep = 0usize;
            row.cells.retain(|_| {
                let idx = keep;
                keep += 1;
                !dropped.contains(&idx)
            });
        }
    }

    /// Record the observed cell type on each column definition
    pub fn refresh_column_types(&mut self) {
        for col_idx in 0..self.columns.len() {
            let mut observed = CellType::Absent;
            for row in &self.rows {
                if let Some(cell) = row.cells.get(col_idx) {
                    observed = observed.widen(cell.cell_type());
                }
            }
            self.columns[col_idx].cell_type = observed;
        }
    }
}
