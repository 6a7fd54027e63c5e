//! JSON array connector

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use indexmap::IndexSet;
use serde_json::Value;

use crate::model::{CellValue, Column, Table};

use super::Connector;

/// Reads a raw table from a local JSON file holding an array of
/// objects (or a single object).
pub struct JsonConnector {
    path: PathBuf,
}

impl JsonConnector {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl Connector for JsonConnector {
    fn fetch(&self) -> Result<Table> {
        let file = File::open(&self.path)
            .with_context(|| format!("Failed to open JSON file: {}", self.path.display()))?;
        let reader = BufReader::new(file);

        let value: Value =
            serde_json::from_reader(reader).context("Failed to parse JSON file")?;

        let array = match value {
            Value::Array(arr) => arr,
            Value::Object(_) => vec![value],
            _ => bail!("JSON must be an array or object"),
        };

        if array.is_empty() {
            bail!("JSON array is empty");
        }

        // Union of keys across all objects, in first-seen order
        let mut column_names: IndexSet<String> = IndexSet::new();
        for item in &array {
            if let Value::Object(obj) = item {
                for key in obj.keys() {
                    column_names.insert(key.clone());
                }
            }
        }

        let columns: Vec<Column> = column_names
            .iter()
            .enumerate()
            .map(|(i, name)| Column::new(name.clone(), i))
            .collect();

        let mut table = Table::new(columns);

        for (line_num, item) in array.iter().enumerate() {
            let cells = match item {
                Value::Object(obj) => column_names
                    .iter()
                    .map(|key| raw_cell(obj.get(key)))
                    .collect(),
                _ => bail!("JSON array items must be objects"),
            };

            table.add_row(cells, line_num + 1);
        }

        tracing::debug!(path = %self.path.display(), rows = table.row_count(), "fetched json source");
        Ok(table)
    }
}

/// Map a JSON value to a raw cell. Strings stay verbatim text so the
/// cleaner sees sentinels like `"NULL"`; JSON numbers keep their
/// numeric type.
fn raw_cell(value: Option<&Value>) -> CellValue {
    match value {
        None | Some(Value::Null) => CellValue::Absent,
        Some(Value::String(s)) => CellValue::Text(s.clone()),
        Some(Value::Number(n)) => {
            if let Some(i) = n.as_i64() {
                CellValue::Int(i)
            } else {
                CellValue::Float(n.as_f64().unwrap_or(f64::NAN))
            }
        }
        Some(Value::Bool(b)) => CellValue::Text(b.to_string()),
        Some(other) => CellValue::Text(other.to_string()),
    }
}
