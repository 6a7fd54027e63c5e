//! Source connectors
//!
//! Each connector is a thin reader producing a table of raw,
//! untyped-ish cells for the cleaning engine. Cells are read verbatim
//! as text (empty becomes absent); all typing and validation is the
//! cleaner's job, so connectors do no inference. The production
//! database/PDF/API connectors live outside this crate; local CSV and
//! JSON files stand in for them here.

mod csv;
mod json;

use std::path::Path;

use anyhow::{bail, Result};

use crate::model::Table;

pub use self::csv::CsvConnector;
pub use self::json::JsonConnector;

/// A source of one raw table.
pub trait Connector {
    /// Fetch the raw table, fully materialized.
    fn fetch(&self) -> Result<Table>;
}

/// Pick a connector for the given file by extension.
pub fn connector_for(path: &Path) -> Result<Box<dyn Connector>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match ext.as_str() {
        "csv" | "tsv" | "txt" => Ok(Box::new(CsvConnector::new(path.to_path_buf()))),
        "json" => Ok(Box::new(JsonConnector::new(path.to_path_buf()))),
        other => bail!("Unsupported source file format: '{}'", other),
    }
}
