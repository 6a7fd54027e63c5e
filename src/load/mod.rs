//! Destination loader
//!
//! Takes sole ownership of a cleaned table and persists it under a
//! destination name, replacing anything already there. No merge or
//! upsert semantics.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::model::Table;

/// A destination for cleaned tables.
pub trait Loader {
    /// Persist the table under the destination name, replacing any
    /// existing table of that name. Returns where it was written.
    fn persist(&self, table: Table, destination: &str) -> Result<PathBuf>;
}

/// Writes each destination table as `<out_dir>/<destination>.csv`.
pub struct CsvLoader {
    out_dir: PathBuf,
}

impl CsvLoader {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }
}

impl Loader for CsvLoader {
    fn persist(&self, table: Table, destination: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.out_dir).with_context(|| {
            format!("Failed to create output directory: {}", self.out_dir.display())
        })?;

        let path = self.out_dir.join(format!("{}.csv", destination));
        let mut writer = csv::Writer::from_path(&path)
            .with_context(|| format!("Failed to create {}", path.display()))?;

        writer
            .write_record(table.columns.iter().map(|c| c.name.as_str()))
            .context("Failed to write header")?;

        for row in &table.rows {
            writer
                .write_record(row.cells.iter().map(|c| c.display()))
                .with_context(|| format!("Failed to write row {}", row.source_line))?;
        }
        writer.flush().context("Failed to flush output")?;

        tracing::info!(destination, path = %path.display(), rows = table.row_count(), "persisted table");
        Ok(path)
    }
}
