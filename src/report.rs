//! Run summary rendering

use tabled::{settings::Style, Table as DisplayTable, Tabled};

use crate::clean::CleaningResult;
use crate::source::SourceKind;

/// Row accounting for one cleaned source.
#[derive(Debug, Tabled)]
pub struct SourceSummary {
    pub source: String,
    pub destination: String,
    pub rows_in: usize,
    pub rows_kept: usize,
    pub rows_dropped: usize,
}

impl SourceSummary {
    pub fn new(kind: SourceKind, result: &CleaningResult) -> Self {
        Self {
            source: kind.to_string(),
            destination: kind.destination().to_string(),
            rows_in: result.rows_in,
            rows_kept: result.table.row_count(),
            rows_dropped: result.rows_dropped,
        }
    }
}

/// Render the summaries as a plain text table.
pub fn render(summaries: &[SourceSummary]) -> String {
    DisplayTable::new(summaries)
        .with(Style::sharp())
        .to_string()
}
