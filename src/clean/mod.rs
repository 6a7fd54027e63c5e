//! The cleaning engine
//!
//! Turns a raw, mostly-text table into a validated, typed,
//! de-duplicated one by running the source kind's fixed stage
//! pipeline. Each stage is a pure function from input table to output
//! table; ownership moves stage to stage, so no stage ever observes
//! another's in-progress mutation.

pub mod coerce;
pub mod null;
mod stage;
pub mod weight;

pub use stage::{pipeline, Stage};

use rustc_hash::FxHashSet;
use tracing::{debug, warn};

use crate::error::CleanError;
use crate::model::{CellValue, Table};
use crate::source::SourceKind;

/// The cleaned table plus row accounting for observability.
#[derive(Debug)]
pub struct CleaningResult {
    pub table: Table,
    /// Rows in the raw input
    pub rows_in: usize,
    /// Rows rejected by forgiving stages
    pub rows_dropped: usize,
}

/// Run the cleaning pipeline for one source kind over a raw table.
///
/// Forgiving failures drop rows and are counted in the result; strict
/// failures abort the run for this source with a [`CleanError`].
pub fn clean(kind: SourceKind, table: Table) -> Result<CleaningResult, CleanError> {
    let rows_in = table.row_count();
    let mut table = table;

    for stage in pipeline(kind) {
        let before = table.row_count();
        table = apply(&stage, table)?;
        let dropped = before.saturating_sub(table.row_count());
        if dropped > 0 {
            warn!(source = %kind, stage = stage.name(), dropped, "rows rejected");
        } else {
            debug!(source = %kind, stage = stage.name(), "stage applied");
        }
    }

    table.refresh_column_types();
    let rows_dropped = rows_in - table.row_count();
    Ok(CleaningResult {
        table,
        rows_in,
        rows_dropped,
    })
}

fn apply(stage: &Stage, table: Table) -> Result<Table, CleanError> {
    match stage {
        Stage::NormalizeNulls { keep_threshold } => {
            Ok(null::normalize(table, *keep_threshold).0)
        }
        Stage::CoerceDate { column } => Ok(coerce::coerce_date(table, column)?.0),
        Stage::Replace { column, from, to } => {
            coerce::replace_in_column(table, column, from, to)
        }
        Stage::Trim { column } => coerce::trim_column(table, column),
        Stage::SanitizeDigits { column } => coerce::sanitize_digits(table, column),
        Stage::CoerceInt { column } => coerce::coerce_int_strict(table, column),
        Stage::DedupBy { column } => dedup_by(table, column),
        Stage::DropColumns { columns } => {
            let mut table = table;
            table.remove_columns(columns);
            Ok(table)
        }
        Stage::ParseWeight { column } => parse_weight_column(table, column),
        Stage::DropAbsentIn { column } => Ok(coerce::drop_absent_in(table, column)?.0),
        Stage::CastFloat { column } => coerce::cast_float_strict(table, column),
        Stage::BuildTimestamp { output } => coerce::build_timestamp(table, output),
        Stage::CoerceNumber { columns } => coerce::coerce_number_lenient(table, columns),
        Stage::DropAbsentRows => Ok(coerce::drop_absent_rows(table).0),
        Stage::CastInt { columns } => coerce::cast_int_strict(table, columns),
    }
}

/// Drop duplicate rows by one column's value, keeping the first
/// occurrence.
fn dedup_by(mut table: Table, column: &str) -> Result<Table, CleanError> {
    let idx = coerce::column_index(&table, column)?;

    let mut seen: FxHashSet<String> = FxHashSet::default();
    table.rows.retain(|row| seen.insert(row.cells[idx].display()));
    Ok(table)
}

/// Apply the weight parser to a column. Parse failures (including
/// unrecognized formats) become absence; a later stage rejects those
/// rows.
fn parse_weight_column(mut table: Table, column: &str) -> Result<Table, CleanError> {
    let idx = coerce::column_index(&table, column)?;

    for row in &mut table.rows {
        if let CellValue::Text(s) = &row.cells[idx] {
            row.cells[idx] = match weight::parse_weight(s) {
                Ok(kg) => CellValue::Float(kg),
                Err(err) => {
                    warn!(row = row.source_line, %err, "weight rejected");
                    CellValue::Absent
                }
            };
        }
    }
    Ok(table)
}
