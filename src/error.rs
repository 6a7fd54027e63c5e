//! Cleaning error taxonomy
//!
//! Only failures that abort a source's cleaning run surface as errors.
//! Forgiving failures (an unparseable date, an unrecognized weight
//! format) are resolved locally by dropping the offending row and are
//! reported through `CleaningResult::rows_dropped`, never through this
//! type.

use thiserror::Error;

use crate::model::CellType;

/// A failure that aborts the cleaning run for one source.
#[derive(Debug, Error)]
pub enum CleanError {
    /// A pipeline stage names a column the raw table does not have.
    #[error("column '{column}' not present in table")]
    MissingColumn { column: String },

    /// A strict coercion met a value it cannot convert. Identifier and
    /// final-cast columns are assumed clean by the time they are
    /// coerced, so this indicates a pipeline bug worth surfacing
    /// rather than data to silently drop.
    #[error("cannot coerce '{value}' (column '{column}', row {row}) to {target}")]
    StrictCoercion {
        column: String,
        value: String,
        row: usize,
        target: CellType,
    },
}
