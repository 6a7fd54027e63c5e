//! Sentinel-null normalization

use crate::model::{CellValue, Table};

/// The literal sentinel the raw sources use for "no value". Only this
/// exact string is recognised; variants such as "N/A" pass through
/// untouched.
const NULL_SENTINEL: &str = "NULL";

/// Replace every `"NULL"` sentinel cell with `Absent`, then drop rows
/// with fewer than `keep_threshold` present cells.
///
/// A threshold of 1 drops only rows that are entirely absent. The
/// products source uses 2 because its index column is never null, so
/// an otherwise-empty row still has one present cell.
///
/// Total over any table and idempotent: normalizing twice yields the
/// same table as once.
pub fn normalize(mut table: Table, keep_threshold: usize) -> (Table, usize) {
    for row in &mut table.rows {
        for cell in &mut row.cells {
            if matches!(cell, CellValue::Text(s) if s.as_str() == NULL_SENTINEL) {
                *cell = CellValue::Absent;
            }
        }
    }

    let before = table.rows.len();
    table.rows.retain(|row| row.present_count() >= keep_threshold);
    let dropped = before - table.rows.len();

    (table, dropped)
}
