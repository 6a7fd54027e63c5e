//! Column-level typed coercions
//!
//! Two failure policies live here and the asymmetry is deliberate.
//! Date columns carry genuine garbage from the sources, so date
//! coercion is forgiving: an unparseable value drops its row.
//! Identifier and final-cast columns are assumed clean by the time
//! they are coerced, so those coercions are strict: one bad value
//! aborts the source's cleaning run.

use chrono::{NaiveDate, NaiveDateTime};

use crate::error::CleanError;
use crate::model::{CellType, CellValue, Table};

/// Date formats accepted across the sources, tried in order. Ambiguous
/// numeric forms are interpreted day-first.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%d/%m/%Y",
    "%d-%m-%Y",
    "%d.%m.%Y",
    "%Y %B %d",
    "%B %Y %d",
    "%d %B %Y",
];

/// Parse a date in any of the accepted mixed formats.
pub fn parse_mixed_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
}

pub(crate) fn column_index(table: &Table, column: &str) -> Result<usize, CleanError> {
    table
        .column_index(column)
        .ok_or_else(|| CleanError::MissingColumn {
            column: column.to_string(),
        })
}

/// Forgiving date coercion: parse the column's text values as calendar
/// dates; rows whose value fails to parse (or is absent) are dropped.
/// Already-typed date cells pass through, which keeps the stage a
/// fixed point on cleaned tables.
pub fn coerce_date(mut table: Table, column: &str) -> Result<(Table, usize), CleanError> {
    let idx = column_index(&table, column)?;

    let before = table.rows.len();
    let mut kept = Vec::with_capacity(before);
    for mut row in table.rows {
        let coerced = match &row.cells[idx] {
            CellValue::Text(s) => parse_mixed_date(s).map(CellValue::Date),
            CellValue::Date(d) => Some(CellValue::Date(*d)),
            CellValue::DateTime(dt) => Some(CellValue::DateTime(*dt)),
            _ => None,
        };
        match coerced {
            Some(cell) => {
                row.cells[idx] = cell;
                kept.push(row);
            }
            None => {
                tracing::debug!(column, row = row.source_line, "unparseable date, row dropped");
            }
        }
    }
    let dropped = before - kept.len();
    table.rows = kept;
    Ok((table, dropped))
}

/// Strict integer coercion for identifier columns. Any value that is
/// not (or does not parse as) an integer aborts the run.
pub fn coerce_int_strict(mut table: Table, column: &str) -> Result<Table, CleanError> {
    let idx = column_index(&table, column)?;

    for row in &mut table.rows {
        let cell = &row.cells[idx];
        let coerced = match cell {
            CellValue::Int(i) => Some(*i),
            CellValue::Text(s) => s.trim().parse::<i64>().ok(),
            _ => None,
        };
        match coerced {
            Some(i) => row.cells[idx] = CellValue::Int(i),
            None => {
                return Err(CleanError::StrictCoercion {
                    column: column.to_string(),
                    value: cell.display(),
                    row: row.source_line,
                    target: CellType::Int,
                })
            }
        }
    }
    Ok(table)
}

/// Categorical fix-up: substring substitution of a known historical
/// data-entry typo. Applies to text cells only.
pub fn replace_in_column(
    mut table: Table,
    column: &str,
    from: &str,
    to: &str,
) -> Result<Table, CleanError> {
    let idx = column_index(&table, column)?;

    for row in &mut table.rows {
        if let CellValue::Text(s) = &mut row.cells[idx] {
            if s.contains(from) {
                *s = s.replace(from, to);
            }
        }
    }
    Ok(table)
}

/// Trim surrounding whitespace from a text column.
pub fn trim_column(mut table: Table, column: &str) -> Result<Table, CleanError> {
    let idx = column_index(&table, column)?;

    for row in &mut table.rows {
        if let CellValue::Text(s) = &mut row.cells[idx] {
            let trimmed = s.trim();
            if trimmed.len() != s.len() {
                *s = trimmed.to_string();
            }
        }
    }
    Ok(table)
}

/// Strip everything but ASCII digits from a text column, used for
/// counts embedded in noisy strings. A value left empty will fail the
/// strict integer coercion that follows.
pub fn sanitize_digits(mut table: Table, column: &str) -> Result<Table, CleanError> {
    let idx = column_index(&table, column)?;

    for row in &mut table.rows {
        if let CellValue::Text(s) = &mut row.cells[idx] {
            *s = s.trim().chars().filter(|c| c.is_ascii_digit()).collect();
        }
    }
    Ok(table)
}

/// Lenient numeric coercion: unparseable values become absent rather
/// than dropping the row or aborting. Used where a later stage decides
/// what absence means.
pub fn coerce_number_lenient(mut table: Table, columns: &[&str]) -> Result<Table, CleanError> {
    for column in columns {
        let idx = column_index(&table, column)?;
        for row in &mut table.rows {
            if let CellValue::Text(s) = &row.cells[idx] {
                let trimmed = s.trim();
                row.cells[idx] = if let Ok(i) = trimmed.parse::<i64>() {
                    CellValue::Int(i)
                } else if let Ok(f) = trimmed.parse::<f64>() {
                    CellValue::Float(f)
                } else {
                    CellValue::Absent
                };
            }
        }
    }
    Ok(table)
}

/// Strict cast of already-numeric columns to integers.
pub fn cast_int_strict(mut table: Table, columns: &[&str]) -> Result<Table, CleanError> {
    for column in columns {
        let idx = column_index(&table, column)?;
        for row in &mut table.rows {
            let cell = &row.cells[idx];
            let cast = match cell {
                CellValue::Int(i) => Some(*i),
                CellValue::Float(f) if f.fract() == 0.0 => Some(*f as i64),
                _ => None,
            };
            match cast {
                Some(i) => row.cells[idx] = CellValue::Int(i),
                None => {
                    return Err(CleanError::StrictCoercion {
                        column: column.to_string(),
                        value: cell.display(),
                        row: row.source_line,
                        target: CellType::Int,
                    })
                }
            }
        }
    }
    Ok(table)
}

/// Strict cast of a column to float, the final verification that every
/// remaining value is numeric.
pub fn cast_float_strict(mut table: Table, column: &str) -> Result<Table, CleanError> {
    let idx = column_index(&table, column)?;

    for row in &mut table.rows {
        let cell = &row.cells[idx];
        let cast = match cell {
            CellValue::Float(f) => Some(*f),
            CellValue::Int(i) => Some(*i as f64),
            _ => None,
        };
        match cast {
            Some(f) => row.cells[idx] = CellValue::Float(f),
            None => {
                return Err(CleanError::StrictCoercion {
                    column: column.to_string(),
                    value: cell.display(),
                    row: row.source_line,
                    target: CellType::Float,
                })
            }
        }
    }
    Ok(table)
}

/// Drop rows whose value in the named column is absent.
pub fn drop_absent_in(mut table: Table, column: &str) -> Result<(Table, usize), CleanError> {
    let idx = column_index(&table, column)?;

    let before = table.rows.len();
    table.rows.retain(|row| !row.cells[idx].is_absent());
    let dropped = before - table.rows.len();
    Ok((table, dropped))
}

/// Drop rows with an absence anywhere.
pub fn drop_absent_rows(mut table: Table) -> (Table, usize) {
    let before = table.rows.len();
    table.rows.retain(|row| row.present_count() == row.cells.len());
    let dropped = before - table.rows.len();
    (table, dropped)
}

/// Build a combined timestamp column from separate year/month/day/time
/// text columns. Malformed combinations become absent; the row is kept
/// for a later stage to judge.
pub fn build_timestamp(
    mut table: Table,
    output_column: &str,
) -> Result<Table, CleanError> {
    let year = column_index(&table, "year")?;
    let month = column_index(&table, "month")?;
    let day = column_index(&table, "day")?;
    let time = column_index(&table, "timestamp")?;

    // On re-runs the column already exists; rebuilding it in place
    // keeps the stage a fixed point.
    let existing = table.column_index(output_column);

    let cells: Vec<CellValue> = table
        .rows
        .iter()
        .map(|row| {
            let parts = [
                &row.cells[year],
                &row.cells[month],
                &row.cells[day],
                &row.cells[time],
            ];
            let combined = match parts {
                [y, m, d, CellValue::Text(t)]
                    if !y.is_absent() && !m.is_absent() && !d.is_absent() =>
                {
                    format!("{}-{}-{} {}", y, m, d, t)
                }
                _ => return CellValue::Absent,
            };
            match NaiveDateTime::parse_from_str(&combined, "%Y-%m-%d %H:%M:%S") {
                Ok(dt) => CellValue::DateTime(dt),
                Err(_) => CellValue::Absent,
            }
        })
        .collect();

    match existing {
        Some(idx) => {
            for (row, cell) in table.rows.iter_mut().zip(cells) {
                row.cells[idx] = cell;
            }
        }
        None => table.push_column(output_column, cells),
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mixed_date() {
        let expect = NaiveDate::from_ymd_opt(2013, 10, 14).unwrap();
        assert_eq!(parse_mixed_date("2013-10-14"), Some(expect));
        assert_eq!(parse_mixed_date("14/10/2013"), Some(expect));
        assert_eq!(parse_mixed_date("2013 October 14"), Some(expect));
        assert_eq!(parse_mixed_date("October 2013 14"), Some(expect));
        assert_eq!(parse_mixed_date("14 October 2013"), Some(expect));
        assert_eq!(parse_mixed_date("PJ4EMLH3WW"), None);
    }

    #[test]
    fn test_day_first_for_ambiguous_dates() {
        // 03/04/2020 is the 3rd of April, not March 4th
        assert_eq!(
            parse_mixed_date("03/04/2020"),
            Some(NaiveDate::from_ymd_opt(2020, 4, 3).unwrap())
        );
    }

    #[test]
    fn test_coerce_date_drops_bad_rows() {
        let mut table = Table::with_columns(&["join_date"]);
        table.add_row(vec!["2013-10-14".into()], 1);
        table.add_row(vec!["not a date".into()], 2);
        table.add_row(vec![CellValue::Absent], 3);

        let (cleaned, dropped) = coerce_date(table, "join_date").unwrap();
        assert_eq!(dropped, 2);
        assert_eq!(cleaned.row_count(), 1);
        assert!(matches!(cleaned.rows[0].cells[0], CellValue::Date(_)));
    }

    #[test]
    fn test_coerce_int_strict_failure() {
        let mut table = Table::with_columns(&["card_number"]);
        table.add_row(vec!["4537509987455".into()], 1);
        table.add_row(vec!["VAB9DSB8ZM".into()], 2);

        let err = coerce_int_strict(table, "card_number").unwrap_err();
        match err {
            CleanError::StrictCoercion { column, row, .. } => {
                assert_eq!(column, "card_number");
                assert_eq!(row, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_column() {
        let table = Table::with_columns(&["a"]);
        assert!(matches!(
            coerce_int_strict(table, "b"),
            Err(CleanError::MissingColumn { .. })
        ));
    }

    #[test]
    fn test_sanitize_digits() {
        let mut table = Table::with_columns(&["staff_numbers"]);
        table.add_row(vec![" 30e5 ".into()], 1);
        let sanitized = sanitize_digits(table, "staff_numbers").unwrap();
        assert_eq!(sanitized.rows[0].cells[0], CellValue::Text("305".into()));
    }

    #[test]
    fn test_replace_in_column_substring() {
        let mut table = Table::with_columns(&["continent"]);
        table.add_row(vec!["eeEurope".into()], 1);
        table.add_row(vec!["Europe".into()], 2);
        let fixed = replace_in_column(table, "continent", "eeEurope", "Europe").unwrap();
        assert_eq!(fixed.rows[0].cells[0], CellValue::Text("Europe".into()));
        assert_eq!(fixed.rows[1].cells[0], CellValue::Text("Europe".into()));
    }

    #[test]
    fn test_coerce_number_lenient() {
        let mut table = Table::with_columns(&["month"]);
        table.add_row(vec!["7".into()], 1);
        table.add_row(vec!["7.5".into()], 2);
        table.add_row(vec!["JULY".into()], 3);
        let coerced = coerce_number_lenient(table, &["month"]).unwrap();
        assert_eq!(coerced.rows[0].cells[0], CellValue::Int(7));
        assert_eq!(coerced.rows[1].cells[0], CellValue::Float(7.5));
        assert_eq!(coerced.rows[2].cells[0], CellValue::Absent);
    }

    #[test]
    fn test_build_timestamp() {
        let mut table = Table::with_columns(&["year", "month", "day", "timestamp"]);
        table.add_row(
            vec!["2020".into(), "7".into(), "1".into(), "10:00:00".into()],
            1,
        );
        table.add_row(
            vec!["2020".into(), "13".into(), "1".into(), "10:00:00".into()],
            2,
        );

        let combined = build_timestamp(table, "date_timestamp").unwrap();
        let idx = combined.column_index("date_timestamp").unwrap();
        assert!(matches!(combined.rows[0].cells[idx], CellValue::DateTime(_)));
        // Invalid month yields absence, not an immediate drop
        assert_eq!(combined.rows[1].cells[idx], CellValue::Absent);
        assert_eq!(combined.row_count(), 2);
    }
}
