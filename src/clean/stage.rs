//! Per-source pipeline definitions
//!
//! Each source kind maps to a fixed, ordered list of stage
//! descriptors. Adding a source means adding data here, not new
//! control flow in the cleaner.

use crate::source::SourceKind;

/// One step of a cleaning pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stage {
    /// Replace `"NULL"` sentinels with absence, drop rows with fewer
    /// than `keep_threshold` present cells.
    NormalizeNulls { keep_threshold: usize },
    /// Forgiving date coercion; rows with unparseable values are
    /// dropped.
    CoerceDate { column: &'static str },
    /// Substring substitution of a known bad value.
    Replace {
        column: &'static str,
        from: &'static str,
        to: &'static str,
    },
    /// Trim surrounding whitespace.
    Trim { column: &'static str },
    /// Strip everything but ASCII digits.
    SanitizeDigits { column: &'static str },
    /// Strict integer coercion; aborts on any unconvertable value.
    CoerceInt { column: &'static str },
    /// Drop duplicate rows by one column, keeping the first occurrence.
    DedupBy { column: &'static str },
    /// Drop redundant/PII columns.
    DropColumns { columns: &'static [&'static str] },
    /// Parse free-form weight strings into kilograms; failures become
    /// absence.
    ParseWeight { column: &'static str },
    /// Drop rows whose value in one column is absent.
    DropAbsentIn { column: &'static str },
    /// Strict float cast; aborts on any non-numeric value.
    CastFloat { column: &'static str },
    /// Combine year/month/day/timestamp text columns into one
    /// timestamp column; malformed combinations become absence.
    BuildTimestamp { output: &'static str },
    /// Lenient numeric coercion; unparseable values become absence.
    CoerceNumber { columns: &'static [&'static str] },
    /// Drop rows with an absence in any column.
    DropAbsentRows,
    /// Strict integer cast of already-numeric columns.
    CastInt { columns: &'static [&'static str] },
}

impl Stage {
    /// Short name for logging
    pub fn name(&self) -> &'static str {
        match self {
            Stage::NormalizeNulls { .. } => "normalize-nulls",
            Stage::CoerceDate { .. } => "coerce-date",
            Stage::Replace { .. } => "replace",
            Stage::Trim { .. } => "trim",
            Stage::SanitizeDigits { .. } => "sanitize-digits",
            Stage::CoerceInt { .. } => "coerce-int",
            Stage::DedupBy { .. } => "dedup",
            Stage::DropColumns { .. } => "drop-columns",
            Stage::ParseWeight { .. } => "parse-weight",
            Stage::DropAbsentIn { .. } => "drop-absent-in",
            Stage::CastFloat { .. } => "cast-float",
            Stage::BuildTimestamp { .. } => "build-timestamp",
            Stage::CoerceNumber { .. } => "coerce-number",
            Stage::DropAbsentRows => "drop-absent-rows",
            Stage::CastInt { .. } => "cast-int",
        }
    }
}

/// The ordered cleaning pipeline for a source kind.
pub fn pipeline(kind: SourceKind) -> Vec<Stage> {
    match kind {
        SourceKind::Users => vec![
            Stage::NormalizeNulls { keep_threshold: 1 },
            Stage::CoerceDate { column: "join_date" },
            Stage::Replace {
                column: "country_code",
                from: "GGB",
                to: "GB",
            },
        ],
        SourceKind::CardDetails => vec![
            Stage::NormalizeNulls { keep_threshold: 1 },
            Stage::CoerceDate {
                column: "date_payment_confirmed",
            },
            Stage::Replace {
                column: "card_number",
                from: "?",
                to: "",
            },
            Stage::CoerceInt {
                column: "card_number",
            },
            Stage::DedupBy {
                column: "card_number",
            },
        ],
        SourceKind::Stores => vec![
            Stage::NormalizeNulls { keep_threshold: 1 },
            Stage::CoerceDate {
                column: "opening_date",
            },
            Stage::Replace {
                column: "continent",
                from: "eeAmerica",
                to: "America",
            },
            Stage::Replace {
                column: "continent",
                from: "eeEurope",
                to: "Europe",
            },
            Stage::SanitizeDigits {
                column: "staff_numbers",
            },
            Stage::CoerceInt {
                column: "staff_numbers",
            },
        ],
        // The products index column is never null, so an otherwise
        // empty row still has one present cell; the threshold of 2
        // catches those. Weight parse failures surface as absence and
        // the row is rejected before the final strict cast.
        SourceKind::Products => vec![
            Stage::NormalizeNulls { keep_threshold: 2 },
            Stage::Trim { column: "weight" },
            Stage::Replace {
                column: "weight",
                from: "ml",
                to: "g",
            },
            Stage::ParseWeight { column: "weight" },
            Stage::NormalizeNulls { keep_threshold: 1 },
            Stage::CoerceDate {
                column: "date_added",
            },
            Stage::DropAbsentIn { column: "weight" },
            Stage::CastFloat { column: "weight" },
        ],
        SourceKind::Orders => vec![
            Stage::NormalizeNulls { keep_threshold: 1 },
            Stage::DropColumns {
                columns: &["first_name", "last_name", "1"],
            },
        ],
        SourceKind::DateEvents => vec![
            Stage::NormalizeNulls { keep_threshold: 1 },
            Stage::BuildTimestamp {
                output: "date_timestamp",
            },
            Stage::CoerceNumber {
                columns: &["year", "month", "day"],
            },
            Stage::DropAbsentRows,
            Stage::CastInt {
                columns: &["year", "month", "day"],
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_kind_has_a_pipeline() {
        for kind in SourceKind::ALL {
            let stages = pipeline(kind);
            assert!(!stages.is_empty());
            // Every pipeline starts by normalizing sentinel nulls
            assert!(matches!(stages[0], Stage::NormalizeNulls { .. }));
        }
    }

    #[test]
    fn test_products_rejects_weight_before_final_cast() {
        let stages = pipeline(SourceKind::Products);
        let reject = stages
            .iter()
            .position(|s| *s == Stage::DropAbsentIn { column: "weight" })
            .unwrap();
        let cast = stages
            .iter()
            .position(|s| *s == Stage::CastFloat { column: "weight" })
            .unwrap();
        assert!(reject < cast);
    }
}
