//! Package-weight parsing
//!
//! Raw product weights arrive as free-form strings: `"80g"`,
//! `"3 x 400g"`, `"1.5kg"`, `"16oz"`, or malformed entries like
//! `"12g ."`. The parser is an ordered rule list evaluated first match
//! wins; the order is a contract, since the suffix patterns overlap
//! (`"1.5kg"` also ends in `g`).
//!
//! Callers must trim surrounding whitespace and rewrite an `ml` suffix
//! to `g` before parsing (liquid volumes are treated as grams by
//! convention); those are pipeline stages, not parser concerns.

use thiserror::Error;

/// Divisor applied to ounce values. The historical conversion divides
/// the ounce amount by this gram-equivalent constant directly; keep
/// the exact constant and order of operations for output
/// compatibility.
const OZ_DIVISOR: f64 = 35.274;

/// A weight string that could not be converted to kilograms.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WeightError {
    /// No rule's pattern matched the input.
    #[error("unrecognized weight format: '{0}'")]
    UnrecognizedFormat(String),
    /// A rule matched but the numeric portion did not parse.
    #[error("invalid number in weight: '{0}'")]
    InvalidNumber(String),
}

/// One branch of the parser: a pattern predicate and the conversion
/// applied when it matches. `convert` returns `None` when the numeric
/// portion is unparseable.
struct WeightRule {
    name: &'static str,
    applies: fn(&str) -> bool,
    convert: fn(&str) -> Option<f64>,
}

fn is_multipack(s: &str) -> bool {
    s.contains('x')
}

/// `<count> x <grams>` — strip the gram suffix, multiply out, to kg.
fn convert_multipack(s: &str) -> Option<f64> {
    let stripped = s.replace('g', "");
    let (count, amount) = stripped.split_once('x')?;
    let count: f64 = count.trim().parse().ok()?;
    let amount: f64 = amount.trim().parse().ok()?;
    Some(count * amount / 1000.0)
}

fn has_stray_period(s: &str) -> bool {
    s.ends_with('.')
}

/// Malformed gram entry with a stray trailing `.` (e.g. `"12g ."`).
fn convert_stray_period(s: &str) -> Option<f64> {
    let grams: f64 = s
        .trim_end_matches('.')
        .trim_end()
        .trim_end_matches('g')
        .parse()
        .ok()?;
    Some(grams / 1000.0)
}

fn is_kilograms(s: &str) -> bool {
    s.ends_with("kg")
}

fn convert_kilograms(s: &str) -> Option<f64> {
    s.trim_end_matches("kg").parse().ok()
}

fn is_grams(s: &str) -> bool {
    s.ends_with('g')
}

fn convert_grams(s: &str) -> Option<f64> {
    let grams: f64 = s.trim_end_matches('g').parse().ok()?;
    Some(grams / 1000.0)
}

fn is_ounces(s: &str) -> bool {
    s.ends_with("oz")
}

fn convert_ounces(s: &str) -> Option<f64> {
    let ounces: f64 = s.trim_end_matches("oz").parse().ok()?;
    Some(ounces / OZ_DIVISOR)
}

/// Rule precedence: multipack before any suffix rule, stray-period
/// before the gram rule, kg before g.
const RULES: &[WeightRule] = &[
    WeightRule {
        name: "multipack",
        applies: is_multipack,
        convert: convert_multipack,
    },
    WeightRule {
        name: "stray-period",
        applies: has_stray_period,
        convert: convert_stray_period,
    },
    WeightRule {
        name: "kilograms",
        applies: is_kilograms,
        convert: convert_kilograms,
    },
    WeightRule {
        name: "grams",
        applies: is_grams,
        convert: convert_grams,
    },
    WeightRule {
        name: "ounces",
        applies: is_ounces,
        convert: convert_ounces,
    },
];

/// Parse a free-form weight string into kilograms.
///
/// A string matching none of the rules is an error, never passed
/// through unconverted: the caller treats both error cases as a
/// rejected value and the row is dropped downstream.
pub fn parse_weight(raw: &str) -> Result<f64, WeightError> {
    for rule in RULES {
        if (rule.applies)(raw) {
            tracing::trace!(rule = rule.name, raw, "weight rule matched");
            return (rule.convert)(raw)
                .ok_or_else(|| WeightError::InvalidNumber(raw.to_string()));
        }
    }
    Err(WeightError::UnrecognizedFormat(raw.to_string()))
}
