//! Tolerant cell conversion
//!
//! Spreadsheet cells arrive loosely typed; these helpers convert them to
//! the target type or degrade to "missing". A cell that fails conversion is
//! never an error: the row survives with the field undefined and downstream
//! aggregation skips it.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use workdeck_domain::CellValue;

/// Characters that are not part of a numeric amount: currency symbols,
/// letters, spaces (including NBSP from pt-BR locale exports).
static NON_NUMERIC: Lazy<Regex> = Lazy::new(|| {
    #[allow(clippy::unwrap_used)] // literal pattern, cannot fail
    let pattern = Regex::new(r"[^0-9,.\-]").unwrap();
    pattern
});

/// Date formats seen in sheet exports, tried in order.
const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%d/%m/%Y", "%d/%m/%y", "%Y/%m/%d"];

/// Trimmed, non-empty text; `None` otherwise.
pub fn text(cell: &CellValue) -> Option<String> {
    match cell {
        CellValue::Text(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        _ => None,
    }
}

/// Calendar date from a typed date cell or a textual date.
///
/// Unparseable dates degrade to `None`. Numeric cells are NOT interpreted
/// as spreadsheet serial dates; the ingestion collaborator resolves those
/// before handing the table over.
pub fn date(cell: &CellValue) -> Option<NaiveDate> {
    match cell {
        CellValue::Date(d) => Some(*d),
        CellValue::Text(s) => {
            let trimmed = s.trim();
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
        }
        _ => None,
    }
}

/// Finite numeric value from a number cell or numeric text.
///
/// Text amounts are cleaned of currency decoration first; both `1,234.56`
/// and pt-BR `1.234,56` styles parse. Degrades to `None` on failure.
pub fn number(cell: &CellValue) -> Option<f64> {
    let parsed = match cell {
        CellValue::Number(n) => Some(*n),
        CellValue::Text(s) => parse_numeric_text(s),
        _ => None,
    };
    parsed.filter(|n| n.is_finite())
}

/// Non-negative duration in hours; missing or unparseable cells become 0.
///
/// Negative garbage also clamps to 0: produced hours below zero carry no
/// meaning and would corrupt capacity sums.
pub fn duration_hours(cell: &CellValue) -> f64 {
    number(cell).filter(|n| *n >= 0.0).unwrap_or(0.0)
}

fn parse_numeric_text(s: &str) -> Option<f64> {
    let cleaned = NON_NUMERIC.replace_all(s.trim(), "");
    if cleaned.is_empty() {
        return None;
    }

    // With both separators present, the right-most one is the decimal
    // mark; the other is a thousands separator.
    let last_comma = cleaned.rfind(',');
    let last_dot = cleaned.rfind('.');
    let normalized = match (last_comma, last_dot) {
        (Some(comma), Some(dot)) if comma > dot => {
            cleaned.replace('.', "").replace(',', ".")
        }
        (Some(_), Some(_)) => cleaned.replace(',', ""),
        // Comma-only: decimal mark when followed by 1-2 digits (pt-BR
        // cents), thousands separator otherwise.
        (Some(comma), None) => {
            let decimals = cleaned.len() - comma - 1;
            if cleaned.matches(',').count() == 1 && (1..=2).contains(&decimals) {
                cleaned.replace(',', ".")
            } else {
                cleaned.replace(',', "")
            }
        }
        _ => cleaned.into_owned(),
    };

    normalized.parse().ok()
}
