use csv::{ReaderBuilder, Trim};
use tracing::debug;

use crate::core::{CellValue, RawRecord};
use crate::error::DashboardResult;

/// Tokenizes CSV text with a header row into dynamically typed records.
///
/// Header labels are trimmed, blank lines are skipped and rows may be shorter
/// or longer than the header. Missing trailing cells are absent from the
/// record; surplus cells are ignored.
pub fn read_records(text: &str) -> DashboardResult<Vec<RawRecord>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::Headers)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?.clone();
    if headers.is_empty() {
        return Ok(Vec::new());
    }

    let mut records: Vec<RawRecord> = Vec::new();
    for row in reader.records() {
        let row = row?;
        if row.len() == 1 && row.get(0).is_some_and(str::is_empty) {
            continue;
        }
        records.push(
            headers
                .iter()
                .zip(row.iter())
                .map(|(label, cell)| (label, parse_cell(cell)))
                .collect(),
        );
    }

    debug!(
        columns = headers.len(),
        rows = records.len(),
        "tokenized csv"
    );
    Ok(records)
}

/// Magnitude at which numerals stop being typed as numbers (2^53).
const MAX_NUMERIC_MAGNITUDE: f64 = 9_007_199_254_740_992.0;

/// Types one cell: blank → `Empty`, `true`/`false` → `Bool`, decimal
/// numerals with magnitude below 2^53 → `Number`, anything else → `Text`.
#[must_use]
pub fn parse_cell(raw: &str) -> CellValue {
    match raw {
        "" => return CellValue::Empty,
        "true" | "TRUE" => return CellValue::Bool(true),
        "false" | "FALSE" => return CellValue::Bool(false),
        _ => {}
    }

    if is_decimal_numeral(raw) {
        if let Ok(value) = raw.trim().parse::<f64>() {
            if value.abs() < MAX_NUMERIC_MAGNITUDE {
                return CellValue::Number(value);
            }
        }
    }
    CellValue::Text(raw.to_owned())
}

/// `-?(digits[.]|.digits|digits.digits)([eE][+-]?digits)?` with optional
/// surrounding whitespace.
fn is_decimal_numeral(raw: &str) -> bool {
    let bytes = raw.trim().as_bytes();
    let mut idx = 0;
    if bytes.first() == Some(&b'-') {
        idx += 1;
    }

    let int_digits = count_digits(&bytes[idx..]);
    idx += int_digits;
    let mut frac_digits = 0;
    if bytes.get(idx) == Some(&b'.') {
        idx += 1;
        frac_digits = count_digits(&bytes[idx..]);
        idx += frac_digits;
    }
    if int_digits == 0 && frac_digits == 0 {
        return false;
    }

    if matches!(bytes.get(idx), Some(b'e' | b'E')) {
        idx += 1;
        if matches!(bytes.get(idx), Some(b'+' | b'-')) {
            idx += 1;
        }
        let exp_digits = count_digits(&bytes[idx..]);
        if exp_digits == 0 {
            return false;
        }
        idx += exp_digits;
    }

    idx == bytes.len()
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}
