use chrono::NaiveDateTime;
use tracing::{debug, trace};

use crate::core::{CellValue, RawRecord, ValidatedRecord};

use super::date_parser::parse_instant;

/// Why a record was excluded. Never surfaced as an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowRejection {
    MissingTime,
    UnparsableTime,
    NonNumericField { column: String },
}

/// Resolves the time-source field and checks every other field.
///
/// Numbers, blank cells and absent cells are accepted; text or booleans
/// outside the time-source column reject the record.
pub fn validate_record(
    record: RawRecord,
    time_column: &str,
    date_format: &str,
) -> Result<ValidatedRecord, RowRejection> {
    let time = resolve_time(&record, time_column, date_format)?;

    if let Some((column, _)) = record
        .iter()
        .find(|(column, value)| *column != time_column && !value.is_chartable())
    {
        return Err(RowRejection::NonNumericField {
            column: column.to_owned(),
        });
    }

    let mut fields = record.into_fields();
    fields.insert(time_column.to_owned(), CellValue::Instant(time));
    Ok(ValidatedRecord::new(time, fields))
}

/// Filters raw records down to validated ones, preserving input order.
pub fn validate_rows(records: Vec<RawRecord>, time_column: &str, date_format: &str) -> Vec<ValidatedRecord> {
    let input_count = records.len();
    let validated: Vec<ValidatedRecord> = records
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| match validate_record(record, time_column, date_format) {
            Ok(validated) => Some(validated),
            Err(reason) => {
                trace!(index, ?reason, "dropping row");
                None
            }
        })
        .collect();

    debug!(
        input_count,
        retained = validated.len(),
        dropped = input_count - validated.len(),
        "validated rows"
    );
    validated
}

fn resolve_time(record: &RawRecord, time_column: &str, date_format: &str) -> Result<NaiveDateTime, RowRejection> {
    match record.get(time_column) {
        None | Some(CellValue::Empty) => Err(RowRejection::MissingTime),
        Some(CellValue::Text(text)) => {
            parse_instant(text, date_format).ok_or(RowRejection::UnparsableTime)
        }
        Some(CellValue::Instant(instant)) => Ok(*instant),
        Some(_) => Err(RowRejection::UnparsableTime),
    }
}
