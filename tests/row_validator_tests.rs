use chrono::NaiveDate;
use sheet_charts::core::{CellValue, RawRecord};
use sheet_charts::ingest::{
    DEFAULT_DATE_FORMAT, RowRejection, parse_instant, read_records, validate_record, validate_rows,
};

fn record(fields: &[(&str, CellValue)]) -> RawRecord {
    fields.iter().cloned().collect()
}

fn text(value: &str) -> CellValue {
    CellValue::Text(value.to_owned())
}

#[test]
fn valid_row_gets_resolved_time_field() {
    let raw = record(&[("A", CellValue::Number(10.0)), ("H", text("2024-03-05 12:30:00"))]);
    let validated = validate_record(raw, "H", DEFAULT_DATE_FORMAT).expect("valid row");

    let expected = NaiveDate::from_ymd_opt(2024, 3, 5)
        .and_then(|d| d.and_hms_opt(12, 30, 0))
        .expect("valid instant");
    assert_eq!(validated.time(), expected);
    assert_eq!(validated.get("H"), Some(&CellValue::Instant(expected)));
    assert_eq!(validated.number("A"), Some(10.0));
}

#[test]
fn text_in_value_column_drops_the_row() {
    let raw = record(&[("A", text("abc")), ("H", text("2024-03-05 12:30:00"))]);
    assert_eq!(
        validate_record(raw, "H", DEFAULT_DATE_FORMAT),
        Err(RowRejection::NonNumericField {
            column: "A".to_owned()
        })
    );
}

#[test]
fn bool_in_value_column_drops_the_row() {
    let raw = record(&[("A", CellValue::Bool(true)), ("H", text("2024-03-05 12:30:00"))]);
    assert!(validate_record(raw, "H", DEFAULT_DATE_FORMAT).is_err());
}

#[test]
fn empty_and_absent_values_are_kept() {
    let raw = record(&[("A", CellValue::Empty), ("H", text("2024-03-05 12:30:00"))]);
    let validated = validate_record(raw, "H", DEFAULT_DATE_FORMAT).expect("sparse row");
    assert_eq!(validated.get("A"), Some(&CellValue::Empty));
    assert_eq!(validated.number("A"), None);
    assert_eq!(validated.get("B"), None);
}

#[test]
fn time_source_must_resolve() {
    let cases = [
        (record(&[("A", CellValue::Number(1.0))]), RowRejection::MissingTime),
        (record(&[("H", CellValue::Empty)]), RowRejection::MissingTime),
        (record(&[("H", text("2024-13-40 99:99:99"))]), RowRejection::UnparsableTime),
        (record(&[("H", text("2024-03-05"))]), RowRejection::UnparsableTime),
        (record(&[("H", text("05/03/2024 12:00:00"))]), RowRejection::UnparsableTime),
        (record(&[("H", CellValue::Number(20_240_305.0))]), RowRejection::UnparsableTime),
    ];

    for (raw, expected) in cases {
        assert_eq!(validate_record(raw, "H", DEFAULT_DATE_FORMAT), Err(expected));
    }
}

#[test]
fn date_parser_rejects_deviations() {
    assert!(parse_instant("2024-02-29 00:00:00", DEFAULT_DATE_FORMAT).is_some());
    assert!(parse_instant(" 2024-02-29 00:00:00 ", DEFAULT_DATE_FORMAT).is_some());
    assert!(parse_instant("2023-02-29 00:00:00", DEFAULT_DATE_FORMAT).is_none());
    assert!(parse_instant("2024-03-05T12:00:00", DEFAULT_DATE_FORMAT).is_none());
    assert!(parse_instant("2024-03-05 12:00", DEFAULT_DATE_FORMAT).is_none());
    assert!(parse_instant("", DEFAULT_DATE_FORMAT).is_none());
}

#[test]
fn validate_rows_preserves_order_and_keeps_duplicates() {
    let text = "A,B,H\n\
                1,2,2024-03-01 00:00:00\n\
                abc,2,2024-03-02 00:00:00\n\
                3,,2024-03-03 00:00:00\n\
                4,5,2024-13-40 99:99:99\n\
                3,,2024-03-03 00:00:00\n\
                6\n";
    let raw = read_records(text).expect("valid csv");
    let validated = validate_rows(raw, "H", DEFAULT_DATE_FORMAT);

    let a_values: Vec<Option<f64>> = validated.iter().map(|r| r.number("A")).collect();
    assert_eq!(a_values, vec![Some(1.0), Some(3.0), Some(3.0)]);
    assert_eq!(validated[1], validated[2]);
    assert!(validated.windows(2).all(|pair| pair[0].time() <= pair[1].time()));
}

#[test]
fn the_time_column_name_is_configurable() {
    let raw = read_records("when,A\n2024-03-05 12:00:00,1\n").expect("valid csv");
    assert_eq!(validate_rows(raw.clone(), "when", DEFAULT_DATE_FORMAT).len(), 1);
    assert!(validate_rows(raw, "H", DEFAULT_DATE_FORMAT).is_empty());
}
