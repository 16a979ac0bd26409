//! Spreadsheet export ingestion: fetch, tokenize, resolve dates, validate.

pub mod csv_table;
pub mod date_parser;
pub mod row_validator;
pub mod source;

pub use csv_table::{parse_cell, read_records};
pub use date_parser::{DEFAULT_DATE_FORMAT, parse_instant};
pub use row_validator::{RowRejection, validate_record, validate_rows};
#[cfg(feature = "http-source")]
pub use source::HttpSheetSource;
pub use source::{SheetSource, StaticSheetSource};
