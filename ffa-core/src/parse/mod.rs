//! Record parsers for the tabular exports dropped into the data directory.
//!
//! Every parser is all-or-nothing: a single bad header or strict field rejects
//! the whole file and no partial result is returned.

mod foods;
mod macros;

pub use foods::{parse_foods, read_foods, FOOD_HEADER};
pub use macros::{parse_macro_days, read_macro_days, MACRO_HEADER};

use std::io;
use thiserror::Error;

/// Errors that reject a whole file.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("File is empty, expected a header row")]
    MissingHeader,

    #[error("Invalid header length: expected {expected} columns, got {found}")]
    HeaderLength { expected: usize, found: usize },

    #[error("Invalid header: expected '{expected}' at position {position}, got '{found}'")]
    HeaderMismatch {
        position: usize,
        expected: String,
        found: String,
    },

    #[error("Invalid record length at line {line}: expected {expected} columns, got {found}")]
    RecordLength {
        line: u64,
        expected: usize,
        found: usize,
    },

    #[error("Invalid date '{value}' at line {line}, expected M/D/YYYY")]
    InvalidDate { line: u64, value: String },

    #[error("Invalid {column} '{value}' at line {line}")]
    InvalidNumber {
        line: u64,
        column: &'static str,
        value: String,
    },
}

/// Builds the CSV reader shared by all parsers.
///
/// Record lengths are left flexible so each parser reports column-count
/// problems itself instead of getting a generic CSV error.
fn csv_reader<R: io::Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader)
}

/// Checks a header row against the expected column names, count first.
fn check_header(header: &csv::StringRecord, expected: &[&str]) -> Result<(), ParseError> {
    if header.len() != expected.len() {
        return Err(ParseError::HeaderLength {
            expected: expected.len(),
            found: header.len(),
        });
    }

    for (position, (found, wanted)) in header.iter().zip(expected).enumerate() {
        if found != *wanted {
            return Err(ParseError::HeaderMismatch {
                position,
                expected: wanted.to_string(),
                found: found.to_string(),
            });
        }
    }

    Ok(())
}

/// 1-based line of a record, for error messages.
fn line_of(record: &csv::StringRecord) -> u64 {
    record.position().map(|p| p.line()).unwrap_or(0)
}
