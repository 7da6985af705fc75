use chrono::NaiveDate;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use super::{check_header, csv_reader, line_of, ParseError};
use crate::models::{MacroDay, MacroInfo};

/// Column layout of the macro tracking export.
pub const MACRO_HEADER: [&str; 12] = [
    "Date",
    "Expenditure",
    "Trend Weight (kg)",
    "Weight (kg)",
    "Calories (kcal)",
    "Protein (g)",
    "Fat (g)",
    "Carbs (g)",
    "Target Calories (kcal)",
    "Target Protein (g)",
    "Target Fat (g)",
    "Target Carbs (g)",
];

/// Parses a macro tracking export file.
pub fn parse_macro_days(path: impl AsRef<Path>) -> Result<Vec<MacroDay>, ParseError> {
    let file = File::open(path.as_ref())?;
    read_macro_days(file)
}

/// Parses macro tracking rows in file order.
///
/// Date, expenditure and both weights are strict: one bad value rejects the
/// file. The eight nutrient columns are lenient and read as zero when blank or
/// not an integer.
pub fn read_macro_days<R: Read>(reader: R) -> Result<Vec<MacroDay>, ParseError> {
    let mut records = csv_reader(reader).into_records();

    let header = records.next().ok_or(ParseError::MissingHeader)??;
    check_header(&header, &MACRO_HEADER)?;

    let mut days = Vec::new();
    for record in records {
        let record = record?;
        let line = line_of(&record);

        if record.len() != MACRO_HEADER.len() {
            return Err(ParseError::RecordLength {
                line,
                expected: MACRO_HEADER.len(),
                found: record.len(),
            });
        }

        days.push(MacroDay {
            date: parse_date(&record[0], line)?,
            expenditure: parse_strict(&record[1], line, "expenditure")?,
            trend_weight: parse_strict(&record[2], line, "trend weight")?,
            weight: parse_strict(&record[3], line, "weight")?,
            actual: MacroInfo {
                calories: parse_lenient(&record[4]),
                protein: parse_lenient(&record[5]),
                fat: parse_lenient(&record[6]),
                carbs: parse_lenient(&record[7]),
            },
            target: MacroInfo {
                calories: parse_lenient(&record[8]),
                protein: parse_lenient(&record[9]),
                fat: parse_lenient(&record[10]),
                carbs: parse_lenient(&record[11]),
            },
        });
    }

    Ok(days)
}

/// `M/D/YYYY`, month and day with or without a leading zero. Only digits and
/// slashes are accepted, so padded values are rejected like the other strict fields.
fn parse_date(value: &str, line: u64) -> Result<NaiveDate, ParseError> {
    let invalid = || ParseError::InvalidDate {
        line,
        value: value.to_string(),
    };

    let parts: Vec<&str> = value.split('/').collect();
    let [month, day, year] = parts[..] else {
        return Err(invalid());
    };

    let digits = |part: &str, min: usize, max: usize| {
        (min..=max).contains(&part.len()) && part.bytes().all(|b| b.is_ascii_digit())
    };
    if !digits(month, 1, 2) || !digits(day, 1, 2) || !digits(year, 4, 4) {
        return Err(invalid());
    }

    let (Ok(year), Ok(month), Ok(day)) = (
        year.parse::<i32>(),
        month.parse::<u32>(),
        day.parse::<u32>(),
    ) else {
        return Err(invalid());
    };
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid)
}

fn parse_strict<T: FromStr>(value: &str, line: u64, column: &'static str) -> Result<T, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidNumber {
        line,
        column,
        value: value.to_string(),
    })
}

fn parse_lenient(value: &str) -> i64 {
    value.parse().unwrap_or(0)
}
