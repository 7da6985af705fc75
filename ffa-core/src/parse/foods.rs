use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::{check_header, csv_reader, line_of, ParseError};
use crate::models::Food;

/// The only column of a food list.
pub const FOOD_HEADER: &str = "Food Name";

/// Parses a food list file.
pub fn parse_foods(path: impl AsRef<Path>) -> Result<Vec<Food>, ParseError> {
    let file = File::open(path.as_ref())?;
    read_foods(file)
}

/// Parses a food list: a `Food Name` header followed by one name per row.
pub fn read_foods<R: Read>(reader: R) -> Result<Vec<Food>, ParseError> {
    let mut records = csv_reader(reader).into_records();

    let header = records.next().ok_or(ParseError::MissingHeader)??;
    check_header(&header, &[FOOD_HEADER])?;

    let mut foods = Vec::new();
    for record in records {
        let record = record?;
        if record.len() != 1 {
            return Err(ParseError::RecordLength {
                line: line_of(&record),
                expected: 1,
                found: record.len(),
            });
        }
        foods.push(Food::new(&record[0]));
    }

    Ok(foods)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    fn names(foods: &[Food]) -> Vec<&str> {
        foods.iter().map(|f| f.name.as_str()).collect()
    }

    #[test]
    fn test_read_foods_keeps_file_order() {
        let foods = read_foods("Food Name\nChicken Breast\nRice\nBroccoli\n".as_bytes()).unwrap();
        assert_eq!(names(&foods), vec!["Chicken Breast", "Rice", "Broccoli"]);
    }

    #[test]
    fn test_read_foods_preserves_duplicates_and_spacing() {
        let foods = read_foods("Food Name\nRice\n Rice \nRice\n".as_bytes()).unwrap();
        assert_eq!(names(&foods), vec!["Rice", " Rice ", "Rice"]);
    }

    #[test]
    fn test_read_foods_header_only() {
        let foods = read_foods("Food Name\n".as_bytes()).unwrap();
        assert!(foods.is_empty());
    }

    #[test]
    fn test_read_foods_quoted_comma_is_one_column() {
        let foods = read_foods("Food Name\n\"Yogurt, Greek\"\n".as_bytes()).unwrap();
        assert_eq!(names(&foods), vec!["Yogurt, Greek"]);
    }

    #[test]
    fn test_read_foods_bare_quote_kept_verbatim() {
        let foods = read_foods("Food Name\nChicken \"Breast\"\n".as_bytes()).unwrap();
        assert_eq!(names(&foods), vec!["Chicken \"Breast\""]);
    }

    #[test]
    fn test_read_foods_wrong_header_name() {
        let err = read_foods("Foods\nRice\n".as_bytes()).unwrap_err();
        assert!(matches!(err, ParseError::HeaderMismatch { position: 0, .. }));
    }

    #[test]
    fn test_read_foods_header_with_extra_column() {
        let err = read_foods("Food Name,Calories\nRice,130\n".as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            ParseError::HeaderLength {
                expected: 1,
                found: 2
            }
        ));
    }

    #[test]
    fn test_read_foods_rejects_whole_file_on_bad_row() {
        let err = read_foods("Food Name\nRice\nOats,extra\nEggs\n".as_bytes()).unwrap_err();
        match err {
            ParseError::RecordLength { line, found, .. } => {
                assert_eq!(line, 3);
                assert_eq!(found, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_read_foods_empty_input() {
        let err = read_foods("".as_bytes()).unwrap_err();
        assert!(matches!(err, ParseError::MissingHeader));
    }

    #[test]
    fn test_parse_foods_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("list.csv");
        let mut file = File::create(&path).unwrap();
        writeln!(file, "Food Name").unwrap();
        writeln!(file, "Chicken Breast").unwrap();
        writeln!(file, "Rice").unwrap();
        drop(file);

        let foods = parse_foods(&path).unwrap();
        assert_eq!(foods.len(), 2);
    }

    #[test]
    fn test_parse_foods_missing_file() {
        let dir = tempdir().unwrap();
        let err = parse_foods(dir.path().join("missing.csv")).unwrap_err();
        assert!(matches!(err, ParseError::Io(_)));
    }
}
