// ============================================================
// TYPE DETECTOR
// ============================================================
// Decide whether a column is numeric, date-like or categorical

use crate::domain::table::{CellValue, ColumnType};
use crate::infrastructure::tabular::DateParser;

/// Classifies a single column of raw cells
#[derive(Debug, Clone, Default)]
pub struct TypeDetector {
    date_parser: DateParser,
}

impl TypeDetector {
    pub fn new(date_parser: DateParser) -> Self {
        Self { date_parser }
    }

    /// First match wins: number, already-typed instants, parseable dates, category.
    ///
    /// Missing cells never disqualify a type. A column with no present value at
    /// all has no evidence for number or date and is reported as category.
    pub fn detect(&self, column: &[CellValue]) -> ColumnType {
        let present: Vec<&CellValue> = column.iter().filter(|c| !c.is_missing()).collect();
        if present.is_empty() {
            return ColumnType::Category;
        }

        if present.iter().all(|c| c.as_number().is_some()) {
            return ColumnType::Number;
        }

        if present.iter().all(|c| matches!(c, CellValue::Instant(_))) {
            return ColumnType::Date;
        }

        if present
            .iter()
            .all(|c| self.date_parser.parse_cell(c).is_some())
        {
            return ColumnType::Date;
        }

        ColumnType::Category
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn text(values: &[&str]) -> Vec<CellValue> {
        values.iter().map(|v| CellValue::from(*v)).collect()
    }

    #[test]
    fn test_native_numbers() {
        let column = vec![CellValue::Number(25.0), CellValue::Number(30.0), CellValue::Missing];
        assert_eq!(TypeDetector::default().detect(&column), ColumnType::Number);
    }

    #[test]
    fn test_numeric_text_is_number() {
        let column = text(&["1", "2.5", "-3", "1e4"]);
        assert_eq!(TypeDetector::default().detect(&column), ColumnType::Number);
    }

    #[test]
    fn test_mixed_native_and_text_numbers() {
        let column = vec![CellValue::Number(1.0), CellValue::from("2")];
        assert_eq!(TypeDetector::default().detect(&column), ColumnType::Number);
    }

    #[test]
    fn test_typed_instants() {
        let instant = NaiveDate::from_ymd_opt(2023, 1, 15)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let column = vec![CellValue::Instant(instant), CellValue::Missing];
        assert_eq!(TypeDetector::default().detect(&column), ColumnType::Date);
    }

    #[test]
    fn test_date_strings() {
        let column = text(&["2023-01-15", "2023-02-20"]);
        assert_eq!(TypeDetector::default().detect(&column), ColumnType::Date);
    }

    #[test]
    fn test_mixed_date_formats() {
        let column = text(&["2023-01-15", "02/20/2023", "March 3, 2023"]);
        assert_eq!(TypeDetector::default().detect(&column), ColumnType::Date);
    }

    #[test]
    fn test_one_bad_date_disqualifies() {
        let column = text(&["2023-01-15", "not a date"]);
        assert_eq!(TypeDetector::default().detect(&column), ColumnType::Category);
    }

    #[test]
    fn test_number_among_dates_is_category() {
        let column = vec![CellValue::from("2023-01-15"), CellValue::Number(5.0)];
        assert_eq!(TypeDetector::default().detect(&column), ColumnType::Category);
    }

    #[test]
    fn test_categories() {
        let column = text(&["active", "inactive", "active"]);
        assert_eq!(TypeDetector::default().detect(&column), ColumnType::Category);
    }

    #[test]
    fn test_all_missing_is_category() {
        let column = vec![CellValue::Missing, CellValue::Missing];
        assert_eq!(TypeDetector::default().detect(&column), ColumnType::Category);
    }

    #[test]
    fn test_relative_terms_are_not_dates() {
        let column = text(&["today", "yesterday"]);
        assert_eq!(TypeDetector::default().detect(&column), ColumnType::Category);
    }
}
