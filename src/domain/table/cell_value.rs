// ============================================================
// CELL VALUE
// ============================================================
// Closed set of raw cell kinds produced by ingestion

use chrono::NaiveDateTime;

/// A single raw cell as handed over by a reader
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Native numeric value (always finite)
    Number(f64),

    /// Loosely typed text; may still look like a number or a date
    Text(String),

    /// Already typed date/time, e.g. a spreadsheet date cell
    Instant(NaiveDateTime),

    /// Absent value
    Missing,
}

impl CellValue {
    pub fn is_missing(&self) -> bool {
        matches!(self, CellValue::Missing)
    }

    /// Numeric reading of this cell: native numbers, or text that parses as one
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            CellValue::Text(s) => parse_number(s),
            CellValue::Instant(_) | CellValue::Missing => None,
        }
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        if value.is_finite() {
            CellValue::Number(value)
        } else {
            CellValue::Missing
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<NaiveDateTime> for CellValue {
    fn from(value: NaiveDateTime) -> Self {
        CellValue::Instant(value)
    }
}

/// Parse an integer or floating-point literal; NaN and infinities are rejected
pub fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("25"), Some(25.0));
        assert_eq!(parse_number(" -3.5 "), Some(-3.5));
        assert_eq!(parse_number("1e3"), Some(1000.0));
        assert_eq!(parse_number("abc"), None);
        assert_eq!(parse_number(""), None);
    }

    #[test]
    fn test_non_finite_is_not_a_number() {
        assert_eq!(parse_number("NaN"), None);
        assert_eq!(parse_number("inf"), None);
        assert_eq!(parse_number("-infinity"), None);
    }

    #[test]
    fn test_as_number() {
        assert_eq!(CellValue::Number(4.0).as_number(), Some(4.0));
        assert_eq!(CellValue::from("42").as_number(), Some(42.0));
        assert_eq!(CellValue::from("active").as_number(), None);
        assert_eq!(CellValue::Missing.as_number(), None);
    }

    #[test]
    fn test_non_finite_float_becomes_missing() {
        assert!(CellValue::from(f64::NAN).is_missing());
        assert_eq!(CellValue::from(1.5), CellValue::Number(1.5));
    }
}
