// ============================================================
// RAW CELL PARSER
// ============================================================
// Turn raw strings into typed cells the way a dataframe loader does

use std::collections::HashSet;

use crate::domain::table::{parse_number, CellValue};

/// Tokens read as "no value", matching common dataframe NA defaults
pub const DEFAULT_MISSING_MARKERS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Raw string -> `CellValue` conversion with a configurable missing-marker set
#[derive(Debug, Clone)]
pub struct RawCellParser {
    missing_markers: HashSet<String>,
}

impl Default for RawCellParser {
    fn default() -> Self {
        Self::new(DEFAULT_MISSING_MARKERS.iter().copied())
    }
}

impl RawCellParser {
    pub fn new<I, S>(markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            missing_markers: markers.into_iter().map(Into::into).collect(),
        }
    }

    /// Blank values are always missing, whatever the marker set says
    pub fn is_missing(&self, raw: &str) -> bool {
        let trimmed = raw.trim();
        trimmed.is_empty() || self.missing_markers.contains(trimmed)
    }

    /// Text cell or missing, no numeric coercion
    pub fn parse_text(&self, raw: &str) -> CellValue {
        if self.is_missing(raw) {
            CellValue::Missing
        } else {
            CellValue::Text(raw.trim().to_string())
        }
    }

    /// Type a whole column at once.
    ///
    /// The column becomes numeric only when every present value parses as a
    /// number; otherwise every present value stays text.
    pub fn type_column(&self, raw: Vec<String>) -> Vec<CellValue> {
        let numeric = raw
            .iter()
            .filter(|v| !self.is_missing(v))
            .all(|v| parse_number(v).is_some());

        raw.iter()
            .map(|v| {
                if self.is_missing(v) {
                    CellValue::Missing
                } else if numeric {
                    parse_number(v).map(CellValue::Number).unwrap_or(CellValue::Missing)
                } else {
                    CellValue::Text(v.trim().to_string())
                }
            })
            .collect()
    }
}
