// ============================================================
// DATE PARSER
// ============================================================
// Permissive, locale-agnostic date/time parsing over an explicit format list

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::domain::table::CellValue;

/// Fixed rendering for every date cell in a `date` column
pub const CANONICAL_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Built-in formats, tried in order. Slash dates are month-first before day-first.
const V1_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
    "%d/%m/%Y",
    "%m-%d-%Y",
    "%d-%m-%Y",
    "%d.%m.%Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%d %B %Y",
    "%d %b %Y",
    "%d-%b-%Y",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%z",
];

/// Versioned list of accepted `chrono` format strings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateFormatSet {
    version: u32,
    formats: Vec<String>,
}

impl DateFormatSet {
    pub fn v1() -> Self {
        Self {
            version: 1,
            formats: V1_FORMATS.iter().map(|f| f.to_string()).collect(),
        }
    }

    /// Deployment-supplied list; version 0 marks it as not built in
    pub fn custom(formats: Vec<String>) -> Self {
        Self {
            version: 0,
            formats,
        }
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn formats(&self) -> &[String] {
        &self.formats
    }
}

impl Default for DateFormatSet {
    fn default() -> Self {
        Self::v1()
    }
}

/// Parses text into naive date-times. RFC 3339 is always accepted; offsets are
/// folded into UTC. Relative terms like "today" are never understood.
#[derive(Debug, Clone, Default)]
pub struct DateParser {
    formats: Arc<DateFormatSet>,
}

impl DateParser {
    pub fn new(formats: DateFormatSet) -> Self {
        Self {
            formats: Arc::new(formats),
        }
    }

    pub fn format_set(&self) -> &DateFormatSet {
        &self.formats
    }

    pub fn parse(&self, raw: &str) -> Option<NaiveDateTime> {
        let s = raw.trim();
        if s.is_empty() {
            return None;
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(dt.naive_utc());
        }

        self.formats
            .formats()
            .iter()
            .find_map(|format| parse_with_format(s, format))
    }

    /// Date reading of a raw cell. Numbers are never dates.
    pub fn parse_cell(&self, cell: &CellValue) -> Option<NaiveDateTime> {
        match cell {
            CellValue::Instant(dt) => Some(*dt),
            CellValue::Text(s) => self.parse(s),
            CellValue::Number(_) | CellValue::Missing => None,
        }
    }

    pub fn render(instant: &NaiveDateTime) -> String {
        instant.format(CANONICAL_DATE_FORMAT).to_string()
    }
}

fn parse_with_format(s: &str, format: &str) -> Option<NaiveDateTime> {
    if format.contains("%z") || format.contains("%:z") {
        return DateTime::parse_from_str(s, format)
            .ok()
            .map(|dt| dt.naive_utc());
    }

    NaiveDateTime::parse_from_str(s, format).ok().or_else(|| {
        NaiveDate::parse_from_str(s, format)
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
    })
}
