// ============================================================
// TABULAR INFRASTRUCTURE LAYER
// ============================================================
// CSV and spreadsheet readers, raw cell typing, date parsing

mod csv_reader;
mod date_parser;
mod headers;
mod raw_cell;
mod spreadsheet_reader;

pub use csv_reader::CsvReader;
pub use date_parser::{DateFormatSet, DateParser, CANONICAL_DATE_FORMAT};
pub use headers::unique_headers;
pub use raw_cell::{RawCellParser, DEFAULT_MISSING_MARKERS};
pub use spreadsheet_reader::{SpreadsheetKind, SpreadsheetReader};
