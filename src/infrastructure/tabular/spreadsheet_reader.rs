// ============================================================
// SPREADSHEET READER
// ============================================================
// Load the first worksheet of an .xlsx / .xls workbook into a Table

use std::fmt::Display;
use std::io::Cursor;

use calamine::{Data, DataType, Range, Reader, Xls, Xlsx};

use super::{unique_headers, RawCellParser};
use crate::domain::error::{AppError, Result};
use crate::domain::table::{CellValue, Table};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpreadsheetKind {
    Xlsx,
    Xls,
}

/// Spreadsheet reader; the first row of the first worksheet is the header
#[derive(Debug, Clone, Default)]
pub struct SpreadsheetReader {
    cell_parser: RawCellParser,
}

impl SpreadsheetReader {
    pub fn new(cell_parser: RawCellParser) -> Self {
        Self { cell_parser }
    }

    pub fn read(&self, bytes: &[u8], kind: SpreadsheetKind) -> Result<Table> {
        let cursor = Cursor::new(bytes);
        let range = match kind {
            SpreadsheetKind::Xlsx => {
                let mut workbook: Xlsx<_> = Xlsx::new(cursor).map_err(|e| {
                    AppError::MalformedInput(format!("Failed to open Excel file: {}", e))
                })?;
                first_worksheet(&mut workbook)?
            }
            SpreadsheetKind::Xls => {
                let mut workbook: Xls<_> = Xls::new(cursor).map_err(|e| {
                    AppError::MalformedInput(format!("Failed to open Excel file: {}", e))
                })?;
                first_worksheet(&mut workbook)?
            }
        };

        self.range_to_table(&range)
    }

    fn range_to_table(&self, range: &Range<Data>) -> Result<Table> {
        let mut rows = range.rows();

        let Some(header_row) = rows.next() else {
            // Blank sheet: no columns, no rows
            return Table::new(Vec::new());
        };

        // The used range starts at the first non-empty cell; blank leading
        // columns still count as columns. Leading blank rows stay skipped.
        let leading = range.start().map(|(_, col)| col as usize).unwrap_or(0);

        let headers = unique_headers(
            std::iter::repeat(String::new())
                .take(leading)
                .chain(header_row.iter().map(header_text)),
        );

        let mut data: Vec<Vec<CellValue>> = rows
            .map(|row| {
                std::iter::repeat(CellValue::Missing)
                    .take(leading)
                    .chain(row.iter().map(|cell| self.to_cell(cell)))
                    .collect()
            })
            .collect();

        // Formatting often extends the used range past the last real row
        while data
            .last()
            .map(|row: &Vec<CellValue>| row.iter().all(CellValue::is_missing))
            .unwrap_or(false)
        {
            data.pop();
        }

        Table::from_rows(headers, data)
    }

    fn to_cell(&self, cell: &Data) -> CellValue {
        match cell {
            Data::Empty | Data::Error(_) => CellValue::Missing,
            Data::Int(n) => CellValue::Number(*n as f64),
            Data::Float(f) => CellValue::from(*f),
            Data::Bool(b) => CellValue::Text(b.to_string()),
            Data::String(s) => self.cell_parser.parse_text(s),
            other => other
                .as_datetime()
                .map(CellValue::Instant)
                .unwrap_or_else(|| self.cell_parser.parse_text(&other.to_string())),
        }
    }
}

fn header_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn first_worksheet<'a, R>(workbook: &mut R) -> Result<Range<Data>>
where
    R: Reader<Cursor<&'a [u8]>>,
    R::Error: Display,
{
    workbook
        .worksheet_range_at(0)
        .ok_or_else(|| AppError::MalformedInput("No worksheet found".to_string()))?
        .map_err(|e| AppError::MalformedInput(format!("Failed to read Excel range: {}", e)))
}
