// ============================================================
// TABLE NORMALIZER
// ============================================================
// Type every column, render dates canonically, fill missing values
// and serialize the table into rows

use tracing::debug;

use super::type_detector::TypeDetector;
use crate::domain::error::{AppError, Result};
use crate::domain::table::{
    CellValue, ColumnType, DisplayValue, NormalizedRow, ProcessingResult, Schema, Table,
};
use crate::infrastructure::tabular::DateParser;

/// Turns a raw table into a display-ready `ProcessingResult`
#[derive(Debug, Clone, Default)]
pub struct TableNormalizer {
    detector: TypeDetector,
    date_parser: DateParser,
}

impl TableNormalizer {
    /// The detector and the date re-parse share one parser configuration
    pub fn new(date_parser: DateParser) -> Self {
        Self {
            detector: TypeDetector::new(date_parser.clone()),
            date_parser,
        }
    }

    /// Normalize a table. The input is only borrowed and never changed.
    pub fn normalize(&self, table: &Table) -> Result<ProcessingResult> {
        let row_count = table.row_count();
        if row_count == 0 {
            return Err(AppError::EmptyTable(format!(
                "table has {} columns and no rows",
                table.column_count()
            )));
        }

        let mut schema = Schema::with_capacity(table.column_count());
        let mut rendered: Vec<Vec<DisplayValue>> = Vec::with_capacity(table.column_count());

        for column in table.columns() {
            let column_type = self.detector.detect(&column.values);
            debug!(column = %column.name, column_type = %column_type, "Detected column type");

            let cells = match column_type {
                ColumnType::Date => self.coerce_dates(&column.values),
                ColumnType::Number | ColumnType::Category => column.values.clone(),
            };

            let display: Vec<DisplayValue> = cells.iter().map(to_display).collect();
            if display.len() != row_count {
                return Err(AppError::InternalProcessing(format!(
                    "column '{}' produced {} values for {} rows",
                    column.name,
                    display.len(),
                    row_count
                )));
            }

            schema.push(column.name.clone(), column_type);
            rendered.push(display);
        }

        let columns = table.column_names();
        let data = (0..row_count)
            .map(|row| {
                NormalizedRow::new(
                    columns
                        .iter()
                        .zip(&rendered)
                        .map(|(name, values)| (name.clone(), values[row].clone()))
                        .collect(),
                )
            })
            .collect();

        Ok(ProcessingResult::new(schema, data, columns))
    }

    /// Re-parse every cell of a date column; a miss becomes `Missing`
    fn coerce_dates(&self, values: &[CellValue]) -> Vec<CellValue> {
        values
            .iter()
            .map(|cell| {
                self.date_parser
                    .parse_cell(cell)
                    .map(CellValue::Instant)
                    .unwrap_or(CellValue::Missing)
            })
            .collect()
    }
}

/// Display form of a cell; `Missing` becomes the empty string in every column
fn to_display(cell: &CellValue) -> DisplayValue {
    match cell {
        CellValue::Number(n) => DisplayValue::Number(*n),
        CellValue::Text(s) => DisplayValue::Text(s.clone()),
        CellValue::Instant(dt) => DisplayValue::Text(DateParser::render(dt)),
        CellValue::Missing => DisplayValue::empty(),
    }
}
