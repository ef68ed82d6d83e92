// ============================================================
// UPLOAD PROCESSOR USE CASE
// ============================================================
// Orchestrate format selection, parsing and normalization of one upload

use std::path::Path;
use std::time::Instant;

use tracing::{info, warn};

use super::table_normalizer::TableNormalizer;
use crate::domain::error::{AppError, Result};
use crate::domain::table::{ProcessingResult, Table};
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::tabular::{
    CsvReader, DateFormatSet, DateParser, RawCellParser, SpreadsheetKind, SpreadsheetReader,
};

/// Upload formats, chosen by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Csv,
    Spreadsheet(SpreadsheetKind),
}

impl FileFormat {
    /// Select a format from the filename extension (case-insensitive)
    pub fn from_filename(filename: &str) -> Result<Self> {
        let extension = Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match extension.as_deref() {
            Some("csv") => Ok(FileFormat::Csv),
            Some("xlsx") => Ok(FileFormat::Spreadsheet(SpreadsheetKind::Xlsx)),
            Some("xls") => Ok(FileFormat::Spreadsheet(SpreadsheetKind::Xls)),
            _ => Err(AppError::UnsupportedFormat(format!(
                "'{}' is not a .csv, .xlsx or .xls file",
                filename
            ))),
        }
    }
}

/// Upload processing use case
#[derive(Debug, Clone, Default)]
pub struct UploadProcessor {
    csv_reader: CsvReader,
    spreadsheet_reader: SpreadsheetReader,
    normalizer: TableNormalizer,
}

impl UploadProcessor {
    pub fn new(
        csv_reader: CsvReader,
        spreadsheet_reader: SpreadsheetReader,
        normalizer: TableNormalizer,
    ) -> Self {
        Self {
            csv_reader,
            spreadsheet_reader,
            normalizer,
        }
    }

    /// Wire readers and normalizer from the service configuration
    pub fn from_config(config: &AppConfig) -> Self {
        let cell_parser = RawCellParser::new(config.missing_markers.iter().cloned());
        let formats = config
            .date_formats
            .clone()
            .map(DateFormatSet::custom)
            .unwrap_or_default();

        info!(
            date_format_version = formats.version(),
            date_format_count = formats.formats().len(),
            missing_marker_count = config.missing_markers.len(),
            "Configured upload processor"
        );

        Self::new(
            CsvReader::new(cell_parser.clone())
                .with_delimiter(config.csv_delimiter.map(|c| c as u8)),
            SpreadsheetReader::new(cell_parser),
            TableNormalizer::new(DateParser::new(formats)),
        )
    }

    /// Parse an uploaded file into a raw table
    pub fn ingest(&self, filename: &str, bytes: &[u8]) -> Result<Table> {
        match FileFormat::from_filename(filename)? {
            FileFormat::Csv => self.csv_reader.read(bytes),
            FileFormat::Spreadsheet(kind) => self.spreadsheet_reader.read(bytes, kind),
        }
    }

    /// Full pipeline for one upload: ingest, then normalize
    pub fn process(&self, filename: &str, bytes: &[u8]) -> Result<ProcessingResult> {
        let start = Instant::now();

        let outcome = self
            .ingest(filename, bytes)
            .and_then(|table| self.normalizer.normalize(&table));

        match &outcome {
            Ok(result) => info!(
                filename,
                size_bytes = bytes.len(),
                rows = result.row_count(),
                columns = result.columns().len(),
                elapsed_ms = start.elapsed().as_millis() as u64,
                "Processed upload"
            ),
            Err(err) => warn!(filename, size_bytes = bytes.len(), error = %err, "Upload rejected"),
        }

        outcome
    }
}
