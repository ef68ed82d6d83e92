// ============================================================
// CSV READER
// ============================================================
// Decode, sniff the delimiter and load delimited text into a Table

use std::borrow::Cow;

use csv::{ReaderBuilder, StringRecord, Trim};
use encoding_rs::{Encoding, WINDOWS_1252};

use super::{unique_headers, RawCellParser};
use crate::domain::error::{AppError, Result};
use crate::domain::table::{Column, Table};

/// Delimited-text reader; the first record is the header
#[derive(Debug, Clone, Default)]
pub struct CsvReader {
    /// Forced delimiter; sniffed from the content when `None`
    delimiter: Option<u8>,

    cell_parser: RawCellParser,
}

impl CsvReader {
    pub fn new(cell_parser: RawCellParser) -> Self {
        Self {
            delimiter: None,
            cell_parser,
        }
    }

    /// Set custom delimiter
    pub fn with_delimiter(mut self, delimiter: Option<u8>) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Parse uploaded bytes into a table
    pub fn read(&self, bytes: &[u8]) -> Result<Table> {
        let content = Self::decode(bytes);
        if content.trim().is_empty() {
            return Err(AppError::MalformedInput(
                "No columns to parse from file".to_string(),
            ));
        }

        let delimiter = self
            .delimiter
            .unwrap_or_else(|| Self::detect_delimiter(&content));

        let mut reader = ReaderBuilder::new()
            .delimiter(delimiter)
            .trim(Trim::All)
            .flexible(true) // Short rows are padded below
            .from_reader(content.as_bytes());

        let headers = reader
            .headers()
            .map_err(|e| AppError::MalformedInput(format!("Failed to read CSV headers: {}", e)))?
            .clone();

        let names = unique_headers(headers.iter());
        let width = names.len();
        let mut raw_columns: Vec<Vec<String>> = vec![Vec::new(); width];

        for (index, result) in reader.records().enumerate() {
            let record = result.map_err(|e| {
                AppError::MalformedInput(format!("Failed to parse CSV row {}: {}", index + 1, e))
            })?;

            // Whitespace-only line; a quoted "" is still a (missing) value
            if record.len() == 1 && record[0].is_empty() && is_blank_line(&content, &record) {
                continue;
            }

            if record.len() > width {
                let line = record
                    .position()
                    .map(|p| p.line())
                    .unwrap_or(index as u64 + 2);
                return Err(AppError::MalformedInput(format!(
                    "Expected {} fields in line {}, saw {}",
                    width,
                    line,
                    record.len()
                )));
            }

            for (idx, column) in raw_columns.iter_mut().enumerate() {
                column.push(record.get(idx).unwrap_or("").to_string());
            }
        }

        let columns = names
            .into_iter()
            .zip(raw_columns)
            .map(|(name, raw)| Column::new(name, self.cell_parser.type_column(raw)))
            .collect();

        Table::new(columns)
    }

    /// Decode bytes: honor a BOM, then UTF-8, then fall back to Windows-1252
    fn decode(bytes: &[u8]) -> Cow<'_, str> {
        if let Some((encoding, bom_len)) = Encoding::for_bom(bytes) {
            let (content, _had_errors) =
                encoding.decode_without_bom_handling(&bytes[bom_len..]);
            return content;
        }

        match std::str::from_utf8(bytes) {
            Ok(content) => Cow::Borrowed(content),
            Err(_) => {
                let (content, _had_errors) = WINDOWS_1252.decode_without_bom_handling(bytes);
                content
            }
        }
    }

    /// Detect delimiter from content (comma, semicolon, tab, pipe)
    pub fn detect_delimiter(content: &str) -> u8 {
        let candidates = [b',', b';', b'\t', b'|'];
        let sample_lines: Vec<_> = content
            .lines()
            .filter(|l| !l.trim().is_empty())
            .take(10)
            .collect();

        if sample_lines.is_empty() {
            return b',';
        }

        let mut best_delimiter = b',';
        let mut best_score = 0.0f32;

        for &delimiter in &candidates {
            let field_counts: Vec<usize> = sample_lines
                .iter()
                .map(|line| line.bytes().filter(|&b| b == delimiter).count())
                .collect();

            // Score by consistency (low standard deviation) and frequency
            let avg = field_counts.iter().sum::<usize>() as f32 / field_counts.len() as f32;
            let variance = field_counts
                .iter()
                .map(|&x| (x as f32 - avg).powi(2))
                .sum::<f32>()
                / field_counts.len() as f32;

            let score = avg / (1.0 + variance.sqrt());

            if score > best_score {
                best_score = score;
                best_delimiter = delimiter;
            }
        }

        best_delimiter
    }
}

fn is_blank_line(content: &str, record: &StringRecord) -> bool {
    record
        .position()
        .and_then(|pos| content.get(pos.byte() as usize..))
        .and_then(|rest| rest.lines().next())
        .map(|line| line.trim().is_empty())
        .unwrap_or(false)
}
