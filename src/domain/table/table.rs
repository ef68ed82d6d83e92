// ============================================================
// TABLE
// ============================================================
// Column-oriented raw table, built once per upload

use std::collections::HashSet;

use super::CellValue;
use crate::domain::error::{AppError, Result};

/// A named column of raw cells
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub values: Vec<CellValue>,
}

impl Column {
    pub fn new(name: impl Into<String>, values: Vec<CellValue>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }
}

/// Ordered set of equally long columns with unique names
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
}

impl Table {
    /// Build a table, checking that names are unique and lengths agree
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        let mut seen = HashSet::new();
        for column in &columns {
            if !seen.insert(column.name.as_str()) {
                return Err(AppError::MalformedInput(format!(
                    "Duplicate column name '{}'",
                    column.name
                )));
            }
        }

        if let Some(first) = columns.first() {
            let expected = first.values.len();
            if let Some(bad) = columns.iter().find(|c| c.values.len() != expected) {
                return Err(AppError::MalformedInput(format!(
                    "Column '{}' has {} values, expected {}",
                    bad.name,
                    bad.values.len(),
                    expected
                )));
            }
        }

        Ok(Self { columns })
    }

    /// Build a table from row-major cells.
    ///
    /// Short rows are padded with `Missing`; a row wider than the header is an error.
    pub fn from_rows(headers: Vec<String>, rows: Vec<Vec<CellValue>>) -> Result<Self> {
        let width = headers.len();
        let mut columns: Vec<Vec<CellValue>> = (0..width)
            .map(|_| Vec::with_capacity(rows.len()))
            .collect();

        for (index, row) in rows.into_iter().enumerate() {
            if row.len() > width {
                return Err(AppError::MalformedInput(format!(
                    "Expected {} fields in row {}, saw {}",
                    width,
                    index + 1,
                    row.len()
                )));
            }

            let mut cells = row.into_iter();
            for column in columns.iter_mut() {
                column.push(cells.next().unwrap_or(CellValue::Missing));
            }
        }

        Self::new(
            headers
                .into_iter()
                .zip(columns)
                .map(|(name, values)| Column::new(name, values))
                .collect(),
        )
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    /// Number of data rows; zero when there are no columns
    pub fn row_count(&self) -> usize {
        self.columns.first().map(|c| c.values.len()).unwrap_or(0)
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_duplicate_names() {
        let result = Table::new(vec![
            Column::new("a", vec![CellValue::Number(1.0)]),
            Column::new("a", vec![CellValue::Number(2.0)]),
        ]);
        assert!(matches!(result, Err(AppError::MalformedInput(_))));
    }

    #[test]
    fn test_rejects_ragged_columns() {
        let result = Table::new(vec![
            Column::new("a", vec![CellValue::Number(1.0)]),
            Column::new("b", vec![]),
        ]);
        assert!(matches!(result, Err(AppError::MalformedInput(_))));
    }

    #[test]
    fn test_from_rows_pads_short_rows() {
        let table = Table::from_rows(
            vec!["name".to_string(), "age".to_string()],
            vec![
                vec![CellValue::from("Alice"), CellValue::Number(30.0)],
                vec![CellValue::from("Bob")],
            ],
        )
        .unwrap();

        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column_names(), vec!["name", "age"]);
        assert_eq!(table.column("age").unwrap().values[1], CellValue::Missing);
    }

    #[test]
    fn test_from_rows_rejects_wide_rows() {
        let result = Table::from_rows(
            vec!["only".to_string()],
            vec![vec![CellValue::from("x"), CellValue::from("y")]],
        );
        assert!(matches!(result, Err(AppError::MalformedInput(_))));
    }

    #[test]
    fn test_no_columns_means_no_rows() {
        let table = Table::new(Vec::new()).unwrap();
        assert_eq!(table.row_count(), 0);
        assert_eq!(table.column_count(), 0);
    }
}
