// ============================================================
// PROCESSING RESULT
// ============================================================
// Schema, column order and display-ready rows for one table

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use super::ColumnType;

/// Largest integer an f64 holds exactly
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

/// A cell ready to be shown by a client
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayValue {
    Number(f64),
    Text(String),
}

impl DisplayValue {
    /// The display sentinel for "no value"
    pub fn empty() -> Self {
        DisplayValue::Text(String::new())
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            DisplayValue::Text(s) => Some(s),
            DisplayValue::Number(_) => None,
        }
    }
}

impl Serialize for DisplayValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            // Integral values go out as JSON integers (25, not 25.0)
            DisplayValue::Number(n) if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER => {
                serializer.serialize_i64(*n as i64)
            }
            DisplayValue::Number(n) => serializer.serialize_f64(*n),
            DisplayValue::Text(s) => serializer.serialize_str(s),
        }
    }
}

/// Ordered column name -> type mapping
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    entries: Vec<(String, ColumnType)>,
}

impl Schema {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn push(&mut self, name: String, column_type: ColumnType) {
        self.entries.push((name, column_type));
    }

    pub fn get(&self, name: &str) -> Option<ColumnType> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, t)| *t)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, ColumnType)> {
        self.entries.iter().map(|(n, t)| (n.as_str(), *t))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for Schema {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, column_type) in &self.entries {
            map.serialize_entry(name, column_type)?;
        }
        map.end()
    }
}

/// One output row, keyed by column name in column order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedRow {
    cells: Vec<(String, DisplayValue)>,
}

impl NormalizedRow {
    pub fn new(cells: Vec<(String, DisplayValue)>) -> Self {
        Self { cells }
    }

    pub fn get(&self, name: &str) -> Option<&DisplayValue> {
        self.cells.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn values(&self) -> impl Iterator<Item = &DisplayValue> {
        self.cells.iter().map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl Serialize for NormalizedRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.cells.len()))?;
        for (name, value) in &self.cells {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Full output of normalizing one table.
///
/// Serializes as `{"schema": {...}, "data": [...], "columns": [...]}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessingResult {
    schema: Schema,
    data: Vec<NormalizedRow>,
    columns: Vec<String>,
}

impl ProcessingResult {
    pub(crate) fn new(schema: Schema, data: Vec<NormalizedRow>, columns: Vec<String>) -> Self {
        Self {
            schema,
            data,
            columns,
        }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn data(&self) -> &[NormalizedRow] {
        &self.data
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn row_count(&self) -> usize {
        self.data.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_integral_numbers_serialize_as_integers() {
        assert_eq!(serde_json::to_value(DisplayValue::Number(25.0)).unwrap(), json!(25));
        assert_eq!(serde_json::to_value(DisplayValue::Number(2.5)).unwrap(), json!(2.5));
        assert_eq!(serde_json::to_value(DisplayValue::empty()).unwrap(), json!(""));
    }

    #[test]
    fn test_result_json_keeps_column_order() {
        let mut schema = Schema::with_capacity(2);
        schema.push("zeta".to_string(), ColumnType::Number);
        schema.push("alpha".to_string(), ColumnType::Category);

        let row = NormalizedRow::new(vec![
            ("zeta".to_string(), DisplayValue::Number(1.0)),
            ("alpha".to_string(), DisplayValue::Text("x".to_string())),
        ]);
        let result = ProcessingResult::new(
            schema,
            vec![row],
            vec!["zeta".to_string(), "alpha".to_string()],
        );

        let text = serde_json::to_string(&result).unwrap();
        assert_eq!(
            text,
            r#"{"schema":{"zeta":"number","alpha":"category"},"data":[{"zeta":1,"alpha":"x"}],"columns":["zeta","alpha"]}"#
        );
    }
}
