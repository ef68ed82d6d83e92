// ============================================================
// COLUMN TYPE ENUM
// ============================================================
// Semantic kind of a column, drives how clients chart it

use serde::{Deserialize, Serialize};

/// Inferred column type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    /// Every present value is numeric
    Number,

    /// Every present value is a date/time
    Date,

    /// Anything else, including columns with no values at all
    Category,
}

impl ColumnType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::Number => "number",
            ColumnType::Date => "date",
            ColumnType::Category => "category",
        }
    }
}

impl std::fmt::Display for ColumnType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_lowercase() {
        let json = serde_json::to_string(&ColumnType::Category).unwrap();
        assert_eq!(json, "\"category\"");
        assert_eq!(ColumnType::Date.to_string(), "date");
    }
}
