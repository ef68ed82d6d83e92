use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppError {
    /// File extension is not one of the supported tabular formats.
    UnsupportedFormat(String),
    /// The table parsed fine but has no data rows.
    EmptyTable(String),
    /// The bytes could not be turned into a table at all.
    MalformedInput(String),
    /// Anything unexpected while typing, normalizing or serializing.
    InternalProcessing(String),
    ConfigError(String),
}

impl AppError {
    /// Client-input failures are the caller's fault and never retried.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            AppError::UnsupportedFormat(_) | AppError::EmptyTable(_) | AppError::MalformedInput(_)
        )
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::UnsupportedFormat(msg) => write!(f, "Unsupported format: {}", msg),
            AppError::EmptyTable(msg) => write!(f, "Empty table: {}", msg),
            AppError::MalformedInput(msg) => write!(f, "Malformed input: {}", msg),
            AppError::InternalProcessing(msg) => write!(f, "Internal processing error: {}", msg),
            AppError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

// Lets startup failures flow out of `run()` as io errors
impl From<AppError> for std::io::Error {
    fn from(err: AppError) -> Self {
        std::io::Error::other(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
