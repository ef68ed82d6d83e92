pub mod error;

// Tabular upload profiling
pub mod table;
