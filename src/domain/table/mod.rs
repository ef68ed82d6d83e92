// ============================================================
// TABLE DOMAIN LAYER
// ============================================================
// Raw tables, column types and the normalized processing result
// No I/O, no async

mod cell_value;
mod column_type;
mod processing_result;
mod table;

pub use cell_value::{parse_number, CellValue};
pub use column_type::ColumnType;
pub use processing_result::{DisplayValue, NormalizedRow, ProcessingResult, Schema};
pub use table::{Column, Table};
