pub mod use_cases;

pub use use_cases::table_normalizer::TableNormalizer;
pub use use_cases::type_detector::TypeDetector;
pub use use_cases::upload_processor::{FileFormat, UploadProcessor};
