pub mod table_normalizer;
pub mod type_detector;
pub mod upload_processor;
