//! Input processing module
//! Handles file detection, table reading, and dataset loading

pub mod file_detector;
pub mod manager;
pub mod table;
pub mod table_reader;
