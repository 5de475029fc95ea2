//! Storage Adapters

mod file_storage;

pub use file_storage::{sanitize_file_name, FileImageStorage};
