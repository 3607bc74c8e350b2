//! Question/answer history storage.

pub mod file_log;

pub use file_log::{format_record, parse_records, FileSessionLog};
