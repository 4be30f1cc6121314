// File I/O operations

pub mod csv;

pub use crate::csv::{read_file_as_utf8, read_records, sniff_delimiter, write_records};
