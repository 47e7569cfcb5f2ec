#![forbid(unsafe_code)]
//! equiptab-io: readers for record pages and display settings, writers for
//! the finished table.
//!
//! Readers hand back whole batches: a data page is tens to low hundreds of
//! rows, so there is no streaming or chunking here.

pub mod error;
pub mod readers;
pub mod writers;

pub use error::{Error, Result};
pub use readers::records::{read_records, RecordFormat, RecordReader};
pub use readers::settings::{read_settings, SettingsFormat};
pub use writers::csv::CsvWriter;
pub use writers::jsonl::JsonlWriter;
pub use writers::ExportOptions;
