//! Readers for the two inputs of a table: the record page and the project
//! display settings.

pub mod records;
pub mod settings;

use std::path::Path;

/// Lower-cased file extension, if any.
pub(crate) fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}
