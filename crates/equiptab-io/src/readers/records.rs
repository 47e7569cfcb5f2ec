//! Record page readers: a JSON array of objects, or NDJSON.
//!
//! Key order inside each object is preserved; it decides the order of
//! first appearance in the field catalog.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use serde_json::Value as Json;

use equiptab_core::types::{Record, RecordBatch};

use crate::error::{Error, Result};

use super::extension;

/// Read-buffer capacity; one data page comfortably fits.
const READ_BUFFER_BYTES: usize = 64 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordFormat {
    /// `[ {...}, {...} ]`
    JsonArray,
    /// One object per line; blank lines are skipped.
    JsonLines,
}

impl RecordFormat {
    /// `.jsonl` / `.ndjson` are line-delimited; everything else is an array.
    pub fn from_path(path: &Path) -> Self {
        match extension(path).as_deref() {
            Some("jsonl") | Some("ndjson") => RecordFormat::JsonLines,
            _ => RecordFormat::JsonArray,
        }
    }
}

pub struct RecordReader<R: Read> {
    reader: BufReader<R>,
    format: RecordFormat,
}

impl RecordReader<File> {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let f = File::open(path)?;
        Ok(Self::from_reader(f, RecordFormat::from_path(path)))
    }
}

impl<R: Read> RecordReader<R> {
    pub fn from_reader(reader: R, format: RecordFormat) -> Self {
        Self {
            reader: BufReader::with_capacity(READ_BUFFER_BYTES, reader),
            format,
        }
    }

    /// Read the whole page.
    pub fn read_all(self) -> Result<RecordBatch> {
        match self.format {
            RecordFormat::JsonArray => parse_array(self.reader),
            RecordFormat::JsonLines => parse_lines(self.reader),
        }
    }
}

/// Read a record page from `path`, picking the format from its extension.
pub fn read_records(path: impl AsRef<Path>) -> Result<RecordBatch> {
    RecordReader::from_path(path)?.read_all()
}

fn parse_array<R: Read>(reader: R) -> Result<RecordBatch> {
    let doc: Json = serde_json::from_reader(reader)?;
    let Json::Array(items) = doc else {
        return Err(Error::Format("expected a JSON array of records".into()));
    };
    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| {
            Record::try_from_json(item).map_err(|e| Error::Format(format!("record #{i}: {e}")))
        })
        .collect::<Result<Vec<_>>>()
        .map(RecordBatch::new)
}

fn parse_lines<R: BufRead>(reader: R) -> Result<RecordBatch> {
    let mut records = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let json: Json = serde_json::from_str(trimmed)?;
        let record = Record::try_from_json(json)
            .map_err(|e| Error::Format(format!("line {}: {e}", i + 1)))?;
        records.push(record);
    }
    Ok(RecordBatch::new(records))
}
