//! CSV export of a materialized table.
//!
//! The header row is the column labels; fields are quoted only when they
//! contain the delimiter, a quote, or a line break.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use equiptab_core::schema::Table;

use crate::error::{Error, Result};

use super::{cell, ExportOptions};

pub struct CsvWriter<W: Write> {
    writer: csv::Writer<W>,
    options: ExportOptions,
}

impl CsvWriter<File> {
    pub fn to_path(path: impl AsRef<Path>, options: ExportOptions) -> Result<Self> {
        let f = File::create(path)?;
        Self::to_writer(f, options)
    }
}

impl<W: Write> CsvWriter<W> {
    pub fn to_writer(writer: W, options: ExportOptions) -> Result<Self> {
        if !options.separator.is_ascii() {
            return Err(Error::Format(format!(
                "CSV separator must be ASCII, got {:?}",
                options.separator
            )));
        }
        let writer = csv::WriterBuilder::new()
            .delimiter(options.separator as u8)
            .quote_style(csv::QuoteStyle::Necessary)
            .from_writer(writer);
        Ok(Self { writer, options })
    }

    /// Write header + rows and flush. A table without columns writes nothing.
    pub fn write_table(&mut self, table: &Table) -> Result<()> {
        let indices = self.options.column_indices(table);
        if indices.is_empty() {
            return Ok(());
        }

        self.writer
            .write_record(indices.iter().map(|&i| table.columns[i].label.as_str()))?;
        for row in &table.rows {
            self.writer
                .write_record(indices.iter().map(|&i| cell(row, i)))?;
        }
        self.writer.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| Error::Io(e.into_error()))
    }
}
