//! NDJSON export of a materialized table: one object per row.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde_json::{Map, Value as Json};

use equiptab_core::schema::Table;

use crate::error::{Error, Result};

use super::{cell, ExportOptions};

pub struct JsonlWriter<W: Write> {
    writer: BufWriter<W>,
    options: ExportOptions,
}

impl JsonlWriter<File> {
    pub fn to_path(path: impl AsRef<Path>, options: ExportOptions) -> Result<Self> {
        let f = File::create(path)?;
        Ok(Self::to_writer(f, options))
    }
}

impl<W: Write> JsonlWriter<W> {
    pub fn to_writer(writer: W, options: ExportOptions) -> Self {
        Self {
            writer: BufWriter::new(writer),
            options,
        }
    }

    /// Objects are keyed by raw field name; two fields can share a label
    /// but never a key. Key order follows column order.
    pub fn write_table(&mut self, table: &Table) -> Result<()> {
        let indices = self.options.column_indices(table);
        for row in &table.rows {
            let mut obj = Map::with_capacity(indices.len());
            for &i in &indices {
                obj.insert(
                    table.columns[i].key.clone(),
                    Json::String(cell(row, i).to_string()),
                );
            }
            let line = serde_json::to_string(&obj)?;
            writeln!(self.writer, "{}", line)?;
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
