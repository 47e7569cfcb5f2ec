//! Table writers. Both take a finished `Table`, so cells arrive already
//! stringified and truncated.

pub mod csv;
pub mod jsonl;

use equiptab_core::config::ProjectionConfig;
use equiptab_core::schema::Table;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportOptions {
    /// Field delimiter for CSV; ignored by the NDJSON writer.
    pub separator: char,
    /// Export hidden columns too. The on-screen grid never shows them but
    /// the downloaded file carries every column by default.
    pub include_hidden: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            separator: ',',
            include_hidden: true,
        }
    }
}

impl ExportOptions {
    pub fn from_config(cfg: &ProjectionConfig) -> Self {
        Self {
            separator: cfg.separator,
            ..Self::default()
        }
    }

    pub fn visible_only(mut self) -> Self {
        self.include_hidden = false;
        self
    }

    /// Column positions this export should emit.
    pub(crate) fn column_indices(&self, table: &Table) -> Vec<usize> {
        if self.include_hidden {
            (0..table.num_columns()).collect()
        } else {
            table.visible_indices()
        }
    }
}

/// Cell at `(row, idx)`, or `""` for a short row.
pub(crate) fn cell(row: &[String], idx: usize) -> &str {
    row.get(idx).map(String::as_str).unwrap_or("")
}
