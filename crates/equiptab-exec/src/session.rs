//! Table session: the state behind one equipment-list table.
//!
//! Lifecycle:
//! 1. `mount` receives the raw page once and homogenizes it in place:
//!    every original row then carries the full field catalog.
//! 2. The allow-list arrives through `set_display_columns` or
//!    `poll_config`, before or after mount. Each arrival recomputes the
//!    visible rows from the homogenized originals.
//! 3. `hide` / `show` (or their `*_selected` forms) reshape the visible
//!    rows. `show` reaches back to the originals.
//! 4. `table()` materializes the current rows for display or export.

use std::path::Path;
use std::sync::Arc;

use equiptab_core::config::ProjectionConfig;
use equiptab_core::schema::{FieldCatalog, Table};
use equiptab_core::types::{Record, RecordBatch};

use equiptab_io::{CsvWriter, ExportOptions, JsonlWriter};

use equiptab_operators::materialize::materialize;
use equiptab_operators::{build_catalog, Hide, Homogenize, Operator, Reorder, Show};

use crate::channel::ConfigReceiver;
use crate::context::AppContext;
use crate::error::ExecError;
use crate::metrics::emit_span;

pub struct TableSession {
    cfg: ProjectionConfig,
    ctx: Arc<AppContext>,
    originals: Option<RecordBatch>,
    catalog: FieldCatalog,
    allow_list: Vec<String>,
    rows: RecordBatch,
    selected: Vec<String>,
}

impl TableSession {
    pub fn new(cfg: ProjectionConfig, ctx: Arc<AppContext>) -> Self {
        Self {
            cfg,
            ctx,
            originals: None,
            catalog: FieldCatalog::new(),
            allow_list: Vec::new(),
            rows: RecordBatch::default(),
            selected: Vec::new(),
        }
    }

    /// Take ownership of the raw page. Replaces any previous mount and
    /// clears the column selection.
    pub fn mount(&mut self, records: RecordBatch) -> Result<(), ExecError> {
        self.catalog = build_catalog(&records.records);
        let homogenized = run_op(&Homogenize, std::slice::from_ref(&records))?;
        self.originals = Some(homogenized);
        self.selected.clear();

        #[cfg(feature = "tracing")]
        tracing::debug!(
            rows = self.originals.as_ref().map_or(0, RecordBatch::num_rows),
            fields = self.catalog.len(),
            "table mounted"
        );

        self.recompute()
    }

    pub fn is_mounted(&self) -> bool {
        self.originals.is_some()
    }

    /// Replace the allow-list and rebuild the visible rows from the
    /// homogenized originals. Earlier hide/show results are discarded.
    pub fn set_display_columns(&mut self, allow_list: Vec<String>) -> Result<(), ExecError> {
        #[cfg(feature = "tracing")]
        tracing::debug!(columns = allow_list.len(), "display columns received");

        self.allow_list = allow_list;
        self.recompute()
    }

    /// Apply the allow-list if it has arrived. Returns whether it did.
    pub fn poll_config(&mut self, rx: &mut ConfigReceiver) -> Result<bool, ExecError> {
        match rx.try_recv()? {
            Some(list) => {
                self.set_display_columns(list)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn recompute(&mut self) -> Result<(), ExecError> {
        let Some(originals) = &self.originals else {
            self.rows = RecordBatch::default();
            return Ok(());
        };
        let op = Reorder::new(self.allow_list.clone());
        self.rows = run_op(&op, std::slice::from_ref(originals))?;
        Ok(())
    }

    /// Replace the projection state.
    pub fn select_columns<I, S>(&mut self, columns: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected = columns.into_iter().map(Into::into).collect();
    }

    pub fn selected_columns(&self) -> &[String] {
        &self.selected
    }

    pub fn hide_selected(&mut self) -> Result<(), ExecError> {
        let columns = self.selected.clone();
        self.hide(&columns)
    }

    pub fn show_selected(&mut self) -> Result<(), ExecError> {
        let columns = self.selected.clone();
        self.show(&columns)
    }

    /// Drop `columns` from every visible row. No-op before mount or with
    /// nothing to hide.
    pub fn hide(&mut self, columns: &[String]) -> Result<(), ExecError> {
        if columns.is_empty() || !self.is_mounted() {
            return Ok(());
        }
        let op = Hide::new(columns.to_vec());
        self.rows = run_op(&op, std::slice::from_ref(&self.rows))?;
        Ok(())
    }

    /// Bring `columns` back from the original records, merged under the
    /// current rows. No-op before mount or with nothing to show.
    pub fn show(&mut self, columns: &[String]) -> Result<(), ExecError> {
        let Some(originals) = &self.originals else {
            return Ok(());
        };
        if columns.is_empty() {
            return Ok(());
        }
        let op = Show::new(columns.to_vec());
        let inputs = [self.rows.clone(), originals.clone()];
        self.rows = run_op(&op, &inputs)?;
        Ok(())
    }

    /// Field names of the first homogenized record, i.e. the whole catalog:
    /// the options offered when picking columns to show or hide.
    pub fn selectable_columns(&self) -> Vec<String> {
        self.originals
            .as_ref()
            .and_then(RecordBatch::first)
            .map(Record::key_list)
            .unwrap_or_default()
    }

    pub fn catalog(&self) -> &FieldCatalog {
        &self.catalog
    }

    pub fn allow_list(&self) -> &[String] {
        &self.allow_list
    }

    /// Current visible rows.
    pub fn rows(&self) -> &RecordBatch {
        &self.rows
    }

    pub fn originals(&self) -> Option<&RecordBatch> {
        self.originals.as_ref()
    }

    pub fn config(&self) -> &ProjectionConfig {
        &self.cfg
    }

    pub fn context(&self) -> &Arc<AppContext> {
        &self.ctx
    }

    pub fn title(&self) -> String {
        self.ctx.title(&self.cfg.title)
    }

    pub fn table(&self) -> Table {
        let table = materialize(&self.rows, &self.cfg);
        emit_span(
            "materialize",
            &[
                ("rows", table.num_rows().to_string()),
                ("columns", table.num_columns().to_string()),
            ],
        );
        table
    }

    pub fn export_options(&self) -> ExportOptions {
        ExportOptions::from_config(&self.cfg)
    }

    pub fn write_csv(&self, path: impl AsRef<Path>, options: ExportOptions) -> Result<(), ExecError> {
        let path = path.as_ref();
        let table = self.table();
        let mut w = CsvWriter::to_path(path, options)?;
        w.write_table(&table)?;

        #[cfg(feature = "tracing")]
        tracing::info!(path = %path.display(), rows = table.num_rows(), "csv export written");

        Ok(())
    }

    pub fn write_jsonl(&self, path: impl AsRef<Path>, options: ExportOptions) -> Result<(), ExecError> {
        let path = path.as_ref();
        let table = self.table();
        let mut w = JsonlWriter::to_path(path, options)?;
        w.write_table(&table)?;

        #[cfg(feature = "tracing")]
        tracing::info!(path = %path.display(), rows = table.num_rows(), "jsonl export written");

        Ok(())
    }
}

fn run_op(op: &dyn Operator, inputs: &[RecordBatch]) -> Result<RecordBatch, ExecError> {
    let out = op.eval(inputs).map_err(|source| ExecError::Operator {
        op: op.name(),
        source,
    })?;
    emit_span(op.name(), &[("rows", out.num_rows().to_string())]);
    Ok(out)
}
