//! Convenient re-exports for downstream crates.

pub use crate::config::{DisplayProperty, DisplaySettings, ProjectionConfig, SettingsOverrides};
pub use crate::error::{Error, Result};
pub use crate::names::normalize_field_name;
pub use crate::schema::{CellRenderer, ColumnDescriptor, FieldCatalog, Table};
pub use crate::types::{Record, RecordBatch, Value};
