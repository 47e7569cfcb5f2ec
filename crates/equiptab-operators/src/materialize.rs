//! Row/column materializer: record batch → display-ready `Table`.
//!
//! Column descriptors come from the first row's keys. Every row is then
//! emitted in that key order so the grid stays rectangular even when rows
//! have drifted apart (after `Show`, which reads heterogeneous originals).
//!
//! Cell policy:
//! - numbers are truncated toward zero to `decimal_digits`, never rounded;
//! - nested values flatten to their own values joined by spaces, with any
//!   comma replaced by a space so the cell stays one CSV token;
//! - null prints as `null`; only fields a row lacks print as an empty cell.

use equiptab_core::config::ProjectionConfig;
use equiptab_core::schema::{ColumnDescriptor, Table};
use equiptab_core::types::{RecordBatch, Value};

use crate::label::format_label;

/// Truncate `value` toward zero to `digits` decimal digits.
///
/// Scales by 10^digits, drops the fraction (floor for non-negative, ceil
/// for negative) and scales back. Floating-point error in the scaling step
/// is kept as-is: `truncate_decimals(0.29, 2)` is `0.28`.
pub fn truncate_decimals(value: f64, digits: u32) -> f64 {
    let multiplier = 10f64.powi(digits as i32);
    let adjusted = value * multiplier;
    let truncated = if adjusted < 0.0 {
        adjusted.ceil()
    } else {
        adjusted.floor()
    };
    truncated / multiplier
}

/// String form of a number: no exponent, no trailing `.0`, `-0` prints as `0`.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value == f64::INFINITY {
        "Infinity".to_string()
    } else if value == f64::NEG_INFINITY {
        "-Infinity".to_string()
    } else if value == 0.0 {
        "0".to_string()
    } else {
        value.to_string()
    }
}

/// Stringify one top-level cell.
pub fn stringify_cell(value: &Value, digits: u32) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => format_number(truncate_decimals(*n, digits)),
        Value::Str(s) => s.clone(),
        Value::Record(_) | Value::List(_) => flatten_nested(value),
    }
}

/// Flatten a nested value to its own values, space-joined and comma-free.
///
/// Numbers inside nested values are printed as-is, without truncation.
pub fn flatten_nested(value: &Value) -> String {
    match value {
        Value::Record(r) => join_parts(r.values()),
        Value::List(items) => join_parts(items.iter()),
        scalar => plain_string(scalar).replace(',', " "),
    }
}

fn join_parts<'a>(values: impl Iterator<Item = &'a Value>) -> String {
    values
        .map(|v| plain_string(v).replace(',', " "))
        .collect::<Vec<_>>()
        .join(" ")
}

fn plain_string(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => format_number(*n),
        Value::Str(s) => s.clone(),
        Value::Record(_) | Value::List(_) => flatten_nested(value),
    }
}

/// Column descriptor for one raw field name.
pub fn describe_column(key: &str, cfg: &ProjectionConfig) -> ColumnDescriptor {
    ColumnDescriptor {
        key: key.to_string(),
        label: format_label(key),
        visible: !cfg.is_hidden(key),
        renderer: cfg.renderer_for(key),
    }
}

/// Build the display table for `batch`.
pub fn materialize(batch: &RecordBatch, cfg: &ProjectionConfig) -> Table {
    let keys = batch.header_keys();

    let columns = keys.iter().map(|k| describe_column(k, cfg)).collect();

    let rows = batch
        .iter()
        .map(|record| {
            keys.iter()
                .map(|k| {
                    record
                        .get(k)
                        .map(|v| stringify_cell(v, cfg.decimal_digits))
                        .unwrap_or_default()
                })
                .collect()
        })
        .collect();

    Table { columns, rows }
}

#[cfg(test)]
mod tests {
    use super::*;
    use equiptab_core::schema::CellRenderer;
    use equiptab_core::types::Record;

    #[test]
    fn truncates_toward_zero() {
        assert_eq!(truncate_decimals(1.2789, 2), 1.27);
        assert_eq!(truncate_decimals(-1.2789, 2), -1.27);
        assert_eq!(truncate_decimals(1.999, 0), 1.0);
        assert_eq!(truncate_decimals(-1.999, 0), -1.0);
        assert_eq!(truncate_decimals(42.0, 2), 42.0);
    }

    #[test]
    fn number_formatting() {
        assert_eq!(format_number(1.0), "1");
        assert_eq!(format_number(1.27), "1.27");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(truncate_decimals(-0.004, 2)), "0");
        assert_eq!(format_number(f64::NAN), "NaN");
        assert_eq!(format_number(f64::NEG_INFINITY), "-Infinity");
    }

    #[test]
    fn scalar_cells() {
        assert_eq!(stringify_cell(&Value::Null, 2), "null");
        assert_eq!(stringify_cell(&Value::empty(), 2), "");
        assert_eq!(stringify_cell(&Value::Bool(true), 2), "true");
        assert_eq!(stringify_cell(&Value::Number(3.14159), 2), "3.14");
        assert_eq!(stringify_cell(&Value::from("a,b"), 2), "a,b");
    }

    #[test]
    fn nested_cells_are_flat_and_comma_free() {
        let point = Record::new().set("x", 1.23456).set("y", Value::Null).set("z", "a,b");
        assert_eq!(stringify_cell(&Value::Record(point), 2), "1.23456 null a b");

        let list = Value::List(vec![
            Value::from("12 Main St, Springfield"),
            Value::List(vec![Value::from(1i64), Value::from(2i64)]),
        ]);
        assert_eq!(stringify_cell(&list, 2), "12 Main St  Springfield 1 2");
        assert!(!stringify_cell(&list, 2).contains(','));
    }

    #[test]
    fn columns_carry_visibility_and_renderer() {
        let cfg = ProjectionConfig::default();
        let batch = RecordBatch::new(vec![Record::new()
            .set("TAG_NO", "P-101")
            .set("geometryStream", "...")
            .set("MANUFACTURER_ADDRESS", "")]);

        let table = materialize(&batch, &cfg);
        assert_eq!(table.labels(), vec!["Tag No", "Geometry Stream", "Manufacturer Address"]);
        assert!(table.columns[0].visible);
        assert!(!table.columns[1].visible);
        assert_eq!(table.columns[2].renderer, Some(CellRenderer::StyledContainer));
        assert_eq!(table.columns[0].renderer, None);
    }

    #[test]
    fn rows_follow_first_row_key_order() {
        let cfg = ProjectionConfig::default();
        let batch = RecordBatch::new(vec![
            Record::new().set("a", 1i64).set("b", 2i64),
            Record::new().set("b", 20i64).set("c", 30i64),
        ]);
        let table = materialize(&batch, &cfg);
        assert_eq!(table.labels(), vec!["A", "B"]);
        assert_eq!(table.rows, vec![vec!["1", "2"], vec!["", "20"]]);
    }

    #[test]
    fn empty_batch_gives_empty_table() {
        let table = materialize(&RecordBatch::default(), &ProjectionConfig::default());
        assert!(table.is_empty());
        assert_eq!(table.num_rows(), 0);
    }

    #[test]
    fn decimal_digits_come_from_config() {
        let cfg = ProjectionConfig {
            decimal_digits: 3,
            ..Default::default()
        };
        let batch = RecordBatch::new(vec![Record::new().set("w", 2.71828)]);
        assert_eq!(materialize(&batch, &cfg).rows[0][0], "2.718");
    }
}
