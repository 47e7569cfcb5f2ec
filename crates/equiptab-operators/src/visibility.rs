//! Column visibility toggle: `Hide` and `Show`.
//!
//! The two are deliberately not inverses. `Hide` only removes fields from
//! the current (already reduced) rows. `Show` reads the pristine original
//! records, picks the requested fields, and merges the current row over
//! them, so current values win on collision and fields that were never in
//! the original stay as they are.

use equiptab_core::types::{Record, RecordBatch};

use crate::traits::{input, OpError, Operator};

/// Remove every listed field from every row.
#[derive(Debug, Default, Clone)]
pub struct Hide {
    pub columns: Vec<String>,
}

impl Hide {
    pub fn new(columns: Vec<String>) -> Self {
        Self { columns }
    }
}

impl Operator for Hide {
    fn name(&self) -> &'static str {
        "hide"
    }

    fn eval(&self, inputs: &[RecordBatch]) -> Result<RecordBatch, OpError> {
        let state = input(inputs, 0, self.name())?;
        Ok(state
            .iter()
            .map(|row| {
                row.iter()
                    .filter(|(k, _)| !self.columns.iter().any(|c| c == k))
                    .map(|(k, v)| (k.to_string(), v.clone()))
                    .collect()
            })
            .collect())
    }
}

/// Bring listed fields back from the original records.
///
/// Inputs: `[state, originals]`. Rows pair with originals by index; the
/// output has one row per original.
#[derive(Debug, Default, Clone)]
pub struct Show {
    pub columns: Vec<String>,
}

impl Show {
    pub fn new(columns: Vec<String>) -> Self {
        Self { columns }
    }

    fn merge(&self, original: &Record, current: Option<&Record>) -> Record {
        let mut row: Record = original
            .iter()
            .filter(|(k, _)| self.columns.iter().any(|c| c == k))
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect();
        if let Some(current) = current {
            for (k, v) in current.iter() {
                row.insert(k, v.clone());
            }
        }
        row
    }
}

impl Operator for Show {
    fn name(&self) -> &'static str {
        "show"
    }

    fn eval(&self, inputs: &[RecordBatch]) -> Result<RecordBatch, OpError> {
        let state = input(inputs, 0, self.name())?;
        let originals = input(inputs, 1, self.name())?;
        Ok(originals
            .iter()
            .enumerate()
            .map(|(i, original)| self.merge(original, state.records.get(i)))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use equiptab_core::types::Value;

    fn cols(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn hide_removes_listed_fields_in_any_order() {
        let state = RecordBatch::new(vec![Record::new().set("a", 1i64).set("b", 2i64).set("c", 3i64)]);
        let ab = Hide::new(cols(&["a", "c"])).eval(&[state.clone()]).unwrap();
        let ba = Hide::new(cols(&["c", "a"])).eval(&[state]).unwrap();
        assert_eq!(ab, ba);
        assert_eq!(ab.records[0].key_list(), vec!["b"]);
    }

    #[test]
    fn hide_ignores_unknown_fields() {
        let state = RecordBatch::new(vec![Record::new().set("a", 1i64)]);
        let out = Hide::new(cols(&["zz"])).eval(&[state.clone()]).unwrap();
        assert_eq!(out, state);
    }

    #[test]
    fn show_merges_original_fields_under_current_row() {
        let originals = RecordBatch::new(vec![Record::new().set("a", 1i64).set("b", 2i64).set("c", 3i64)]);
        let state = RecordBatch::new(vec![Record::new().set("b", "current")]);

        let out = Show::new(cols(&["c", "b"])).eval(&[state, originals]).unwrap();
        let row = &out.records[0];
        // Picked fields in original order, then the rest of the current row.
        assert_eq!(row.key_list(), vec!["b", "c"]);
        assert_eq!(row.get("b"), Some(&Value::from("current")));
        assert_eq!(row.get("c"), Some(&Value::Number(3.0)));
    }

    #[test]
    fn show_with_no_columns_keeps_current_rows() {
        let originals = RecordBatch::new(vec![Record::new().set("a", 1i64).set("b", 2i64)]);
        let state = RecordBatch::new(vec![Record::new().set("b", 2i64)]);
        let out = Show::default().eval(&[state.clone(), originals]).unwrap();
        assert_eq!(out, state);
    }

    #[test]
    fn show_pairs_rows_by_index() {
        let originals = RecordBatch::new(vec![
            Record::new().set("a", 1i64),
            Record::new().set("a", 2i64),
        ]);
        let state = RecordBatch::new(vec![Record::new().set("x", "only first")]);
        let out = Show::new(cols(&["a"])).eval(&[state, originals]).unwrap();
        assert_eq!(out.num_rows(), 2);
        assert_eq!(out.records[0].key_list(), vec!["a", "x"]);
        assert_eq!(out.records[1].key_list(), vec!["a"]);
    }

    #[test]
    fn show_needs_both_inputs() {
        let state = RecordBatch::default();
        assert!(Show::default().eval(&[state]).is_err());
    }
}
