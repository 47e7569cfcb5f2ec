//! Field-catalog builder.
//!
//! Different records carry different fields, which would distort a table
//! whose header is derived from the first row. `homogenize` gives every
//! record every field seen anywhere in the collection.

use equiptab_core::schema::FieldCatalog;
use equiptab_core::types::{Record, RecordBatch, Value};

use crate::traits::{input, OpError, Operator};

/// Union of all keys across `records`, in order of first appearance.
pub fn build_catalog(records: &[Record]) -> FieldCatalog {
    let mut catalog = FieldCatalog::new();
    for record in records {
        for key in record.keys() {
            catalog.insert(key);
        }
    }
    catalog
}

/// Fill every record's missing catalog fields with `""`, in place.
///
/// Missing fields are appended in catalog order. Returns the catalog.
pub fn homogenize(records: &mut [Record]) -> FieldCatalog {
    let catalog = build_catalog(records);
    for record in records.iter_mut() {
        for name in catalog.iter() {
            if !record.contains(name) {
                record.insert(name.clone(), Value::empty());
            }
        }
    }
    catalog
}

/// Operator form of [`homogenize`] over a private copy of the input.
#[derive(Debug, Default)]
pub struct Homogenize;

impl Operator for Homogenize {
    fn name(&self) -> &'static str {
        "homogenize"
    }

    fn eval(&self, inputs: &[RecordBatch]) -> Result<RecordBatch, OpError> {
        let mut batch = input(inputs, 0, self.name())?.clone();
        homogenize(&mut batch.records);
        Ok(batch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_gives_empty_catalog() {
        let mut records: Vec<Record> = vec![];
        assert!(homogenize(&mut records).is_empty());
        assert!(records.is_empty());
    }

    #[test]
    fn missing_fields_are_appended_as_empty_strings() {
        let mut records = vec![
            Record::new().set("id", 1i64).set("name", "P-101"),
            Record::new().set("id", 2i64).set("weight", 12.5),
        ];
        let catalog = homogenize(&mut records);

        assert_eq!(catalog.names(), &["id", "name", "weight"]);
        assert_eq!(records[0].key_list(), vec!["id", "name", "weight"]);
        assert_eq!(records[0].get("weight"), Some(&Value::empty()));
        // Record 2 keeps its own order and gains `name` at the end.
        assert_eq!(records[1].key_list(), vec!["id", "weight", "name"]);
        assert_eq!(records[1].get("name"), Some(&Value::empty()));
    }

    #[test]
    fn existing_values_are_untouched() {
        let mut records = vec![
            Record::new().set("a", Value::Null),
            Record::new().set("b", "x"),
        ];
        homogenize(&mut records);
        assert_eq!(records[0].get("a"), Some(&Value::Null));
        assert_eq!(records[1].get("b"), Some(&Value::from("x")));
    }

    #[test]
    fn operator_leaves_input_alone() {
        let input = RecordBatch::new(vec![
            Record::new().set("a", 1i64),
            Record::new().set("b", 2i64),
        ]);
        let out = Homogenize.eval(&[input.clone()]).unwrap();
        assert_eq!(input.records[0].len(), 1);
        assert!(out.records.iter().all(|r| r.len() == 2));
    }

    #[test]
    fn operator_requires_input() {
        assert!(Homogenize.eval(&[]).is_err());
    }
}
