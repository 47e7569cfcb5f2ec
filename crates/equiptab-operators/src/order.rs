//! Display-order resolver.
//!
//! The allow-list comes from project configuration as normalized names
//! (lower-case, no whitespace, no underscores). A record key is displayed
//! when its normalized form is on the list, and keys are emitted in list
//! order, not record order.

use equiptab_core::names::normalize_field_name;
use equiptab_core::types::{Record, RecordBatch};

use crate::catalog::build_catalog;
use crate::traits::{input, OpError, Operator};

/// Keys of `keys` that the allow-list admits, in allow-list order.
///
/// When two keys normalize to the same name the first one wins; an
/// allow-list entry that matches nothing is skipped. An empty allow-list
/// admits nothing.
pub fn resolve_display_order<S: AsRef<str>>(keys: &[S], allow_list: &[String]) -> Vec<String> {
    let normalized: Vec<String> = keys
        .iter()
        .map(|k| normalize_field_name(k.as_ref()))
        .collect();

    let mut out: Vec<String> = Vec::new();
    for wanted in allow_list {
        let wanted = normalize_field_name(wanted);
        let Some(idx) = normalized.iter().position(|n| *n == wanted) else {
            continue;
        };
        let key = keys[idx].as_ref();
        if !out.iter().any(|k| k == key) {
            out.push(key.to_string());
        }
    }
    out
}

/// Re-key every record to the allow-listed fields, in allow-list order.
///
/// The order is resolved once per batch against the batch's field catalog,
/// so colliding keys break the same way on every row.
#[derive(Debug, Default, Clone)]
pub struct Reorder {
    pub allow_list: Vec<String>,
}

impl Reorder {
    pub fn new(allow_list: Vec<String>) -> Self {
        Self { allow_list }
    }
}

impl Operator for Reorder {
    fn name(&self) -> &'static str {
        "reorder"
    }

    fn eval(&self, inputs: &[RecordBatch]) -> Result<RecordBatch, OpError> {
        let batch = input(inputs, 0, self.name())?;
        let catalog = build_catalog(&batch.records);
        let order = resolve_display_order(catalog.names(), &self.allow_list);
        Ok(batch
            .iter()
            .map(|record| {
                order
                    .iter()
                    .filter_map(|k| Some((k.clone(), record.get(k)?.clone())))
                    .collect::<Record>()
            })
            .collect())
    }
}
