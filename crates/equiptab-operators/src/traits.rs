//! Operator trait + common interfaces.
//!
//! Every row-set transformation the table session performs is an
//! `Operator`: it receives record batches and returns a new batch, leaving
//! its inputs untouched. The session keeps the pristine originals around
//! and threads the current state through operators.

use equiptab_core::types::RecordBatch;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OpError {
    #[error("input error: {0}")]
    Input(String),
}

/// Trait that all operators must implement.
///
/// Invariants:
/// - `eval` must be deterministic given the same inputs.
/// - `eval` never fails on data shape (missing fields, nulls, nesting);
///   only a missing input batch is an error.
pub trait Operator: Send + Sync + 'static {
    /// Human-readable operator name (stable).
    fn name(&self) -> &'static str;

    /// Evaluate the operator.
    ///
    /// Unary ops read `inputs[0]`. Binary ops (`Show`) read the current
    /// state from `inputs[0]` and the pristine originals from `inputs[1]`.
    fn eval(&self, inputs: &[RecordBatch]) -> Result<RecordBatch, OpError>;
}

/// Fetch input `idx` or fail with a message naming the operator.
pub(crate) fn input<'a>(
    inputs: &'a [RecordBatch],
    idx: usize,
    op: &'static str,
) -> Result<&'a RecordBatch, OpError> {
    inputs
        .get(idx)
        .ok_or_else(|| OpError::Input(format!("{op} expects input #{idx}")))
}
