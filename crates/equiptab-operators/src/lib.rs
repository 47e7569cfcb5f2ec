#![forbid(unsafe_code)]
//! equiptab-operators: catalog / reorder / hide / show operators, plus the
//! label formatter and the materializer that turns a batch into a `Table`.
//!
//! Design intent:
//! - Pure and synchronous. No IO, no async.
//! - Row-set transformations implement `Operator` so the session can run
//!   them uniformly; label formatting and materialization are plain
//!   functions because their output is not a record batch.

pub mod catalog;
pub mod label;
pub mod materialize;
pub mod order;
pub mod traits;
pub mod visibility;

pub use catalog::{build_catalog, homogenize, Homogenize};
pub use label::format_label;
pub use materialize::{materialize, stringify_cell, truncate_decimals};
pub use order::{resolve_display_order, Reorder};
pub use traits::{OpError, Operator};
pub use visibility::{Hide, Show};
