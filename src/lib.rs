#![forbid(unsafe_code)]
//! equiptab: normalize heterogeneous equipment records into a uniform,
//! display-ready table.
//!
//! This crate only re-exports the workspace members so integration tests
//! and benchmarks have one import root.

pub use equiptab_core;
pub use equiptab_exec;
pub use equiptab_io;
pub use equiptab_operators;

pub use equiptab_core::prelude::*;
pub use equiptab_exec::{config_channel, AppContext, TableSession};
