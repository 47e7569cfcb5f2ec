#![forbid(unsafe_code)]
//! equiptab-core: records, values, field catalogs, column descriptors and
//! projection configuration.
//!
//! Everything here is pure data. Operators live in `equiptab-operators`,
//! file formats in `equiptab-io`, and the stateful table session in
//! `equiptab-exec`.

pub mod config;
pub mod error;
pub mod names;
pub mod prelude;
pub mod schema;
pub mod types;

pub use error::{Error, Result};
