#![forbid(unsafe_code)]
//! equiptab-exec: the stateful side of the engine.
//!
//! `TableSession` owns the mounted records and the projection state and
//! runs the operators; `AppContext` replaces process-wide selection state;
//! `config_channel` delivers the display allow-list once, possibly after
//! mount.

pub mod channel;
pub mod context;
pub mod error;
pub mod metrics;
pub mod session;

pub use channel::{config_channel, ConfigReceiver, ConfigSender};
pub use context::{AppContext, AppState, Selection};
pub use error::ExecError;
pub use session::TableSession;
