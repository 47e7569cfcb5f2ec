use thiserror::Error;

use equiptab_operators::OpError;

#[derive(Debug, Error)]
pub enum ExecError {
    #[error("operator {op}: {source}")]
    Operator {
        op: &'static str,
        #[source]
        source: OpError,
    },
    #[error("configuration channel: {0}")]
    ConfigChannel(String),
    #[error(transparent)]
    Io(#[from] equiptab_io::Error),
}
