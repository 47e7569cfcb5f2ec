use thiserror::Error;

/// Canonical result for core.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Invalid record: {0}")]
    Record(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
