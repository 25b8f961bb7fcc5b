// crates/core/src/result.rs
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NameforgeError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Invalid model response: {0}")]
    InvalidResponse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type NameforgeResult<T> = Result<T, NameforgeError>;
