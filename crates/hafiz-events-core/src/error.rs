//! Error types for Hafiz Events

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    // Record Errors
    #[error("Malformed object key encoding: {0}")]
    MalformedKey(String),

    #[error("Unexpected record field: {0}")]
    UnexpectedField(String),

    // Batch Errors
    #[error("Malformed notification batch: {0}")]
    MalformedBatch(String),

    #[error("Batch deadline of {0}ms exceeded")]
    DeadlineExceeded(u64),

    // Configuration Errors
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    pub fn code(&self) -> &'static str {
        match self {
            Error::MalformedKey(_) => "DecodeError",
            Error::UnexpectedField(_) => "UnexpectedFieldError",
            Error::MalformedBatch(_) => "MalformedBatch",
            Error::DeadlineExceeded(_) => "DeadlineExceeded",
            Error::InvalidConfig(_) => "InvalidConfig",
            Error::Io(_) => "InternalError",
            Error::Json(_) => "InternalError",
            Error::Other(_) => "InternalError",
        }
    }
}
