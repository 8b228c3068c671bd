use std::path::PathBuf;
use thiserror::Error;

/// Core error type for packcheck operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read config at {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config at {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    #[error("Config at {path} does not match the expected record shape: {source}")]
    ConfigShape {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("No config file found in {root}")]
    ConfigNotFound { root: PathBuf },

    #[error("Invalid rule pattern /{pattern}/: {message}")]
    BadPattern { pattern: String, message: String },

    #[error("{0}")]
    Other(String),
}

impl Error {
    #[must_use]
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }
}
