use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResfinderError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Scan failed under {}: {source}", .root.display())]
    ScanFailed {
        root: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ResfinderError {
    pub fn scan_failed(root: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ResfinderError::ScanFailed {
            root: root.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, ResfinderError>;
