use std::path::PathBuf;
use thiserror::Error;

/// Result type for ingestion operations
pub type Result<T> = std::result::Result<T, IngestError>;

/// Errors that can occur while loading or splitting documents
#[derive(Error, Debug)]
pub enum IngestError {
    /// Path is neither a supported file nor a directory
    #[error("Invalid source path: {}", .0.display())]
    InvalidSource(PathBuf),

    /// File type is recognised but cannot be read by this loader
    #[error("Unsupported document format '{format}': {}", .path.display())]
    UnsupportedFormat { path: PathBuf, format: String },

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// IO error while reading a document
    #[error("IO error reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl IngestError {
    /// Create an invalid config error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
