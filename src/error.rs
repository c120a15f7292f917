// Error taxonomy for scanning

use std::path::PathBuf;

/// Errors raised while scanning a directory.
///
/// Only `DirectoryNotFound`, `InvalidArgument` and a `ReadFailure` on the
/// scan root reach the caller of [`crate::scan`]. Everything else is
/// per-file and is turned into an in-band `error` definition.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),

    #[error("Failed to parse {path}: {reason}")]
    ParseFailure { path: String, reason: String },

    #[error("Query execution failed ({query}): {reason}")]
    QueryExecutionFailure { query: String, reason: String },

    #[error("Failed to read {path}: {source}")]
    ReadFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Directory not found: {0}")]
    DirectoryNotFound(PathBuf),

    #[error("Invalid regex '{pattern}': {source}")]
    InvalidRegex {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Failed to serialize output: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ScanError>;
