//! Error types for opening input.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur before any record is read.
#[derive(Debug, Error)]
pub enum IngestError {
    /// The input file could not be opened.
    #[error("failed to open input {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for ingest operations.
pub type Result<T> = std::result::Result<T, IngestError>;
