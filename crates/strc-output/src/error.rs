//! Error types for the output side.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while preparing or encoding output.
#[derive(Debug, Error)]
pub enum OutputError {
    /// The output file could not be created.
    #[error("failed to create output {path}: {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The byte-order mark could not be written.
    #[error("failed to write byte-order mark: {0}")]
    Bom(#[source] std::io::Error),

    /// A character has no representation in the target code page.
    #[error("character {ch:?} cannot be encoded as {code_page}")]
    Unmappable { ch: char, code_page: &'static str },

    /// The stream ended in the middle of a UTF-8 sequence.
    #[error("output ended with an incomplete UTF-8 sequence")]
    IncompleteUtf8,
}

/// Result type for output operations.
pub type Result<T> = std::result::Result<T, OutputError>;
