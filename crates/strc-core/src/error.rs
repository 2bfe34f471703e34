//! Error types for the row pipeline.

use std::io;
use std::path::PathBuf;

use strc_ingest::IngestError;
use strc_normalization::NormalizationError;
use strc_output::OutputError;
use thiserror::Error;

/// Errors that abort a run.
///
/// Malformed records are not errors at this level; they are logged and
/// counted in [`RunSummary::records_skipped`](crate::RunSummary).
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The rule set could not be compiled.
    #[error("invalid normalization rules: {0}")]
    Rules(#[from] NormalizationError),

    #[error("failed to open input {path}: {source}")]
    OpenInput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to create output {path}: {source}")]
    CreateOutput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Output setup failed after the sink was created.
    #[error(transparent)]
    Output(OutputError),

    /// An I/O error while reading records.
    #[error("failed to read input: {0}")]
    Read(#[source] csv::Error),

    #[error("failed to write output: {0}")]
    Write(#[source] csv::Error),

    /// Flushing or closing the output failed.
    #[error("failed to finish output: {0}")]
    Finish(#[source] io::Error),
}

impl From<IngestError> for PipelineError {
    fn from(err: IngestError) -> Self {
        match err {
            IngestError::Open { path, source } => PipelineError::OpenInput { path, source },
        }
    }
}

impl From<OutputError> for PipelineError {
    fn from(err: OutputError) -> Self {
        match err {
            OutputError::Create { path, source } => PipelineError::CreateOutput { path, source },
            other => PipelineError::Output(other),
        }
    }
}

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, PipelineError>;
