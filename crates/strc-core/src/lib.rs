//! Row processing pipeline for strcleaner.
//!
//! Records flow through four stages:
//!
//! - [`RowTransform`] normalizes the target columns of a row and keeps the
//!   normalized values in a row-local cache.
//! - [`KeyBuilder`] derives the dedupe key from the key columns.
//! - [`Strategy`] decides whether rows stream straight to the writer or are
//!   buffered so a first/last retention policy can be applied.
//! - [`Pipeline`] reads, drives the stages, and writes.

mod dedupe;
mod error;
mod key;
mod pipeline;
mod row;

pub use dedupe::{KeyedRow, Strategy, retain};
pub use error::{PipelineError, Result};
pub use key::KeyBuilder;
pub use pipeline::{Pipeline, RunSummary, process_file};
pub use row::{NormalizedCache, RowTransform, column_indices};
