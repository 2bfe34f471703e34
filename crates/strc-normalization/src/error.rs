//! Error types for normalizer construction.

use thiserror::Error;

/// Errors raised while compiling a rule set.
///
/// Cleaning itself never fails; only building the per-rule-set patterns can.
#[derive(Debug, Error)]
pub enum NormalizationError {
    /// The pattern built from `remove_html_tags` did not compile.
    #[error("invalid remove_html_tags pattern for {tags:?}: {source}")]
    TagPattern {
        tags: Vec<String>,
        #[source]
        source: regex::Error,
    },
}
