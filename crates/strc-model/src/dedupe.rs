//! Deduplication policy.

use serde::{Deserialize, Serialize};

use crate::de::one_or_many;
use crate::enums::KeepMode;

/// Delimiter used when none (or an empty one) is configured.
pub const DEFAULT_KEY_DELIMITER: &str = "|";

/// Header name given to an appended key column by default.
pub const DEFAULT_KEY_HEADER: &str = "__dedupe_key";

/// The `[dedupe]` configuration section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DedupePolicy {
    /// Build a key for every row.
    pub enabled: bool,
    /// Key columns, 1-origin. Empty means "use the normalization targets".
    #[serde(deserialize_with = "one_or_many")]
    pub columns: Vec<i64>,
    /// Append the key as a trailing field.
    pub append_key: bool,
    /// Overwrite the first key column with the key.
    pub replace_target: bool,
    /// Do not emit rows whose key was already retained.
    pub drop_duplicates: bool,
    /// Which duplicate survives when dropping.
    pub keep: KeepMode,
    /// Header name for the appended key column.
    pub output_header: String,
    /// Separator placed between key column values.
    pub delimiter: String,
    /// Build keys from normalized rather than raw values.
    pub use_normalized: bool,
    /// Rows with an empty or whitespace-only key are never dropped.
    pub ignore_empty_key: bool,
}

impl Default for DedupePolicy {
    fn default() -> Self {
        Self {
            enabled: false,
            columns: Vec::new(),
            append_key: false,
            replace_target: false,
            drop_duplicates: false,
            keep: KeepMode::First,
            output_header: DEFAULT_KEY_HEADER.to_string(),
            delimiter: DEFAULT_KEY_DELIMITER.to_string(),
            use_normalized: true,
            ignore_empty_key: true,
        }
    }
}

impl DedupePolicy {
    /// The configured delimiter, or `|` when it is empty.
    pub fn effective_delimiter(&self) -> &str {
        if self.delimiter.is_empty() {
            DEFAULT_KEY_DELIMITER
        } else {
            &self.delimiter
        }
    }

    /// Key columns to use, falling back to the normalization targets.
    pub fn key_columns<'a>(&'a self, target_columns: &'a [i64]) -> &'a [i64] {
        if self.columns.is_empty() {
            target_columns
        } else {
            &self.columns
        }
    }
}
