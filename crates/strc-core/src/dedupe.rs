//! Execution strategy and first/last retention.

use std::collections::HashSet;
use std::fmt;

use strc_model::{DedupePolicy, KeepMode};

/// How rows travel from the transform to the writer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Strategy {
    /// Each row is written as soon as it is transformed.
    #[default]
    Streaming,
    /// All rows are transformed and held, then filtered by `keep`.
    Buffered { keep: KeepMode },
}

impl Strategy {
    /// Buffering is needed only when duplicates are dropped and a key exists.
    pub fn select(policy: &DedupePolicy, key_builder_active: bool) -> Self {
        if policy.enabled && policy.drop_duplicates && key_builder_active {
            Strategy::Buffered { keep: policy.keep }
        } else {
            Strategy::Streaming
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Streaming => "streaming",
            Strategy::Buffered {
                keep: KeepMode::First,
            } => "buffered (keep first)",
            Strategy::Buffered {
                keep: KeepMode::Last,
            } => "buffered (keep last)",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A transformed row waiting for the retention decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyedRow {
    pub fields: Vec<String>,
    pub key: String,
    /// Exempt from duplicate filtering.
    pub passthrough: bool,
}

/// Returns, for each row, whether it survives under `keep`.
///
/// Passthrough rows always survive and never mark their key as seen.
pub fn retain(rows: &[KeyedRow], keep: KeepMode) -> Vec<bool> {
    match keep {
        KeepMode::First => retain_first(rows),
        KeepMode::Last => retain_last(rows),
    }
}

fn retain_first(rows: &[KeyedRow]) -> Vec<bool> {
    let mut seen = HashSet::new();
    rows.iter()
        .map(|row| row.passthrough || seen.insert(row.key.as_str()))
        .collect()
}

/// Marks from the back so the last occurrence wins; rows are still emitted
/// in their original order.
fn retain_last(rows: &[KeyedRow]) -> Vec<bool> {
    let mut seen = HashSet::new();
    let mut keep = vec![false; rows.len()];
    for (index, row) in rows.iter().enumerate().rev() {
        keep[index] = row.passthrough || seen.insert(row.key.as_str());
    }
    keep
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(keys: &[&str]) -> Vec<KeyedRow> {
        keys.iter()
            .enumerate()
            .map(|(index, key)| KeyedRow {
                fields: vec![index.to_string()],
                key: (*key).to_string(),
                passthrough: key.trim().is_empty(),
            })
            .collect()
    }

    #[test]
    fn selects_buffered_only_when_dropping_with_keys() {
        let mut policy = DedupePolicy {
            enabled: true,
            drop_duplicates: true,
            keep: KeepMode::Last,
            ..DedupePolicy::default()
        };
        assert_eq!(
            Strategy::select(&policy, true),
            Strategy::Buffered {
                keep: KeepMode::Last
            }
        );
        assert_eq!(Strategy::select(&policy, false), Strategy::Streaming);
        policy.drop_duplicates = false;
        assert_eq!(Strategy::select(&policy, true), Strategy::Streaming);
        policy.drop_duplicates = true;
        policy.enabled = false;
        assert_eq!(Strategy::select(&policy, true), Strategy::Streaming);
    }

    #[test]
    fn first_keeps_earliest() {
        let rows = rows(&["a", "b", "a", "c", "b"]);
        assert_eq!(
            retain(&rows, KeepMode::First),
            vec![true, true, false, true, false]
        );
    }

    #[test]
    fn last_keeps_latest_in_original_order() {
        let rows = rows(&["a", "b", "a", "c", "b"]);
        assert_eq!(
            retain(&rows, KeepMode::Last),
            vec![false, false, true, true, true]
        );
    }

    #[test]
    fn passthrough_rows_always_survive() {
        let rows = rows(&["", "a", " ", "a", ""]);
        assert_eq!(
            retain(&rows, KeepMode::First),
            vec![true, true, true, false, true]
        );
        assert_eq!(
            retain(&rows, KeepMode::Last),
            vec![true, false, true, true, true]
        );
    }

    #[test]
    fn empty_key_is_deduplicated_when_not_passthrough() {
        let mut rows = rows(&["", ""]);
        for row in &mut rows {
            row.passthrough = false;
        }
        assert_eq!(retain(&rows, KeepMode::First), vec![true, false]);
    }
}
