//! Dedupe key construction.

use strc_model::DedupePolicy;
use strc_normalization::TextNormalizer;

use crate::row::{NormalizedCache, column_indices};

/// Builds the dedupe key of a row and applies the key side effects.
#[derive(Debug, Clone)]
pub struct KeyBuilder {
    columns: Vec<usize>,
    delimiter: String,
    use_normalized: bool,
    ignore_empty_key: bool,
    replace_target: bool,
    append_key: bool,
    output_header: String,
}

impl KeyBuilder {
    /// Returns `None` when dedupe is disabled or no key column is configured.
    ///
    /// Key columns default to `target_columns` when the policy names none.
    pub fn from_policy(policy: &DedupePolicy, target_columns: &[i64]) -> Option<Self> {
        if !policy.enabled {
            return None;
        }
        let columns = column_indices(policy.key_columns(target_columns));
        if columns.is_empty() {
            return None;
        }
        Some(Self {
            columns,
            delimiter: policy.effective_delimiter().to_string(),
            use_normalized: policy.use_normalized,
            ignore_empty_key: policy.ignore_empty_key,
            replace_target: policy.replace_target,
            append_key: policy.append_key,
            output_header: policy.output_header.clone(),
        })
    }

    /// Joins the key column values with the delimiter.
    ///
    /// Normalized values come from `cache` when the column was a target and
    /// are computed with `normalizer` otherwise. Raw values are read from the
    /// row as it is now, so written-back targets contribute their new value.
    /// Missing columns contribute an empty string.
    pub fn key(&self, row: &[String], cache: &NormalizedCache, normalizer: &TextNormalizer) -> String {
        let mut key = String::new();
        for (pos, &column) in self.columns.iter().enumerate() {
            if pos > 0 {
                key.push_str(&self.delimiter);
            }
            let Some(raw) = row.get(column) else {
                continue;
            };
            if !self.use_normalized {
                key.push_str(raw);
            } else if let Some(cached) = cache.get(&column) {
                key.push_str(cached);
            } else {
                key.push_str(&normalizer.clean(raw));
            }
        }
        key
    }

    /// Whether rows with this key bypass duplicate filtering.
    pub fn is_passthrough(&self, key: &str) -> bool {
        self.ignore_empty_key && key.trim().is_empty()
    }

    /// Writes the key into the row as configured.
    ///
    /// `replace_target` overwrites the first key column unless the key is a
    /// passthrough key; `append_key` always adds a trailing field.
    pub fn apply(&self, row: &mut Vec<String>, key: &str) {
        if self.replace_target
            && !self.is_passthrough(key)
            && let Some(field) = self.columns.first().and_then(|&column| row.get_mut(column))
        {
            key.clone_into(field);
        }
        if self.append_key {
            row.push(key.to_string());
        }
    }

    /// Header name of the appended key column, when one is appended.
    pub fn header_name(&self) -> Option<&str> {
        self.append_key.then_some(self.output_header.as_str())
    }
}

#[cfg(test)]
mod tests {
    use strc_model::NormalizationRuleSet;

    use super::*;

    fn lower() -> TextNormalizer {
        TextNormalizer::new(&NormalizationRuleSet {
            to_lower: true,
            ..NormalizationRuleSet::default()
        })
        .unwrap()
    }

    fn policy() -> DedupePolicy {
        DedupePolicy {
            enabled: true,
            ..DedupePolicy::default()
        }
    }

    fn row(fields: &[&str]) -> Vec<String> {
        fields.iter().map(|field| (*field).to_string()).collect()
    }

    #[test]
    fn inactive_without_enable_or_columns() {
        assert!(KeyBuilder::from_policy(&DedupePolicy::default(), &[1]).is_none());
        assert!(KeyBuilder::from_policy(&policy(), &[]).is_none());
        assert!(KeyBuilder::from_policy(&policy(), &[0, -1]).is_none());
        assert!(KeyBuilder::from_policy(&policy(), &[1]).is_some());
    }

    #[test]
    fn prefers_cache_then_normalizes_on_demand() {
        let builder = KeyBuilder::from_policy(
            &DedupePolicy {
                columns: vec![1, 2, 4],
                ..policy()
            },
            &[1],
        )
        .unwrap();
        let mut cache = NormalizedCache::new();
        cache.insert(0, "cached".to_string());
        let key = builder.key(&row(&["RAW", "Ｂ", "c"]), &cache, &lower());
        assert_eq!(key, "cached|b|");
    }

    #[test]
    fn raw_values_are_case_sensitive() {
        let builder = KeyBuilder::from_policy(
            &DedupePolicy {
                use_normalized: false,
                ..policy()
            },
            &[1],
        )
        .unwrap();
        let cache = NormalizedCache::new();
        assert_eq!(builder.key(&row(&["X"]), &cache, &lower()), "X");
        assert_eq!(builder.key(&row(&["x"]), &cache, &lower()), "x");
    }

    #[test]
    fn custom_and_empty_delimiters() {
        let custom = KeyBuilder::from_policy(
            &DedupePolicy {
                delimiter: "::".to_string(),
                ..policy()
            },
            &[1, 2],
        )
        .unwrap();
        let empty = KeyBuilder::from_policy(
            &DedupePolicy {
                delimiter: String::new(),
                ..policy()
            },
            &[1, 2],
        )
        .unwrap();
        let cache = NormalizedCache::new();
        let fields = row(&["a", "b"]);
        assert_eq!(custom.key(&fields, &cache, &lower()), "a::b");
        assert_eq!(empty.key(&fields, &cache, &lower()), "a|b");
    }

    #[test]
    fn replace_and_append() {
        let builder = KeyBuilder::from_policy(
            &DedupePolicy {
                replace_target: true,
                append_key: true,
                ..policy()
            },
            &[2, 1],
        )
        .unwrap();
        let mut fields = row(&["a", "b"]);
        builder.apply(&mut fields, "b|a");
        assert_eq!(fields, row(&["a", "b|a", "b|a"]));
        assert_eq!(builder.header_name(), Some("__dedupe_key"));
    }

    #[test]
    fn passthrough_key_is_appended_but_not_replaced() {
        let builder = KeyBuilder::from_policy(
            &DedupePolicy {
                replace_target: true,
                append_key: true,
                ..policy()
            },
            &[1],
        )
        .unwrap();
        let mut fields = row(&[" "]);
        assert!(builder.is_passthrough(" "));
        builder.apply(&mut fields, " ");
        assert_eq!(fields, row(&[" ", " "]));
    }

    #[test]
    fn no_header_name_without_append() {
        let builder = KeyBuilder::from_policy(&policy(), &[1]).unwrap();
        assert_eq!(builder.header_name(), None);
    }
}
