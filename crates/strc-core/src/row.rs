//! Normalization of the target columns of one row.

use std::collections::BTreeMap;

use strc_normalization::TextNormalizer;

/// Normalized values of one row, keyed by 0-origin column index.
///
/// Created for each record and dropped with it.
pub type NormalizedCache = BTreeMap<usize, String>;

/// Converts 1-origin column numbers to 0-origin indices, dropping
/// non-positive entries.
pub fn column_indices(columns: &[i64]) -> Vec<usize> {
    columns
        .iter()
        .filter(|&&column| column > 0)
        .filter_map(|&column| usize::try_from(column - 1).ok())
        .collect()
}

/// Applies the normalizer to the target columns of a row.
#[derive(Debug, Clone)]
pub struct RowTransform {
    normalizer: TextNormalizer,
    targets: Vec<usize>,
    write_back: bool,
}

impl RowTransform {
    pub fn new(normalizer: TextNormalizer, columns: &[i64], write_back: bool) -> Self {
        Self {
            normalizer,
            targets: column_indices(columns),
            write_back,
        }
    }

    pub fn normalizer(&self) -> &TextNormalizer {
        &self.normalizer
    }

    /// Normalizes every target column present in `row`.
    ///
    /// Columns past the end of the row are skipped. When write-back is on the
    /// fields are overwritten; either way the normalized values are returned.
    pub fn apply(&self, row: &mut [String]) -> NormalizedCache {
        let mut cache = NormalizedCache::new();
        for &column in &self.targets {
            let Some(field) = row.get_mut(column) else {
                continue;
            };
            let cleaned = self.normalizer.clean(field).into_owned();
            if self.write_back {
                field.clone_from(&cleaned);
            }
            cache.insert(column, cleaned);
        }
        cache
    }
}
