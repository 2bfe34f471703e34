//! Text normalization options.

use serde::{Deserialize, Serialize};

use crate::de::one_or_many;

/// Ordered set of text normalization toggles.
///
/// The order in which the toggles are applied is fixed by the normalizer,
/// not by the order of the fields here. Defaults enable NFKC, full-width
/// digit narrowing, dash folding and the final trim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizationRuleSet {
    /// Apply Unicode NFKC composition first.
    pub nfkc: bool,
    /// Upper-case the text. Takes precedence over `to_lower`.
    pub to_upper: bool,
    pub to_lower: bool,
    /// Half-width katakana to full-width.
    pub half_kana_to_full: bool,
    /// Full-width katakana to half-width.
    pub full_kana_to_half: bool,
    /// Full-width digits to ASCII digits.
    pub full_digit_to_half: bool,
    /// Bracketed or circled full-width numerals to ASCII digits.
    pub paren_num_to_half: bool,
    /// Dash and prolonged-sound glyphs to `-`.
    pub dash_to_hyphen: bool,
    /// Remove bracket and parenthesis glyphs.
    pub remove_parens: bool,
    /// Remove only these HTML tags (content kept).
    #[serde(deserialize_with = "one_or_many")]
    pub remove_html_tags: Vec<String>,
    /// Remove every HTML-like tag.
    pub remove_html: bool,
    /// Remove Unicode control and format characters.
    pub remove_non_printable: bool,
    pub remove_punctuation: bool,
    pub remove_symbols: bool,
    pub remove_emoji: bool,
    /// Remove CR and LF only.
    pub remove_crlf_only: bool,
    /// Individual characters to remove.
    pub remove_chars: CharRemoval,
    /// Literal substrings to remove, applied in order.
    #[serde(deserialize_with = "one_or_many")]
    pub remove_substrings: Vec<String>,
    /// Trim leading and trailing whitespace last.
    pub trim: bool,
}

impl Default for NormalizationRuleSet {
    fn default() -> Self {
        Self {
            nfkc: true,
            to_upper: false,
            to_lower: false,
            half_kana_to_full: false,
            full_kana_to_half: false,
            full_digit_to_half: true,
            paren_num_to_half: false,
            dash_to_hyphen: true,
            remove_parens: false,
            remove_html_tags: Vec::new(),
            remove_html: false,
            remove_non_printable: false,
            remove_punctuation: false,
            remove_symbols: false,
            remove_emoji: false,
            remove_crlf_only: false,
            remove_chars: CharRemoval::default(),
            remove_substrings: Vec::new(),
            trim: true,
        }
    }
}

impl NormalizationRuleSet {
    /// A rule set with every toggle off. Cleaning with it is the identity.
    pub fn disabled() -> Self {
        Self {
            nfkc: false,
            full_digit_to_half: false,
            dash_to_hyphen: false,
            trim: false,
            ..Self::default()
        }
    }

    /// Returns true when no rule would touch the text.
    pub fn is_noop(&self) -> bool {
        !(self.nfkc
            || self.to_upper
            || self.to_lower
            || self.half_kana_to_full
            || self.full_kana_to_half
            || self.full_digit_to_half
            || self.paren_num_to_half
            || self.dash_to_hyphen
            || self.remove_parens
            || self.remove_html_tags.iter().any(|tag| !tag.trim().is_empty())
            || self.remove_html
            || self.remove_non_printable
            || self.remove_punctuation
            || self.remove_symbols
            || self.remove_emoji
            || self.remove_crlf_only
            || !self.remove_chars.is_empty()
            || self.remove_substrings.iter().any(|sub| !sub.is_empty())
            || self.trim)
    }
}

/// Characters to remove, configured either as one string or as a list.
///
/// Both sources are unioned: every character of every list entry and every
/// character of `text` is removed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "CharRemovalRepr", into = "CharRemovalRepr")]
pub struct CharRemoval {
    pub text: String,
    pub sets: Vec<String>,
}

impl CharRemoval {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sets: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.sets.iter().all(String::is_empty)
    }

    /// Iterates over every character in the union, duplicates included.
    pub fn chars(&self) -> impl Iterator<Item = char> + '_ {
        self.sets
            .iter()
            .flat_map(|set| set.chars())
            .chain(self.text.chars())
    }
}

impl From<&str> for CharRemoval {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum CharRemovalRepr {
    Text(String),
    Sets(Vec<String>),
}

impl From<CharRemovalRepr> for CharRemoval {
    fn from(value: CharRemovalRepr) -> Self {
        match value {
            CharRemovalRepr::Text(text) => CharRemoval::new(text),
            CharRemovalRepr::Sets(sets) => CharRemoval {
                text: String::new(),
                sets,
            },
        }
    }
}

impl From<CharRemoval> for CharRemovalRepr {
    fn from(value: CharRemoval) -> Self {
        if value.sets.is_empty() {
            return CharRemovalRepr::Text(value.text);
        }
        let mut sets = value.sets;
        if !value.text.is_empty() {
            sets.push(value.text);
        }
        CharRemovalRepr::Sets(sets)
    }
}

/// The `[normalize]` configuration section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizeSettings {
    #[serde(flatten)]
    pub rules: NormalizationRuleSet,
    /// Overwrite target fields with their normalized value.
    pub write_back: bool,
}

impl Default for NormalizeSettings {
    fn default() -> Self {
        Self {
            rules: NormalizationRuleSet::default(),
            write_back: true,
        }
    }
}
