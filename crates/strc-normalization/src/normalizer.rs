//! The rule-ordered text normalizer.

use std::borrow::Cow;
use std::collections::HashSet;

use regex::{Captures, Regex};
use strc_model::NormalizationRuleSet;
use unicode_normalization::{IsNormalized, UnicodeNormalization, is_nfkc_quick};

use crate::emoji::is_emoji;
use crate::error::NormalizationError;
use crate::patterns::{
    DASH, HTML_TAG, NON_PRINTABLE, PAREN_NUMERAL, PARENS, PUNCTUATION, SYMBOL, circled_digit,
    tag_pattern,
};
use crate::width::{narrow_digit, narrow_digits, narrow_kana, widen_kana};

/// A compiled rule set.
///
/// Construction compiles the tag pattern and the removal character set once;
/// [`clean`](Self::clean) is then pure and can be shared across rows.
#[derive(Debug, Clone)]
pub struct TextNormalizer {
    rules: NormalizationRuleSet,
    tag_pattern: Option<Regex>,
    removal: HashSet<char>,
    substrings: Vec<String>,
    noop: bool,
}

impl TextNormalizer {
    pub fn new(rules: &NormalizationRuleSet) -> Result<Self, NormalizationError> {
        let tag_pattern = tag_pattern(&rules.remove_html_tags).map_err(|source| {
            NormalizationError::TagPattern {
                tags: rules.remove_html_tags.clone(),
                source,
            }
        })?;
        let substrings = rules
            .remove_substrings
            .iter()
            .filter(|sub| !sub.is_empty())
            .cloned()
            .collect();
        Ok(Self {
            rules: rules.clone(),
            tag_pattern,
            removal: rules.remove_chars.chars().collect(),
            substrings,
            noop: rules.is_noop(),
        })
    }

    /// Applies every enabled rule in order.
    ///
    /// Returns the input borrowed when nothing changed.
    pub fn clean<'a>(&self, text: &'a str) -> Cow<'a, str> {
        if self.noop {
            return Cow::Borrowed(text);
        }
        let rules = &self.rules;
        let mut text = Cow::Borrowed(text);

        if rules.nfkc {
            text = apply(text, nfkc);
        }
        if rules.half_kana_to_full {
            text = apply(text, widen_kana);
        }
        if rules.full_kana_to_half {
            text = apply(text, narrow_kana);
        }
        if rules.full_digit_to_half {
            text = apply(text, narrow_digits);
        }
        if rules.paren_num_to_half {
            text = apply(text, |s| PAREN_NUMERAL.replace_all(s, paren_numeral));
        }
        if rules.dash_to_hyphen {
            text = apply(text, |s| DASH.replace_all(s, "-"));
        }
        if rules.to_upper {
            text = apply(text, |s| fold_case(s, char::to_uppercase, str::to_uppercase));
        } else if rules.to_lower {
            text = apply(text, |s| fold_case(s, char::to_lowercase, str::to_lowercase));
        }
        if rules.remove_parens {
            text = apply(text, |s| PARENS.replace_all(s, ""));
        }
        if let Some(pattern) = &self.tag_pattern {
            text = apply(text, |s| pattern.replace_all(s, ""));
        }
        if rules.remove_html {
            text = apply(text, |s| HTML_TAG.replace_all(s, ""));
        }
        if rules.remove_non_printable {
            text = apply(text, |s| NON_PRINTABLE.replace_all(s, ""));
        }
        if rules.remove_punctuation {
            text = apply(text, |s| PUNCTUATION.replace_all(s, ""));
        }
        if rules.remove_symbols {
            text = apply(text, |s| SYMBOL.replace_all(s, ""));
        }
        if rules.remove_emoji {
            text = apply(text, |s| remove_where(s, is_emoji));
        }
        if rules.remove_crlf_only {
            text = apply(text, |s| remove_where(s, |ch| ch == '\r' || ch == '\n'));
        }
        if !self.removal.is_empty() {
            text = apply(text, |s| remove_where(s, |ch| self.removal.contains(&ch)));
        }
        for sub in &self.substrings {
            text = apply(text, |s| remove_substring(s, sub));
        }
        if rules.trim {
            text = trim(text);
        }
        text
    }
}

/// Cleans `text` with a one-off normalizer.
///
/// Prefer [`TextNormalizer`] when cleaning many values with the same rules.
pub fn clean(text: &str, rules: &NormalizationRuleSet) -> Result<String, NormalizationError> {
    Ok(TextNormalizer::new(rules)?.clean(text).into_owned())
}

/// Runs one step, keeping the current buffer when the step reports no change.
fn apply<'a, F>(text: Cow<'a, str>, step: F) -> Cow<'a, str>
where
    F: for<'b> FnOnce(&'b str) -> Cow<'b, str>,
{
    let changed = match step(&text) {
        Cow::Borrowed(_) => None,
        Cow::Owned(changed) => Some(changed),
    };
    match changed {
        Some(changed) => Cow::Owned(changed),
        None => text,
    }
}

fn nfkc(text: &str) -> Cow<'_, str> {
    if is_nfkc_quick(text.chars()) == IsNormalized::Yes {
        return Cow::Borrowed(text);
    }
    let normalized: String = text.nfkc().collect();
    if normalized == text {
        Cow::Borrowed(text)
    } else {
        Cow::Owned(normalized)
    }
}

fn paren_numeral(caps: &Captures<'_>) -> String {
    caps[0]
        .chars()
        .map(|ch| narrow_digit(ch).or_else(|| circled_digit(ch)).unwrap_or(ch))
        .collect()
}

fn fold_case<I>(text: &str, per_char: fn(char) -> I, whole: fn(&str) -> String) -> Cow<'_, str>
where
    I: Iterator<Item = char>,
{
    let unchanged = text.chars().all(|ch| {
        let mut mapped = per_char(ch);
        mapped.next() == Some(ch) && mapped.next().is_none()
    });
    if unchanged {
        Cow::Borrowed(text)
    } else {
        Cow::Owned(whole(text))
    }
}

fn remove_where(text: &str, remove: impl Fn(char) -> bool) -> Cow<'_, str> {
    if !text.chars().any(&remove) {
        return Cow::Borrowed(text);
    }
    Cow::Owned(text.chars().filter(|&ch| !remove(ch)).collect())
}

fn remove_substring<'a>(text: &'a str, sub: &str) -> Cow<'a, str> {
    if text.contains(sub) {
        Cow::Owned(text.replace(sub, ""))
    } else {
        Cow::Borrowed(text)
    }
}

fn trim(text: Cow<'_, str>) -> Cow<'_, str> {
    match text {
        Cow::Borrowed(s) => Cow::Borrowed(s.trim()),
        Cow::Owned(s) => {
            let trimmed = s.trim();
            if trimmed.len() == s.len() {
                Cow::Owned(s)
            } else {
                Cow::Owned(trimmed.to_string())
            }
        }
    }
}
