//! Compiled patterns shared by every normalizer.

use std::sync::LazyLock;

use regex::Regex;

/// A full-width digit, optionally in full-width square brackets, or a digit
/// in one of the other bracket pairs, or a circled digit.
pub(crate) static PAREN_NUMERAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"［?[０-９]］?|（[０-９]）|\([０-９]\)|【[０-９]】|〔[０-９]〕|[①-⑨]")
        .expect("Invalid paren numeral regex")
});

pub(crate) static DASH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ー－―–—‐ｰ]").expect("Invalid dash regex"));

pub(crate) static PARENS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[()\[\]{}「」『』【】［］〔〕（）｢｣]").expect("Invalid parens regex")
});

pub(crate) static HTML_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"</?[^>]+?>").expect("Invalid HTML tag regex"));

/// Control (`Cc`) and format (`Cf`) characters.
pub(crate) static NON_PRINTABLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\p{Cc}\p{Cf}]").expect("Invalid non-printable regex"));

pub(crate) static PUNCTUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\p{P}").expect("Invalid punctuation regex"));

pub(crate) static SYMBOL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\p{S}").expect("Invalid symbol regex"));

/// Builds a pattern that matches opening or closing tags with the given
/// names, attributes included. Blank names are skipped; `None` means there
/// is nothing to match.
pub(crate) fn tag_pattern(tags: &[String]) -> Result<Option<Regex>, regex::Error> {
    let names: Vec<String> = tags
        .iter()
        .map(String::as_str)
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(regex::escape)
        .collect();
    if names.is_empty() {
        return Ok(None);
    }
    let pattern = format!(r"(?is)</?\s*(?:{})\b[^>]*>", names.join("|"));
    Regex::new(&pattern).map(Some)
}

/// Maps a circled digit (`①`..=`⑨`) to its ASCII digit.
pub(crate) fn circled_digit(ch: char) -> Option<char> {
    match ch {
        '①'..='⑨' => char::from_u32(ch as u32 - '①' as u32 + '1' as u32),
        _ => None,
    }
}
