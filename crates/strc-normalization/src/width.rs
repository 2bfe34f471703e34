//! Half-width / full-width conversions for katakana and digits.
//!
//! Each conversion is one-directional and scoped to its own script; Latin
//! letters and punctuation are left to NFKC. Converting back and forth is not
//! guaranteed to reproduce the input (a decomposed `カ\u{3099}` narrows to
//! `ｶﾞ` and widens to the precomposed `ガ`).

use std::borrow::Cow;

/// Half-width voiced sound mark `ﾞ`.
pub const HALF_VOICED_MARK: char = '\u{FF9E}';
/// Half-width semi-voiced sound mark `ﾟ`.
pub const HALF_SEMI_VOICED_MARK: char = '\u{FF9F}';

const HALF_KANA_FIRST: u32 = 0xFF61;

/// Full-width forms of U+FF61..=U+FF9F, in code point order.
const HALF_TO_FULL: [char; 63] = [
    '。', '「', '」', '、', '・', 'ヲ', 'ァ', 'ィ', 'ゥ', 'ェ', 'ォ', 'ャ', 'ュ', 'ョ', 'ッ', 'ー',
    'ア', 'イ', 'ウ', 'エ', 'オ', 'カ', 'キ', 'ク', 'ケ', 'コ', 'サ', 'シ', 'ス', 'セ', 'ソ', 'タ',
    'チ', 'ツ', 'テ', 'ト', 'ナ', 'ニ', 'ヌ', 'ネ', 'ノ', 'ハ', 'ヒ', 'フ', 'ヘ', 'ホ', 'マ', 'ミ',
    'ム', 'メ', 'モ', 'ヤ', 'ユ', 'ヨ', 'ラ', 'リ', 'ル', 'レ', 'ロ', 'ワ', 'ン', '゛', '゜',
];

/// Bases whose voiced form is the next code point.
const VOICEABLE: [char; 20] = [
    'カ', 'キ', 'ク', 'ケ', 'コ', 'サ', 'シ', 'ス', 'セ', 'ソ', 'タ', 'チ', 'ツ', 'テ', 'ト', 'ハ',
    'ヒ', 'フ', 'ヘ', 'ホ',
];

/// Bases whose semi-voiced form is two code points on.
const SEMI_VOICEABLE: [char; 5] = ['ハ', 'ヒ', 'フ', 'ヘ', 'ホ'];

fn half_to_full(ch: char) -> Option<char> {
    let offset = (ch as u32).checked_sub(HALF_KANA_FIRST)?;
    HALF_TO_FULL.get(offset as usize).copied()
}

fn full_to_half(ch: char) -> Option<char> {
    let index = HALF_TO_FULL.iter().position(|&full| full == ch)?;
    char::from_u32(HALF_KANA_FIRST + index as u32)
}

fn voiced(base: char) -> Option<char> {
    match base {
        'ウ' => Some('ヴ'),
        'ワ' => Some('ヷ'),
        'ヲ' => Some('ヺ'),
        _ if VOICEABLE.contains(&base) => char::from_u32(base as u32 + 1),
        _ => None,
    }
}

fn semi_voiced(base: char) -> Option<char> {
    if SEMI_VOICEABLE.contains(&base) {
        char::from_u32(base as u32 + 2)
    } else {
        None
    }
}

/// Splits a full-width katakana into its half-width base and optional mark.
fn narrow_char(ch: char) -> Option<(char, Option<char>)> {
    if let Some(half) = full_to_half(ch) {
        return Some((half, None));
    }
    match ch {
        '\u{3099}' => return Some((HALF_VOICED_MARK, None)),
        '\u{309A}' => return Some((HALF_SEMI_VOICED_MARK, None)),
        'ヴ' => return Some(('ｳ', Some(HALF_VOICED_MARK))),
        'ヷ' => return Some(('ﾜ', Some(HALF_VOICED_MARK))),
        'ヺ' => return Some(('ｦ', Some(HALF_VOICED_MARK))),
        _ => {}
    }
    let code = ch as u32;
    if let Some(base) = char::from_u32(code.wrapping_sub(1))
        && VOICEABLE.contains(&base)
    {
        return Some((full_to_half(base)?, Some(HALF_VOICED_MARK)));
    }
    if let Some(base) = char::from_u32(code.wrapping_sub(2))
        && SEMI_VOICEABLE.contains(&base)
    {
        return Some((full_to_half(base)?, Some(HALF_SEMI_VOICED_MARK)));
    }
    None
}

/// Returns true for characters in the half-width katakana block.
pub fn is_half_kana(ch: char) -> bool {
    half_to_full(ch).is_some()
}

/// Converts half-width katakana to full-width, composing a following voiced
/// or semi-voiced mark into the precomposed form where one exists.
pub fn widen_kana(text: &str) -> Cow<'_, str> {
    if !text.chars().any(is_half_kana) {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len() + text.len() / 2);
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        let Some(full) = half_to_full(ch) else {
            out.push(ch);
            continue;
        };
        let composed = match chars.peek() {
            Some(&HALF_VOICED_MARK) => voiced(full),
            Some(&HALF_SEMI_VOICED_MARK) => semi_voiced(full),
            _ => None,
        };
        match composed {
            Some(composed) => {
                out.push(composed);
                chars.next();
            }
            None => out.push(full),
        }
    }
    Cow::Owned(out)
}

/// Converts full-width katakana to half-width, splitting voiced forms into a
/// base and a separate half-width mark.
pub fn narrow_kana(text: &str) -> Cow<'_, str> {
    if !text.chars().any(|ch| narrow_char(ch).is_some()) {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match narrow_char(ch) {
            Some((base, mark)) => {
                out.push(base);
                out.extend(mark);
            }
            None => out.push(ch),
        }
    }
    Cow::Owned(out)
}

/// Converts a full-width digit (`０`..=`９`) to ASCII.
pub fn narrow_digit(ch: char) -> Option<char> {
    match ch {
        '０'..='９' => char::from_u32(ch as u32 - '０' as u32 + '0' as u32),
        _ => None,
    }
}

/// Converts every full-width digit in `text` to ASCII.
pub fn narrow_digits(text: &str) -> Cow<'_, str> {
    if !text.chars().any(|ch| narrow_digit(ch).is_some()) {
        return Cow::Borrowed(text);
    }
    Cow::Owned(
        text.chars()
            .map(|ch| narrow_digit(ch).unwrap_or(ch))
            .collect(),
    )
}
