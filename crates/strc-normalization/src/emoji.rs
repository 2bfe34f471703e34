//! Emoji detection by fixed code point ranges.

/// Inclusive code point ranges treated as emoji, including the joiners and
/// modifiers that glue emoji sequences together.
const EMOJI_RANGES: [(u32, u32); 12] = [
    (0x200D, 0x200D),   // zero width joiner
    (0xFE0F, 0xFE0F),   // variation selector-16
    (0x20E3, 0x20E3),   // combining enclosing keycap
    (0x1F3FB, 0x1F3FF), // skin tone modifiers
    (0x1F600, 0x1F64F), // emoticons
    (0x1F300, 0x1F5FF), // misc symbols and pictographs
    (0x1F680, 0x1F6FF), // transport and map
    (0x2600, 0x26FF),   // misc symbols
    (0x2700, 0x27BF),   // dingbats
    (0x1F900, 0x1F9FF), // supplemental symbols and pictographs
    (0x1FA70, 0x1FAFF), // symbols and pictographs extended-A
    (0x1F1E6, 0x1F1FF), // regional indicators
];

/// Returns true when `ch` falls in one of the emoji ranges.
pub fn is_emoji(ch: char) -> bool {
    let code = ch as u32;
    EMOJI_RANGES
        .iter()
        .any(|&(first, last)| (first..=last).contains(&code))
}
