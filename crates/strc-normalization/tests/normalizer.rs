//! Integration tests for the text normalizer.

use proptest::prelude::*;

use strc_model::{CharRemoval, NormalizationRuleSet};
use strc_normalization::TextNormalizer;

/// Mixed-width Latin, katakana, digits, brackets, dashes, tags and emoji.
/// Standalone voiced marks are left out: removing a character between a
/// kana and its mark lets NFKC compose them on a later pass.
const MIXED_TEXT: &str =
    "[a-zA-Z0-9０-９Ａ-Ｚａ-ｚァ-ンｦ-ﾝー－―–—‐ｰ（）()【】「」<>/!?。、・ 　\t\r\n😀🚀①-⑨]{0,24}";

/// Named tag and substring removal are left out of the flags: one pass can
/// expose a new match (`<<b>b>x` becomes `<b>x`), so they are not idempotent.
fn rules_from(flags: [bool; 17]) -> NormalizationRuleSet {
    NormalizationRuleSet {
        nfkc: flags[0],
        to_upper: flags[1],
        to_lower: flags[2],
        half_kana_to_full: flags[3],
        full_kana_to_half: flags[4],
        full_digit_to_half: flags[5],
        paren_num_to_half: flags[6],
        dash_to_hyphen: flags[7],
        remove_parens: flags[8],
        remove_html: flags[9],
        remove_non_printable: flags[10],
        remove_punctuation: flags[11],
        remove_symbols: flags[12],
        remove_emoji: flags[13],
        remove_crlf_only: flags[14],
        remove_chars: if flags[15] {
            CharRemoval::new(" -")
        } else {
            CharRemoval::default()
        },
        trim: flags[16],
        ..NormalizationRuleSet::disabled()
    }
}

#[test]
fn removes_markup_brackets_and_separators() {
    let rules = NormalizationRuleSet {
        to_lower: true,
        remove_html: true,
        remove_parens: true,
        remove_non_printable: true,
        remove_chars: CharRemoval::new(" -.,\u{3000}"),
        ..NormalizationRuleSet::default()
    };
    let normalizer = TextNormalizer::new(&rules).unwrap();
    assert_eq!(normalizer.clean("Ａ<sup>Ｂ</sup>（Ｃ）\n"), "abc");
}

#[test]
fn mixed_width_company_names_converge() {
    let rules = NormalizationRuleSet {
        to_upper: true,
        remove_chars: CharRemoval::new(" "),
        ..NormalizationRuleSet::default()
    };
    let normalizer = TextNormalizer::new(&rules).unwrap();
    let variants = ["ｶﾌﾞｼｷｶﾞｲｼｬ ＡＢＣ", "カブシキガイシャ abc", " カブシキガイシャＡｂＣ "];
    for variant in variants {
        assert_eq!(normalizer.clean(variant), "カブシキガイシャABC", "{variant:?}");
    }
}

#[test]
fn width_conversions_are_one_directional() {
    let to_half = TextNormalizer::new(&NormalizationRuleSet {
        full_kana_to_half: true,
        ..NormalizationRuleSet::disabled()
    })
    .unwrap();
    let to_full = TextNormalizer::new(&NormalizationRuleSet {
        half_kana_to_full: true,
        ..NormalizationRuleSet::disabled()
    })
    .unwrap();

    assert_eq!(to_half.clean("ガッコウ"), "ｶﾞｯｺｳ");
    assert_eq!(to_full.clean("ｶﾞｯｺｳ"), "ガッコウ");
    // each direction leaves text already in its target width alone
    assert_eq!(to_half.clean("ｶﾞｯｺｳ"), "ｶﾞｯｺｳ");
    assert_eq!(to_full.clean("ガッコウ"), "ガッコウ");
}

#[test]
fn named_tags_and_blanket_tags_combine() {
    let rules = NormalizationRuleSet {
        remove_html_tags: vec!["sup".to_string()],
        ..NormalizationRuleSet::disabled()
    };
    let normalizer = TextNormalizer::new(&rules).unwrap();
    assert_eq!(normalizer.clean("m<sup>2</sup> <b>x</b>"), "m2 <b>x</b>");

    let rules = NormalizationRuleSet {
        remove_html: true,
        ..rules
    };
    let normalizer = TextNormalizer::new(&rules).unwrap();
    assert_eq!(normalizer.clean("m<sup>2</sup> <b>x</b>"), "m2 x");
}

#[test]
fn named_tags_and_substrings_are_single_pass() {
    let tags = TextNormalizer::new(&NormalizationRuleSet {
        remove_html_tags: vec!["b".to_string()],
        ..NormalizationRuleSet::disabled()
    })
    .unwrap();
    assert_eq!(tags.clean("<<b>b>x"), "<b>x");

    let substrings = TextNormalizer::new(&NormalizationRuleSet {
        remove_substrings: vec!["ab".to_string()],
        ..NormalizationRuleSet::disabled()
    })
    .unwrap();
    assert_eq!(substrings.clean("aabb"), "ab");
}

proptest! {
    #[test]
    fn clean_is_idempotent(flags in any::<[bool; 17]>(), text in MIXED_TEXT) {
        let normalizer = TextNormalizer::new(&rules_from(flags)).unwrap();
        let once = normalizer.clean(&text).into_owned();
        let twice = normalizer.clean(&once).into_owned();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn upper_takes_precedence(flags in any::<[bool; 17]>(), text in MIXED_TEXT) {
        let mut upper_only = rules_from(flags);
        upper_only.to_upper = true;
        upper_only.to_lower = false;
        let mut both = upper_only.clone();
        both.to_lower = true;

        let expected = TextNormalizer::new(&upper_only).unwrap().clean(&text).into_owned();
        let actual = TextNormalizer::new(&both).unwrap().clean(&text).into_owned();
        prop_assert_eq!(expected, actual);
    }

    #[test]
    fn disabled_rules_are_identity(text in "\\PC{0,32}") {
        let normalizer = TextNormalizer::new(&NormalizationRuleSet::disabled()).unwrap();
        prop_assert_eq!(normalizer.clean(&text), text.as_str());
    }
}
