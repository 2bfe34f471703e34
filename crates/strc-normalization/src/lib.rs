//! Text normalization for CSV fields.
//!
//! A [`TextNormalizer`] is built once from a
//! [`NormalizationRuleSet`](strc_model::NormalizationRuleSet) and then applied
//! to every target field. Rules run in a fixed order regardless of how the
//! rule set was written:
//!
//! 1. NFKC
//! 2. width conversions (half kana to full, full kana to half, full digits)
//! 3. bracketed and circled numerals
//! 4. dash folding
//! 5. case folding (upper wins over lower)
//! 6. bracket removal
//! 7. named HTML tag removal, then blanket HTML tag removal
//! 8. control and format characters
//! 9. punctuation, symbols, emoji
//! 10. CR/LF
//! 11. configured characters, then configured substrings
//! 12. trim
//!
//! # Example
//!
//! ```
//! use strc_model::NormalizationRuleSet;
//! use strc_normalization::TextNormalizer;
//!
//! let rules = NormalizationRuleSet {
//!     to_upper: true,
//!     ..NormalizationRuleSet::default()
//! };
//! let normalizer = TextNormalizer::new(&rules).unwrap();
//! assert_eq!(normalizer.clean("  ｱｲｳ ａｂｃ１２３ "), "アイウ ABC123");
//! ```

mod emoji;
mod error;
mod normalizer;
mod patterns;
pub mod width;

pub use emoji::is_emoji;
pub use error::NormalizationError;
pub use normalizer::{TextNormalizer, clean};
