//! Canonical comparable forms of card text.
//!
//! Every string is folded the same way before comparison:
//!
//! 1. NFKC (full-width ASCII, half-width katakana and compatibility
//!    variants collapse to one codepoint), lowercase, trim.
//! 2. `katakana`: hiragana letters promoted to katakana.
//! 3. `hiragana`: the katakana form demoted back to hiragana.
//!
//! Going through the katakana form first means both outputs are script-pure
//! no matter how the input mixed the two kana scripts.

use unicode_normalization::UnicodeNormalization;

use crate::unicode::{hiragana_to_katakana, katakana_to_hiragana};

/// Characters ignored by loose matching: name separator, prolonged sound
/// mark, hyphen and sentence-final punctuation. Whitespace is handled
/// separately via `char::is_whitespace`.
pub const DECORATIONS: &[char] = &['・', 'ー', '-', '!', '?'];

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CanonicalForms {
    pub katakana: String,
    pub hiragana: String,
}

impl CanonicalForms {
    /// Both forms with decorations removed.
    pub fn stripped(&self) -> CanonicalForms {
        CanonicalForms {
            katakana: strip_decorations(&self.katakana),
            hiragana: strip_decorations(&self.hiragana),
        }
    }
}

/// NFKC + lowercase + trim, without any kana folding.
pub fn fold(text: &str) -> String {
    let folded: String = text.nfkc().collect::<String>().to_lowercase();
    folded.trim().to_string()
}

pub fn canonical_forms(text: &str) -> CanonicalForms {
    let katakana = hiragana_to_katakana(&fold(text));
    let hiragana = katakana_to_hiragana(&katakana);
    CanonicalForms { katakana, hiragana }
}

pub fn is_decoration(c: char) -> bool {
    c.is_whitespace() || DECORATIONS.contains(&c)
}

pub fn strip_decorations(form: &str) -> String {
    form.chars().filter(|&c| !is_decoration(c)).collect()
}
