//! Character-level Unicode classification for Japanese card text.

/// Offset between a hiragana letter and its katakana counterpart.
const KANA_OFFSET: u32 = 0x60;

/// Check the full Hiragana block (U+3040..U+309F).
pub fn is_hiragana(c: char) -> bool {
    ('\u{3040}'..='\u{309F}').contains(&c)
}

/// Check the full Katakana block (U+30A0..U+30FF). Includes ・ (U+30FB) and
/// the prolonged sound mark ー (U+30FC).
pub fn is_katakana(c: char) -> bool {
    ('\u{30A0}'..='\u{30FF}').contains(&c)
}

/// Hiragana letters that have a katakana counterpart at +0x60 (ぁ..ゖ).
///
/// Narrower than [`is_hiragana`]: the combining voicing marks at U+3099..309C
/// would land on ヹ..ー and must not be shifted.
pub fn is_hiragana_letter(c: char) -> bool {
    ('\u{3041}'..='\u{3096}').contains(&c)
}

/// Katakana letters that have a hiragana counterpart at -0x60 (ァ..ヶ).
pub fn is_katakana_letter(c: char) -> bool {
    ('\u{30A1}'..='\u{30F6}').contains(&c)
}

/// ASCII or full-width digit.
pub fn is_digit(c: char) -> bool {
    c.is_ascii_digit() || ('\u{FF10}'..='\u{FF19}').contains(&c)
}

/// Convert hiragana letters to katakana.
/// Everything else (ー, kanji, ASCII, katakana) is passed through unchanged.
pub fn hiragana_to_katakana(s: &str) -> String {
    s.chars()
        .map(|c| {
            if is_hiragana_letter(c) {
                char::from_u32(c as u32 + KANA_OFFSET).unwrap_or(c)
            } else {
                c
            }
        })
        .collect()
}

/// Convert katakana letters to hiragana. Inverse of [`hiragana_to_katakana`]
/// over the letter ranges.
pub fn katakana_to_hiragana(s: &str) -> String {
    s.chars()
        .map(|c| {
            if is_katakana_letter(c) {
                char::from_u32(c as u32 - KANA_OFFSET).unwrap_or(c)
            } else {
                c
            }
        })
        .collect()
}

/// Kana-only classification shared by the dictionary tooling and the gap
/// analyzer: hiragana, katakana (which covers ー and ・), digits and
/// whitespace. Text like this already is its own reading.
///
/// The empty string is not kana-only.
pub fn is_kana_only(s: &str) -> bool {
    !s.is_empty()
        && s
            .chars()
            .all(|c| is_hiragana(c) || is_katakana(c) || is_digit(c) || c.is_whitespace())
}
