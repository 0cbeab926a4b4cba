//! Arabic diacritic stripping used before word comparison.
//!
//! Only combining marks are removed. Letters (including hamza-bearing alef
//! forms) and whitespace pass through untouched, so the output preserves the
//! order and word boundaries of the input.

/// Code point ranges treated as diacritics, inclusive.
const DIACRITIC_RANGES: &[(char, char)] = &[
    ('\u{0610}', '\u{061A}'), // Quranic honorifics and small high marks
    ('\u{064B}', '\u{065F}'), // Tanween, harakat, shadda, sukun, maddah, hamza marks
    ('\u{0670}', '\u{0670}'), // Superscript alef
    ('\u{06D6}', '\u{06DC}'), // Small high ligatures (pause marks)
    ('\u{06DF}', '\u{06E4}'), // Small high rounded zero .. small high madda
    ('\u{06E7}', '\u{06E8}'), // Small high yeh, small high noon
    ('\u{06EA}', '\u{06ED}'), // Empty centre stops, small low meem
];

#[inline]
pub fn is_diacritic(c: char) -> bool {
    DIACRITIC_RANGES
        .iter()
        .any(|&(lo, hi)| (lo..=hi).contains(&c))
}

/// Strip Arabic diacritics from `text`.
///
/// Total and idempotent: `normalize(&normalize(x)) == normalize(x)`.
pub fn normalize(text: &str) -> String {
    text.chars().filter(|&c| !is_diacritic(c)).collect()
}
