//! Word similarity on top of Levenshtein distance.

use super::normalize::normalize;

/// Score returned when two words differ only in diacritics.
pub const DIACRITIC_ONLY_SIMILARITY: f64 = 0.9;

/// Similarity in `[0, 1]` between two words.
///
/// Exact matches score 1.0. Words that are equal once diacritics are stripped
/// score [`DIACRITIC_ONLY_SIMILARITY`]. Everything else scores
/// `1 - distance / longest`, measured on the normalized forms. Two words that
/// normalize to nothing (and are not identical) score 0.0.
pub fn similarity(a: &str, b: &str) -> f64 {
    if a == b {
        return 1.0;
    }

    let a_norm: Vec<char> = normalize(a).chars().collect();
    let b_norm: Vec<char> = normalize(b).chars().collect();

    if a_norm.is_empty() && b_norm.is_empty() {
        return 0.0;
    }

    if a_norm == b_norm {
        return DIACRITIC_ONLY_SIMILARITY;
    }

    let distance = levenshtein(&a_norm, &b_norm);
    let longest = a_norm.len().max(b_norm.len());

    1.0 - distance as f64 / longest as f64
}

/// Character edit distance with unit insert, delete and substitute costs.
pub fn levenshtein(a: &[char], b: &[char]) -> usize {
    let n = b.len();
    let mut prev: Vec<usize> = (0..=n).collect();
    let mut curr = vec![0; n + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[n]
}
