use std::sync::Arc;

use crate::corpus::{CanonicalVerse, VerseCorpus, VerseReference};

use super::config::ValidationThresholds;
use super::similarity::similarity;
use super::types::{Mistake, MistakeKind, Severity, ValidationResult};

const ENABLE_LOGS: bool = true;

use crate::{log_debug, log_warn};

/// Scores recited text against canonical verses.
#[derive(Clone)]
pub struct RecitationValidator {
    corpus: Arc<dyn VerseCorpus>,
    thresholds: ValidationThresholds,
}

impl RecitationValidator {
    pub fn new(corpus: Arc<dyn VerseCorpus>) -> Self {
        Self::with_thresholds(corpus, ValidationThresholds::default())
    }

    pub fn with_thresholds(corpus: Arc<dyn VerseCorpus>, thresholds: ValidationThresholds) -> Self {
        Self { corpus, thresholds }
    }

    /// Validate `recited_text` against the verse at `reference`.
    ///
    /// A verse missing from the corpus yields an invalid, zero-accuracy result
    /// rather than an error.
    pub fn validate(&self, reference: VerseReference, recited_text: &str) -> ValidationResult {
        match self.corpus.verse(reference) {
            Some(verse) => self.validate_verse(&verse, recited_text),
            None => {
                log_warn!("verse {} not found in corpus", reference);
                ValidationResult::absent()
            }
        }
    }

    /// Validate against a verse the caller already holds.
    pub fn validate_verse(&self, verse: &CanonicalVerse, recited_text: &str) -> ValidationResult {
        let result = validate_words(&verse.words, recited_text, &self.thresholds);
        log_debug!(
            "verse {} scored {:.1}% with {} mistakes",
            verse.reference,
            result.accuracy_percent,
            result.mistakes.len()
        );
        result
    }
}

/// Compare recited text with a canonical word sequence, index for index.
///
/// Words are matched by position only. One dropped word shifts every later
/// recited word out of place, so the rest of the verse is reported as
/// mispronounced.
// TODO: offer an LCS-based word alignment so a single omission does not
// cascade into mispronunciations for the remainder of the verse.
pub fn validate_words(
    expected: &[String],
    recited_text: &str,
    thresholds: &ValidationThresholds,
) -> ValidationResult {
    let recited: Vec<&str> = recited_text.split_whitespace().collect();

    let mut mistakes = Vec::new();
    let mut missing_words = Vec::new();

    for (position, expected_word) in expected.iter().enumerate() {
        let Some(&recited_word) = recited.get(position) else {
            missing_words.push(expected_word.clone());
            mistakes.push(Mistake {
                kind: MistakeKind::Omission,
                position,
                severity: Severity::High,
                expected_word: Some(expected_word.clone()),
                recited_word: None,
            });
            continue;
        };

        let score = similarity(expected_word, recited_word);
        if score < thresholds.correct_word {
            let severity = if score < thresholds.high_severity {
                Severity::High
            } else {
                Severity::Medium
            };
            mistakes.push(Mistake {
                kind: MistakeKind::Mispronunciation,
                position,
                severity,
                expected_word: Some(expected_word.clone()),
                recited_word: Some(recited_word.to_string()),
            });
        }
    }

    let extra_words: Vec<String> = recited
        .iter()
        .skip(expected.len())
        .map(|w| w.to_string())
        .collect();
    if !extra_words.is_empty() {
        mistakes.push(Mistake {
            kind: MistakeKind::Addition,
            position: expected.len(),
            severity: Severity::Medium,
            expected_word: None,
            recited_word: None,
        });
    }

    let accuracy_percent = if expected.is_empty() {
        0.0
    } else {
        let mispronounced = mistakes
            .iter()
            .filter(|m| m.kind == MistakeKind::Mispronunciation)
            .count();
        let correct = expected.len() - missing_words.len() - mispronounced;
        100.0 * correct as f64 / expected.len() as f64
    };

    ValidationResult {
        is_valid: accuracy_percent >= thresholds.passing_accuracy,
        accuracy_percent,
        mistakes,
        missing_words,
        extra_words,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::BundledCorpus;

    fn basmala() -> Vec<String> {
        ["بِسْمِ", "اللَّهِ", "الرَّحْمَٰنِ", "الرَّحِيمِ"]
            .iter()
            .map(|w| w.to_string())
            .collect()
    }

    fn validator() -> RecitationValidator {
        RecitationValidator::new(Arc::new(BundledCorpus::load().unwrap()))
    }

    #[test]
    fn exact_recitation_is_perfect() {
        let result = validator().validate(
            VerseReference::new(1, 1),
            "بِسْمِ اللَّهِ الرَّحْمَٰنِ الرَّحِيمِ",
        );
        assert_eq!(result.accuracy_percent, 100.0);
        assert!(result.mistakes.is_empty());
        assert!(result.is_valid);
    }

    #[test]
    fn recitation_without_diacritics_still_passes() {
        let result = validator().validate(VerseReference::new(1, 1), "بسم الله الرحمن الرحيم");
        assert_eq!(result.accuracy_percent, 100.0);
        assert!(result.mistakes.is_empty());
    }

    #[test]
    fn empty_recitation_misses_every_word() {
        let result = validate_words(&basmala(), "", &ValidationThresholds::default());
        assert_eq!(result.missing_words, basmala());
        assert_eq!(result.accuracy_percent, 0.0);
        assert!(!result.is_valid);
        assert_eq!(result.count_of(MistakeKind::Omission), 4);
        assert!(result.mistakes.iter().all(|m| m.severity == Severity::High));
    }

    #[test]
    fn absent_verse_is_invalid_without_error() {
        let result = validator().validate(VerseReference::new(2, 255), "anything");
        assert_eq!(result.accuracy_percent, 0.0);
        assert!(!result.is_valid);
        assert!(result.mistakes.is_empty());
        assert!(result.missing_words.is_empty());
        assert!(result.extra_words.is_empty());
    }

    #[test]
    fn custom_thresholds_change_the_verdict() {
        let corpus = Arc::new(BundledCorpus::load().unwrap());
        let lenient = RecitationValidator::with_thresholds(
            corpus.clone(),
            ValidationThresholds {
                passing_accuracy: 50.0,
                ..ValidationThresholds::default()
            },
        );
        let half = lenient.validate(VerseReference::new(1, 1), "بِسْمِ اللَّهِ");
        assert_eq!(half.accuracy_percent, 50.0);
        assert!(half.is_valid);

        // bare letters score 0.9, short of a 0.95 bar
        let strict = RecitationValidator::with_thresholds(
            corpus,
            ValidationThresholds {
                correct_word: 0.95,
                ..ValidationThresholds::default()
            },
        );
        let bare = strict.validate(VerseReference::new(1, 1), "بسم الله الرحمن الرحيم");
        assert_eq!(bare.accuracy_percent, 0.0);
        assert_eq!(bare.count_of(MistakeKind::Mispronunciation), 4);
        assert!(bare
            .mistakes
            .iter()
            .all(|m| m.severity == Severity::Medium));
    }

    #[test]
    fn first_two_words_only_is_half_accuracy() {
        let result = validate_words(&basmala(), "بِسْمِ اللَّهِ", &ValidationThresholds::default());
        let positions: Vec<usize> = result
            .mistakes
            .iter()
            .filter(|m| m.kind == MistakeKind::Omission)
            .map(|m| m.position)
            .collect();
        assert_eq!(positions, vec![2, 3]);
        assert_eq!(result.accuracy_percent, 50.0);
        assert!(!result.is_valid);
    }

    #[test]
    fn trailing_extra_word_is_one_addition() {
        let result = validate_words(
            &basmala(),
            "بِسْمِ اللَّهِ الرَّحْمَٰنِ الرَّحِيمِ آمين",
            &ValidationThresholds::default(),
        );
        assert_eq!(result.mistakes.len(), 1);
        let addition = &result.mistakes[0];
        assert_eq!(addition.kind, MistakeKind::Addition);
        assert_eq!(addition.position, 4);
        assert_eq!(addition.severity, Severity::Medium);
        assert_eq!(result.extra_words, vec!["آمين"]);
        assert_eq!(result.accuracy_percent, 100.0);
        assert!(result.is_valid);
    }

    #[test]
    fn several_surplus_words_still_one_addition() {
        let result = validate_words(
            &basmala(),
            "بسم الله الرحمن الرحيم الحمد لله",
            &ValidationThresholds::default(),
        );
        assert_eq!(result.count_of(MistakeKind::Addition), 1);
        assert_eq!(result.extra_words, vec!["الحمد", "لله"]);
    }

    #[test]
    fn mispronunciation_severity_follows_similarity() {
        // "الرحمن" vs "الرحيم" scores 4/6, just under the correct cutoff
        let result = validate_words(
            &basmala(),
            "بسم الله الرحيم xyz",
            &ValidationThresholds::default(),
        );
        let mistakes: Vec<(usize, Severity)> = result
            .mistakes
            .iter()
            .map(|m| (m.position, m.severity))
            .collect();
        assert_eq!(mistakes, vec![(2, Severity::Medium), (3, Severity::High)]);
        assert_eq!(result.mistakes[0].recited_word.as_deref(), Some("الرحيم"));
        assert_eq!(result.accuracy_percent, 50.0);
    }

    #[test]
    fn early_omission_cascades_positionally() {
        // dropping "اللَّهِ" shifts the remaining words out of place
        let result = validate_words(
            &basmala(),
            "بِسْمِ الرَّحْمَٰنِ الرَّحِيمِ",
            &ValidationThresholds::default(),
        );
        assert_eq!(result.count_of(MistakeKind::Mispronunciation), 2);
        assert_eq!(result.count_of(MistakeKind::Omission), 1);
        assert_eq!(result.accuracy_percent, 25.0);
    }

    #[test]
    fn seventy_percent_is_the_pass_mark() {
        let expected: Vec<String> = (0..10).map(|i| format!("w{i}")).collect();
        let recited = "w0 w1 w2 w3 w4 w5 w6";
        let result = validate_words(&expected, recited, &ValidationThresholds::default());
        assert_eq!(result.accuracy_percent, 70.0);
        assert!(result.is_valid);
    }

    #[test]
    fn empty_canonical_verse_is_invalid() {
        let result = validate_words(&[], "something", &ValidationThresholds::default());
        assert_eq!(result.accuracy_percent, 0.0);
        assert!(!result.is_valid);
        assert_eq!(result.extra_words, vec!["something"]);
    }
}
