/// Word similarity at or above which a recited word counts as correct.
pub const CORRECT_WORD_SIMILARITY: f64 = 0.7;

/// Mispronunciations scoring below this are reported as high severity.
pub const HIGH_SEVERITY_SIMILARITY: f64 = 0.3;

/// Minimum accuracy percent for a recitation to be valid.
pub const PASSING_ACCURACY_PERCENT: f64 = 70.0;

/// Thresholds used by the validator.
///
/// Detection sensitivity from the user's settings is not applied here; the
/// defaults are the constants above.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidationThresholds {
    pub correct_word: f64,
    pub high_severity: f64,
    pub passing_accuracy: f64,
}

impl Default for ValidationThresholds {
    fn default() -> Self {
        Self {
            correct_word: CORRECT_WORD_SIMILARITY,
            high_severity: HIGH_SEVERITY_SIMILARITY,
            passing_accuracy: PASSING_ACCURACY_PERCENT,
        }
    }
}
