use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum MistakeKind {
    Omission,
    Addition,
    Mispronunciation,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "camelCase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

/// One divergence between the canonical verse and what was recited.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Mistake {
    pub kind: MistakeKind,
    /// Index into the canonical word sequence.
    pub position: usize,
    pub severity: Severity,
    pub expected_word: Option<String>,
    pub recited_word: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    pub accuracy_percent: f64,
    pub mistakes: Vec<Mistake>,
    pub missing_words: Vec<String>,
    pub extra_words: Vec<String>,
}

impl ValidationResult {
    /// Result for a verse the corpus does not know about.
    pub fn absent() -> Self {
        Self::default()
    }

    pub fn count_of(&self, kind: MistakeKind) -> usize {
        self.mistakes.iter().filter(|m| m.kind == kind).count()
    }
}
