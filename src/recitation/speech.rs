use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::corpus::CanonicalVerse;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum AudioEvent {
    PauseDetected,
    WakeWordDetected,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecognizerOutput {
    Utterance(String),
    Event(AudioEvent),
}

/// Source of transcribed utterances and discrete audio events.
///
/// Polled by the listening loop. `expected` is the verse currently in focus;
/// a real recognizer may use it as a decoding hint or ignore it.
pub trait SpeechRecognizer: Send {
    fn poll(&mut self, expected: Option<&CanonicalVerse>) -> Option<RecognizerOutput>;
}

/// Odds used by [`SimulatedRecognizer`] on each poll.
#[derive(Debug, Clone, Copy)]
pub struct SimulationConfig {
    pub wake_word_chance: f64,
    pub pause_chance: f64,
    pub completion_chance: f64,
    /// Chance that a completed verse contains a slip.
    pub mistake_chance: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            wake_word_chance: 0.05,
            pause_chance: 0.1,
            completion_chance: 0.3,
            mistake_chance: 0.2,
        }
    }
}

/// Stand-in recognizer that rolls dice instead of listening.
///
/// Completed verses echo the expected text, occasionally with one word
/// dropped or a trailing word added.
pub struct SimulatedRecognizer {
    rng: StdRng,
    config: SimulationConfig,
}

impl SimulatedRecognizer {
    pub fn new(config: SimulationConfig) -> Self {
        Self {
            rng: StdRng::from_entropy(),
            config,
        }
    }

    pub fn seeded(config: SimulationConfig, seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            config,
        }
    }

    fn recite(&mut self, verse: &CanonicalVerse) -> String {
        let mut words = verse.words.clone();
        if self.rng.gen_bool(self.config.mistake_chance) && !words.is_empty() {
            if self.rng.gen_bool(0.5) {
                let dropped = self.rng.gen_range(0..words.len());
                words.remove(dropped);
            } else {
                words.push("آمين".to_string());
            }
        }
        words.join(" ")
    }
}

impl SpeechRecognizer for SimulatedRecognizer {
    fn poll(&mut self, expected: Option<&CanonicalVerse>) -> Option<RecognizerOutput> {
        if self.rng.gen_bool(self.config.wake_word_chance) {
            return Some(RecognizerOutput::Event(AudioEvent::WakeWordDetected));
        }
        if self.rng.gen_bool(self.config.pause_chance) {
            return Some(RecognizerOutput::Event(AudioEvent::PauseDetected));
        }
        let verse = expected?;
        if self.rng.gen_bool(self.config.completion_chance) {
            return Some(RecognizerOutput::Utterance(self.recite(verse)));
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::VerseReference;

    fn verse() -> CanonicalVerse {
        CanonicalVerse::from_text(VerseReference::new(112, 1), "قُلْ هُوَ اللَّهُ أَحَدٌ")
    }

    #[test]
    fn certain_completion_echoes_the_verse() {
        let config = SimulationConfig {
            wake_word_chance: 0.0,
            pause_chance: 0.0,
            completion_chance: 1.0,
            mistake_chance: 0.0,
        };
        let mut recognizer = SimulatedRecognizer::seeded(config, 7);
        assert_eq!(
            recognizer.poll(Some(&verse())),
            Some(RecognizerOutput::Utterance(verse().text()))
        );
    }

    #[test]
    fn certain_pause_is_reported_without_a_verse() {
        let config = SimulationConfig {
            wake_word_chance: 0.0,
            pause_chance: 1.0,
            ..SimulationConfig::default()
        };
        let mut recognizer = SimulatedRecognizer::seeded(config, 7);
        assert_eq!(
            recognizer.poll(None),
            Some(RecognizerOutput::Event(AudioEvent::PauseDetected))
        );
    }

    #[test]
    fn slips_change_word_count_by_one() {
        let config = SimulationConfig {
            wake_word_chance: 0.0,
            pause_chance: 0.0,
            completion_chance: 1.0,
            mistake_chance: 1.0,
        };
        let mut recognizer = SimulatedRecognizer::seeded(config, 42);
        for _ in 0..20 {
            let Some(RecognizerOutput::Utterance(text)) = recognizer.poll(Some(&verse())) else {
                panic!("expected an utterance");
            };
            let count = text.split_whitespace().count();
            assert!(count == 3 || count == 5, "unexpected word count {count}");
        }
    }

    #[test]
    fn nothing_to_recite_without_expected_verse() {
        let config = SimulationConfig {
            wake_word_chance: 0.0,
            pause_chance: 0.0,
            completion_chance: 1.0,
            mistake_chance: 0.0,
        };
        let mut recognizer = SimulatedRecognizer::seeded(config, 1);
        assert_eq!(recognizer.poll(None), None);
    }
}
