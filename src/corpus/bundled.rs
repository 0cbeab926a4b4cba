use std::collections::{BTreeMap, HashMap};

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use super::{chapters, CanonicalVerse, VerseCorpus, VerseReference};

const BUNDLED_VERSES: &str = include_str!("bundled_verses.json");

#[derive(Debug, Deserialize)]
struct CorpusFile {
    chapters: Vec<ChapterText>,
}

#[derive(Debug, Deserialize)]
struct ChapterText {
    chapter: u16,
    verses: Vec<String>,
}

/// In-memory corpus built from the verse text shipped with the app.
#[derive(Debug, Clone, Default)]
pub struct BundledCorpus {
    verses: HashMap<VerseReference, CanonicalVerse>,
}

impl BundledCorpus {
    pub fn load() -> Result<Self> {
        Self::from_json(BUNDLED_VERSES).context("failed to parse bundled verse text")
    }

    /// Build a corpus from JSON shaped like `{"chapters": [{"chapter": 1, "verses": [...]}]}`.
    pub fn from_json(raw: &str) -> Result<Self> {
        let file: CorpusFile = serde_json::from_str(raw)?;
        let mut verses = HashMap::new();

        for chapter in file.chapters {
            for (index, text) in chapter.verses.iter().enumerate() {
                let number = u16::try_from(index + 1).with_context(|| {
                    format!("chapter {} has too many verses", chapter.chapter)
                })?;
                let reference = VerseReference::new(chapter.chapter, number);
                verses.insert(reference, CanonicalVerse::from_text(reference, text));
            }
        }

        Ok(Self { verses })
    }

    /// Number of loaded verses per chapter, ordered by chapter.
    pub fn loaded_chapters(&self) -> BTreeMap<u16, u16> {
        let mut counts = BTreeMap::new();
        for reference in self.verses.keys() {
            *counts.entry(reference.chapter).or_insert(0) += 1;
        }
        counts
    }

    /// Check loaded text against the chapter table.
    ///
    /// Every chapter that ships text must ship all of it, and no verse may be
    /// empty.
    pub fn verify_integrity(&self) -> Result<()> {
        for (chapter, loaded) in self.loaded_chapters() {
            let Some(expected) = chapters::total_verses(chapter) else {
                bail!("corpus contains text for unknown chapter {chapter}");
            };
            if loaded != expected {
                bail!("chapter {chapter} declares {expected} verses but {loaded} are loaded");
            }
        }

        if let Some(empty) = self.verses.values().find(|v| v.words.is_empty()) {
            bail!("verse {} has no words", empty.reference);
        }

        Ok(())
    }

    pub fn len(&self) -> usize {
        self.verses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.verses.is_empty()
    }
}

impl VerseCorpus for BundledCorpus {
    fn verse(&self, reference: VerseReference) -> Option<CanonicalVerse> {
        self.verses.get(&reference).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_text_passes_integrity_check() {
        let corpus = BundledCorpus::load().unwrap();
        corpus.verify_integrity().unwrap();
        assert_eq!(corpus.len(), 7 + 3 + 3 + 4 + 5 + 6);
    }

    #[test]
    fn basmala_is_tokenized_into_four_words() {
        let corpus = BundledCorpus::load().unwrap();
        let verse = corpus.verse(VerseReference::new(1, 1)).unwrap();
        assert_eq!(
            verse.words,
            vec!["بِسْمِ", "اللَّهِ", "الرَّحْمَٰنِ", "الرَّحِيمِ"]
        );
    }

    #[test]
    fn unknown_verse_is_absent() {
        let corpus = BundledCorpus::load().unwrap();
        assert!(corpus.verse(VerseReference::new(2, 255)).is_none());
        assert!(corpus.verse(VerseReference::new(200, 1)).is_none());
    }

    #[test]
    fn recitable_navigation_skips_chapters_without_text() {
        let corpus = BundledCorpus::load().unwrap();
        assert_eq!(
            corpus.next_recitable_verse(VerseReference::new(1, 6)),
            Some(VerseReference::new(1, 7))
        );
        assert_eq!(
            corpus.next_recitable_verse(VerseReference::new(1, 7)),
            Some(VerseReference::new(103, 1))
        );
        assert_eq!(
            corpus.next_recitable_verse(VerseReference::new(112, 4)),
            Some(VerseReference::new(113, 1))
        );
        assert_eq!(corpus.next_recitable_verse(VerseReference::new(114, 6)), None);
    }

    #[test]
    fn partial_chapter_fails_integrity_check() {
        let corpus = BundledCorpus::from_json(
            r#"{"chapters": [{"chapter": 112, "verses": ["قُلْ هُوَ اللَّهُ أَحَدٌ"]}]}"#,
        )
        .unwrap();
        let err = corpus.verify_integrity().unwrap_err();
        assert!(err.to_string().contains("chapter 112"));
    }

    #[test]
    fn unknown_chapter_fails_integrity_check() {
        let corpus =
            BundledCorpus::from_json(r#"{"chapters": [{"chapter": 115, "verses": ["x"]}]}"#)
                .unwrap();
        assert!(corpus.verify_integrity().is_err());
    }
}
