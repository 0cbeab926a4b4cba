//! Canonical verse text and chapter navigation.

mod bundled;
pub mod chapters;

pub use bundled::BundledCorpus;
pub use chapters::{ChapterMeta, RevelationPlace, CHAPTER_COUNT};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "camelCase")]
pub struct VerseReference {
    pub chapter: u16,
    pub verse: u16,
}

impl VerseReference {
    pub const fn new(chapter: u16, verse: u16) -> Self {
        Self { chapter, verse }
    }
}

impl std::fmt::Display for VerseReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.chapter, self.verse)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalVerse {
    pub reference: VerseReference,
    pub words: Vec<String>,
}

impl CanonicalVerse {
    pub fn from_text(reference: VerseReference, text: &str) -> Self {
        Self {
            reference,
            words: text.split_whitespace().map(str::to_string).collect(),
        }
    }

    pub fn text(&self) -> String {
        self.words.join(" ")
    }
}

/// Read-only source of verse text and chapter layout.
///
/// Navigation and progress are derived from [`ChapterMeta::total_verses`], so
/// they work for chapters whose text is not loaded.
pub trait VerseCorpus: Send + Sync {
    fn verse(&self, reference: VerseReference) -> Option<CanonicalVerse>;

    fn chapter_meta(&self, chapter: u16) -> Option<ChapterMeta> {
        chapters::chapter_meta(chapter)
    }

    fn next_verse(&self, reference: VerseReference) -> Option<VerseReference> {
        let total = self.chapter_meta(reference.chapter)?.total_verses;
        if reference.verse == 0 || reference.verse > total {
            return None;
        }
        if reference.verse < total {
            return Some(VerseReference::new(reference.chapter, reference.verse + 1));
        }
        let next_chapter = reference.chapter + 1;
        self.chapter_meta(next_chapter)
            .map(|_| VerseReference::new(next_chapter, 1))
    }

    /// The next verse after `reference` whose text is loaded, skipping
    /// chapters that ship metadata only.
    fn next_recitable_verse(&self, reference: VerseReference) -> Option<VerseReference> {
        let mut candidate = self.next_verse(reference)?;
        while self.verse(candidate).is_none() {
            candidate = self.next_verse(candidate)?;
        }
        Some(candidate)
    }

    fn previous_verse(&self, reference: VerseReference) -> Option<VerseReference> {
        let total = self.chapter_meta(reference.chapter)?.total_verses;
        if reference.verse == 0 || reference.verse > total {
            return None;
        }
        if reference.verse > 1 {
            return Some(VerseReference::new(reference.chapter, reference.verse - 1));
        }
        let previous_chapter = reference.chapter.checked_sub(1)?;
        self.chapter_meta(previous_chapter)
            .map(|meta| VerseReference::new(previous_chapter, meta.total_verses))
    }

    /// Percent of the chapter covered once `reference` has been recited.
    fn chapter_progress(&self, reference: VerseReference) -> Option<f64> {
        let total = self.chapter_meta(reference.chapter)?.total_verses;
        if reference.verse == 0 || reference.verse > total {
            return None;
        }
        Some(f64::from(reference.verse) * 100.0 / f64::from(total))
    }

    fn is_last_verse(&self, reference: VerseReference) -> bool {
        self.chapter_meta(reference.chapter)
            .map(|meta| meta.total_verses == reference.verse)
            .unwrap_or(false)
    }
}
