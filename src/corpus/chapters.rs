//! Static chapter table: verse counts, revelation order and names.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum RevelationPlace {
    Meccan,
    Medinan,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChapterMeta {
    pub number: u16,
    pub total_verses: u16,
    pub revelation_order: u16,
    pub name: String,
    pub revelation_place: RevelationPlace,
}

pub const CHAPTER_COUNT: u16 = 114;

use RevelationPlace::{Meccan as MC, Medinan as MD};

/// (total verses, revelation order, place, transliterated name), indexed by
/// chapter number minus one.
const CHAPTERS: [(u16, u16, RevelationPlace, &str); CHAPTER_COUNT as usize] = [
    (7, 5, MC, "Al-Fatihah"),
    (286, 87, MD, "Al-Baqarah"),
    (200, 89, MD, "Ali 'Imran"),
    (176, 92, MD, "An-Nisa"),
    (120, 112, MD, "Al-Ma'idah"),
    (165, 55, MC, "Al-An'am"),
    (206, 39, MC, "Al-A'raf"),
    (75, 88, MD, "Al-Anfal"),
    (129, 113, MD, "At-Tawbah"),
    (109, 51, MC, "Yunus"),
    (123, 52, MC, "Hud"),
    (111, 53, MC, "Yusuf"),
    (43, 96, MD, "Ar-Ra'd"),
    (52, 72, MC, "Ibrahim"),
    (99, 54, MC, "Al-Hijr"),
    (128, 70, MC, "An-Nahl"),
    (111, 50, MC, "Al-Isra"),
    (110, 69, MC, "Al-Kahf"),
    (98, 44, MC, "Maryam"),
    (135, 45, MC, "Taha"),
    (112, 73, MC, "Al-Anbya"),
    (78, 103, MD, "Al-Hajj"),
    (118, 74, MC, "Al-Mu'minun"),
    (64, 102, MD, "An-Nur"),
    (77, 42, MC, "Al-Furqan"),
    (227, 47, MC, "Ash-Shu'ara"),
    (93, 48, MC, "An-Naml"),
    (88, 49, MC, "Al-Qasas"),
    (69, 85, MC, "Al-'Ankabut"),
    (60, 84, MC, "Ar-Rum"),
    (34, 57, MC, "Luqman"),
    (30, 75, MC, "As-Sajdah"),
    (73, 90, MD, "Al-Ahzab"),
    (54, 58, MC, "Saba"),
    (45, 43, MC, "Fatir"),
    (83, 41, MC, "Ya-Sin"),
    (182, 56, MC, "As-Saffat"),
    (88, 38, MC, "Sad"),
    (75, 59, MC, "Az-Zumar"),
    (85, 60, MC, "Ghafir"),
    (54, 61, MC, "Fussilat"),
    (53, 62, MC, "Ash-Shuraa"),
    (89, 63, MC, "Az-Zukhruf"),
    (59, 64, MC, "Ad-Dukhan"),
    (37, 65, MC, "Al-Jathiyah"),
    (35, 66, MC, "Al-Ahqaf"),
    (38, 95, MD, "Muhammad"),
    (29, 111, MD, "Al-Fath"),
    (18, 106, MD, "Al-Hujurat"),
    (45, 34, MC, "Qaf"),
    (60, 67, MC, "Adh-Dhariyat"),
    (49, 76, MC, "At-Tur"),
    (62, 23, MC, "An-Najm"),
    (55, 37, MC, "Al-Qamar"),
    (78, 97, MD, "Ar-Rahman"),
    (96, 46, MC, "Al-Waqi'ah"),
    (29, 94, MD, "Al-Hadid"),
    (22, 105, MD, "Al-Mujadila"),
    (24, 101, MD, "Al-Hashr"),
    (13, 91, MD, "Al-Mumtahanah"),
    (14, 109, MD, "As-Saf"),
    (11, 110, MD, "Al-Jumu'ah"),
    (11, 104, MD, "Al-Munafiqun"),
    (18, 108, MD, "At-Taghabun"),
    (12, 99, MD, "At-Talaq"),
    (12, 107, MD, "At-Tahrim"),
    (30, 77, MC, "Al-Mulk"),
    (52, 2, MC, "Al-Qalam"),
    (52, 78, MC, "Al-Haqqah"),
    (44, 79, MC, "Al-Ma'arij"),
    (28, 71, MC, "Nuh"),
    (28, 40, MC, "Al-Jinn"),
    (20, 3, MC, "Al-Muzzammil"),
    (56, 4, MC, "Al-Muddaththir"),
    (40, 31, MC, "Al-Qiyamah"),
    (31, 98, MD, "Al-Insan"),
    (50, 33, MC, "Al-Mursalat"),
    (40, 80, MC, "An-Naba"),
    (46, 81, MC, "An-Nazi'at"),
    (42, 24, MC, "'Abasa"),
    (29, 7, MC, "At-Takwir"),
    (19, 82, MC, "Al-Infitar"),
    (36, 86, MC, "Al-Mutaffifin"),
    (25, 83, MC, "Al-Inshiqaq"),
    (22, 27, MC, "Al-Buruj"),
    (17, 36, MC, "At-Tariq"),
    (19, 8, MC, "Al-A'la"),
    (26, 68, MC, "Al-Ghashiyah"),
    (30, 10, MC, "Al-Fajr"),
    (20, 35, MC, "Al-Balad"),
    (15, 26, MC, "Ash-Shams"),
    (21, 9, MC, "Al-Layl"),
    (11, 11, MC, "Ad-Duhaa"),
    (8, 12, MC, "Ash-Sharh"),
    (8, 28, MC, "At-Tin"),
    (19, 1, MC, "Al-'Alaq"),
    (5, 25, MC, "Al-Qadr"),
    (8, 100, MD, "Al-Bayyinah"),
    (8, 93, MD, "Az-Zalzalah"),
    (11, 14, MC, "Al-'Adiyat"),
    (11, 30, MC, "Al-Qari'ah"),
    (8, 16, MC, "At-Takathur"),
    (3, 13, MC, "Al-'Asr"),
    (9, 32, MC, "Al-Humazah"),
    (5, 19, MC, "Al-Fil"),
    (4, 29, MC, "Quraysh"),
    (7, 17, MC, "Al-Ma'un"),
    (3, 15, MC, "Al-Kawthar"),
    (6, 18, MC, "Al-Kafirun"),
    (3, 114, MD, "An-Nasr"),
    (5, 6, MC, "Al-Masad"),
    (4, 22, MC, "Al-Ikhlas"),
    (5, 20, MC, "Al-Falaq"),
    (6, 21, MC, "An-Nas"),
];

/// Verse count for `chapter`, or `None` outside `1..=114`.
pub fn total_verses(chapter: u16) -> Option<u16> {
    index(chapter).map(|i| CHAPTERS[i].0)
}

pub fn chapter_meta(chapter: u16) -> Option<ChapterMeta> {
    index(chapter).map(|i| {
        let (total_verses, revelation_order, revelation_place, name) = CHAPTERS[i];
        ChapterMeta {
            number: chapter,
            total_verses,
            revelation_order,
            name: name.to_string(),
            revelation_place,
        }
    })
}

fn index(chapter: u16) -> Option<usize> {
    (1..=CHAPTER_COUNT)
        .contains(&chapter)
        .then(|| usize::from(chapter - 1))
}
