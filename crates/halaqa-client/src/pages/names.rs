//! The Names of Allah study page. Static content, no store table.

use std::cmp::Ordering;

use halaqa_list::{FilterSet, Flagged, ListRecord, Selection, SortKey, order};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DivineName {
    pub id: String,
    pub number: u16,
    pub arabic: String,
    pub transliteration: String,
    pub meaning: String,
    #[serde(default)]
    pub favorite: bool,
}

#[derive(Debug, Clone, Default)]
pub struct NameFilters {
    pub favorites_only: Selection<bool>,
}

impl FilterSet<DivineName> for NameFilters {
    fn admits(&self, item: &DivineName) -> bool {
        self.favorites_only.admits(&item.favorite)
    }
}

sort_keys! {
    NameSort {
        Number => "number",
        Alphabetical => "alphabetical",
    }
}

impl SortKey<DivineName> for NameSort {
    fn compare(self, a: &DivineName, b: &DivineName) -> Ordering {
        match self {
            Self::Number => order::ascending(a.number, b.number),
            Self::Alphabetical => order::alphabetical(&a.transliteration, &b.transliteration),
        }
    }
}

impl ListRecord for DivineName {
    type Id = String;
    type Filters = NameFilters;
    type Sort = NameSort;

    fn id(&self) -> &String {
        &self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.arabic.as_str(), self.transliteration.as_str(), self.meaning.as_str()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameFlag {
    Favorite,
}

impl Flagged for DivineName {
    type Flag = NameFlag;

    fn toggle(&mut self, flag: NameFlag) {
        match flag {
            NameFlag::Favorite => self.favorite = !self.favorite,
        }
    }
}

const SEED: &[(u16, &str, &str, &str)] = &[
    (1, "الرحمن", "Ar-Rahman", "The Most Compassionate"),
    (2, "الرحيم", "Ar-Rahim", "The Most Merciful"),
    (3, "الملك", "Al-Malik", "The King"),
    (4, "القدوس", "Al-Quddus", "The Most Holy"),
    (5, "السلام", "As-Salam", "The Source of Peace"),
    (6, "المؤمن", "Al-Mu'min", "The Granter of Security"),
    (7, "المهيمن", "Al-Muhaymin", "The Guardian"),
    (8, "العزيز", "Al-Aziz", "The Almighty"),
    (9, "الجبار", "Al-Jabbar", "The Compeller"),
    (10, "المتكبر", "Al-Mutakabbir", "The Supreme"),
    (11, "الخالق", "Al-Khaliq", "The Creator"),
    (12, "البارئ", "Al-Bari", "The Originator"),
    (13, "المصور", "Al-Musawwir", "The Fashioner"),
    (14, "الغفار", "Al-Ghaffar", "The Ever Forgiving"),
    (15, "القهار", "Al-Qahhar", "The Subduer"),
];

/// The page's built-in collection, in traditional order.
pub fn seed() -> Vec<DivineName> {
    SEED.iter()
        .map(|&(number, arabic, transliteration, meaning)| DivineName {
            id: format!("name-{number}"),
            number,
            arabic: arabic.to_owned(),
            transliteration: transliteration.to_owned(),
            meaning: meaning.to_owned(),
            favorite: false,
        })
        .collect()
}
