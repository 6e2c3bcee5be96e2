//! Character Catalog
//!
//! Static reference data mapping classifier indices and characters to display
//! metadata (pinyin, meaning, stroke count, examples). Read-only; the
//! recognition core never mutates it.

mod data;

use std::collections::HashMap;

/// Number of character classes in the reference classifier output.
pub const MODEL_CLASS_COUNT: usize = 3755;

/// Display metadata for a single character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterRecord {
    pub character: char,
    pub pinyin: &'static str,
    pub meaning: &'static str,
    pub stroke_count: u8,
    /// Example words using this character
    pub examples: &'static [&'static str],
    pub radical: &'static str,
    pub etymology: Option<&'static str>,
    pub pronunciation_tips: Option<&'static str>,
    pub mnemonics: Option<&'static str>,
}

/// Catalog of common Chinese characters, keyed by class index and by character.
pub struct CharacterCatalog {
    by_character: HashMap<char, &'static CharacterRecord>,
}

impl CharacterCatalog {
    pub fn new() -> Self {
        let by_character = data::COMMON_CHARACTERS
            .iter()
            .map(|record| (record.character, record))
            .collect();

        Self { by_character }
    }

    /// Total number of classes the prediction vector covers.
    ///
    /// Larger than the reference table; indices beyond it resolve to the
    /// fallback record.
    pub fn class_count(&self) -> usize {
        MODEL_CLASS_COUNT
    }

    /// Number of characters with full reference metadata.
    pub fn record_count(&self) -> usize {
        data::COMMON_CHARACTERS.len()
    }

    /// Resolve a class index to its character record.
    ///
    /// Total: out-of-range indices yield a fixed placeholder record rather
    /// than an error, so ranking never fails on an unmapped class.
    pub fn resolve(&self, index: usize) -> &'static CharacterRecord {
        data::CLASS_CHARACTERS
            .get(index)
            .and_then(|c| self.by_character.get(c).copied())
            .unwrap_or(&data::FALLBACK_RECORD)
    }

    /// Look up a character's record by its glyph.
    pub fn lookup(&self, character: char) -> Option<&'static CharacterRecord> {
        self.by_character.get(&character).copied()
    }

    /// Find characters whose pinyin contains the given fragment.
    pub fn search_by_pinyin(&self, pinyin: &str) -> Vec<&'static CharacterRecord> {
        let needle = pinyin.to_lowercase();
        data::COMMON_CHARACTERS
            .iter()
            .filter(|r| r.pinyin.to_lowercase().contains(&needle))
            .collect()
    }

    /// Find characters whose meaning contains the given fragment.
    pub fn search_by_meaning(&self, meaning: &str) -> Vec<&'static CharacterRecord> {
        let needle = meaning.to_lowercase();
        data::COMMON_CHARACTERS
            .iter()
            .filter(|r| r.meaning.to_lowercase().contains(&needle))
            .collect()
    }

    /// The `n` most common characters, in frequency order.
    pub fn most_common(&self, n: usize) -> &'static [CharacterRecord] {
        &data::COMMON_CHARACTERS[..n.min(data::COMMON_CHARACTERS.len())]
    }
}

impl Default for CharacterCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_index_resolution() {
        let catalog = CharacterCatalog::new();
        let expected = ['人', '大', '小', '山', '水', '木', '火', '土', '日', '月'];

        for (index, &character) in expected.iter().enumerate() {
            assert_eq!(catalog.resolve(index).character, character);
        }
    }

    #[test]
    fn test_out_of_range_index_is_deterministic() {
        let catalog = CharacterCatalog::new();
        let a = catalog.resolve(1234);
        let b = catalog.resolve(MODEL_CLASS_COUNT + 1);

        assert_eq!(a.character, '□');
        assert_eq!(a, b);
    }

    #[test]
    fn test_lookup_by_character() {
        let catalog = CharacterCatalog::new();

        let record = catalog.lookup('水').expect("水 should be in the catalog");
        assert_eq!(record.pinyin, "shuǐ");
        assert_eq!(record.stroke_count, 4);

        assert!(catalog.lookup('饕').is_none());
    }

    #[test]
    fn test_characters_are_unique() {
        let catalog = CharacterCatalog::new();
        // Duplicate characters would collapse in the map
        assert_eq!(catalog.by_character.len(), catalog.record_count());
    }

    #[test]
    fn test_search_by_pinyin() {
        let catalog = CharacterCatalog::new();
        let hits = catalog.search_by_pinyin("sh");
        assert!(hits.iter().any(|r| r.character == '水'));
        assert!(hits.iter().any(|r| r.character == '山'));
        assert!(hits.iter().all(|r| r.pinyin.starts_with("sh")));
    }

    #[test]
    fn test_search_by_meaning() {
        let catalog = CharacterCatalog::new();
        let hits = catalog.search_by_meaning("fire");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].character, '火');
    }

    #[test]
    fn test_most_common_is_clamped() {
        let catalog = CharacterCatalog::new();
        assert_eq!(catalog.most_common(3).len(), 3);
        assert_eq!(
            catalog.most_common(10_000).len(),
            catalog.record_count()
        );
    }
}
