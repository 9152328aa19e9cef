use catalog_core::model::Character;
use std::collections::HashMap;

/// In-memory map of characters fetched during this run, keyed by id
///
/// Lives only for the process lifetime and is handed to the catalog service
/// by mutable reference.
#[derive(Debug, Default)]
pub struct CharacterCache {
    entries: HashMap<i64, Character>,
}

impl CharacterCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: i64) -> Option<&Character> {
        self.entries.get(&id)
    }

    /// Insert or replace the entry for `character.id`
    pub fn insert(&mut self, character: Character) {
        self.entries.insert(character.id, character);
    }

    pub fn extend<I>(&mut self, characters: I)
    where
        I: IntoIterator<Item = Character>,
    {
        for character in characters {
            self.insert(character);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_core::parser::parse_character;
    use serde_json::json;

    fn character(id: i64, name: &str) -> Character {
        parse_character(&json!({"id": id, "name": name})).unwrap()
    }

    #[test]
    fn test_insert_and_get() {
        let mut cache = CharacterCache::new();
        assert!(cache.is_empty());

        cache.insert(character(1, "Rick Sanchez"));

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(1).map(|c| c.name.as_str()), Some("Rick Sanchez"));
        assert!(cache.get(2).is_none());
    }

    #[test]
    fn test_insert_replaces_same_id() {
        let mut cache = CharacterCache::new();
        cache.extend([character(1, "Rick"), character(2, "Morty"), character(1, "Evil Rick")]);

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get(1).unwrap().name, "Evil Rick");
    }
}
