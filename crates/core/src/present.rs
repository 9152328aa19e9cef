//! View models for rendering characters

use serde::Serialize;

use crate::model::Character;

/// Display-ready projection of a character
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CharacterCard {
    pub id: i64,
    pub name: String,
    pub status_text: String,
    pub status_emoji: String,
    pub status_color: String,
    pub species_text: String,
    pub location_text: String,
    pub episodes_text: String,
    pub image_url: String,
}

impl CharacterCard {
    pub fn from_character(character: &Character) -> Self {
        Self {
            id: character.id,
            name: character.name.clone(),
            status_text: character.status.as_str().to_string(),
            status_emoji: character.status.emoji().to_string(),
            status_color: character.status.color().to_string(),
            species_text: character.display_species(),
            location_text: format!("📍 {}", character.location.name),
            episodes_text: format!("🎬 {} episodes", character.episode_count()),
            image_url: character.image_url.clone(),
        }
    }
}

/// Cards for a whole page, in order
pub fn transform_characters(characters: &[Character]) -> Vec<CharacterCard> {
    characters.iter().map(CharacterCard::from_character).collect()
}
