//! Filter engine
//!
//! Every criterion that is set contributes one predicate; a character
//! survives when it satisfies all of them. Input order is preserved and the
//! input slice is never modified.

use serde::Serialize;

use crate::model::{Character, Gender, Species, Status};

/// Optional filtering criteria. All fields unset means "match everything".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterCriteria {
    /// Case-insensitive substring of the character name
    pub name: Option<String>,
    pub status: Option<Status>,
    pub species: Option<Species>,
    pub gender: Option<Gender>,
    /// Inclusive lower bound on the episode count
    pub min_episodes: Option<usize>,
    /// Inclusive upper bound on the episode count
    pub max_episodes: Option<usize>,
}

impl FilterCriteria {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.status.is_none()
            && self.species.is_none()
            && self.gender.is_none()
            && self.min_episodes.is_none()
            && self.max_episodes.is_none()
    }

    pub fn has_episode_bounds(&self) -> bool {
        self.min_episodes.is_some() || self.max_episodes.is_some()
    }

    /// Criteria the remote API cannot evaluate (episode-count bounds only)
    pub fn episode_bounds(&self) -> FilterCriteria {
        FilterCriteria {
            min_episodes: self.min_episodes,
            max_episodes: self.max_episodes,
            ..FilterCriteria::default()
        }
    }

    /// Query parameters understood by the remote API
    ///
    /// Episode bounds have no API counterpart and are left out, as is an
    /// empty name.
    pub fn to_api_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();

        if let Some(name) = self.name.as_deref().filter(|name| !name.is_empty()) {
            params.push(("name".to_string(), name.to_string()));
        }
        if let Some(status) = self.status {
            params.push(("status".to_string(), status.as_str().to_string()));
        }
        if let Some(species) = self.species {
            params.push(("species".to_string(), species.as_str().to_string()));
        }
        if let Some(gender) = self.gender {
            params.push(("gender".to_string(), gender.as_str().to_string()));
        }

        params
    }

    /// Whether a single character satisfies every set criterion
    pub fn matches(&self, character: &Character) -> bool {
        if let Some(name) = &self.name {
            if !character
                .name
                .to_lowercase()
                .contains(&name.to_lowercase())
            {
                return false;
            }
        }
        if self.status.is_some_and(|status| character.status != status) {
            return false;
        }
        if self.species.is_some_and(|species| character.species != species) {
            return false;
        }
        if self.gender.is_some_and(|gender| character.gender != gender) {
            return false;
        }
        if self
            .min_episodes
            .is_some_and(|min| character.episode_count() < min)
        {
            return false;
        }
        if self
            .max_episodes
            .is_some_and(|max| character.episode_count() > max)
        {
            return false;
        }
        true
    }
}

/// Return the characters matching `criteria`, in their original order
pub fn filter_characters(characters: &[Character], criteria: &FilterCriteria) -> Vec<Character> {
    if criteria.is_empty() {
        return characters.to_vec();
    }

    characters
        .iter()
        .filter(|character| criteria.matches(character))
        .cloned()
        .collect()
}
