//! Sort engine

use serde::Serialize;
use std::cmp::Ordering;

use crate::model::Character;

/// Key a collection can be ordered by
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    #[default]
    Id,
    Name,
    Status,
    Episodes,
}

impl SortField {
    /// Resolve a user-supplied key. Unrecognized keys order by id.
    pub fn from_key(key: &str) -> Self {
        match key.trim().to_ascii_lowercase().as_str() {
            "name" => SortField::Name,
            "status" => SortField::Status,
            "episodes" | "episode" | "episode_count" | "episode-count" => SortField::Episodes,
            _ => SortField::Id,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// "desc"/"descending" sort descending, anything else ascending
    pub fn from_key(key: &str) -> Self {
        match key.trim().to_ascii_lowercase().as_str() {
            "desc" | "descending" => SortOrder::Desc,
            _ => SortOrder::Asc,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SortCriteria {
    pub field: SortField,
    pub order: SortOrder,
}

impl SortCriteria {
    pub fn new(field: SortField, order: SortOrder) -> Self {
        Self { field, order }
    }
}

fn compare_by(field: SortField, a: &Character, b: &Character) -> Ordering {
    match field {
        SortField::Id => a.id.cmp(&b.id),
        SortField::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        SortField::Status => a.status.as_str().cmp(b.status.as_str()),
        SortField::Episodes => a.episode_count().cmp(&b.episode_count()),
    }
}

/// Return a stably sorted copy of `characters`
///
/// Characters with equal keys keep their input order in both directions.
pub fn sort_characters(characters: &[Character], criteria: &SortCriteria) -> Vec<Character> {
    let mut sorted = characters.to_vec();

    match criteria.order {
        SortOrder::Asc => sorted.sort_by(|a, b| compare_by(criteria.field, a, b)),
        SortOrder::Desc => sorted.sort_by(|a, b| compare_by(criteria.field, b, a)),
    }

    sorted
}
