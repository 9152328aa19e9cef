//! Domain model for the character directory
//!
//! Enumerations decode leniently: any label outside the known set maps to
//! `Unknown` instead of failing, because upstream data is not validated.

use chrono::{DateTime, FixedOffset};
use serde::Serialize;
use std::fmt;

/// Life status of a character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Status {
    #[serde(rename = "Alive")]
    Alive,
    #[serde(rename = "Dead")]
    Dead,
    #[serde(rename = "unknown")]
    Unknown,
}

impl Status {
    pub const ALL: [Status; 3] = [Status::Alive, Status::Dead, Status::Unknown];

    /// Canonical label, as used by the remote API
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Alive => "Alive",
            Status::Dead => "Dead",
            Status::Unknown => "unknown",
        }
    }

    /// Case-insensitive, whitespace-tolerant coercion. Never fails.
    pub fn from_label(value: &str) -> Self {
        let value = value.trim();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(value))
            .unwrap_or(Status::Unknown)
    }

    /// Emoji marker used by list and card rendering
    pub fn emoji(&self) -> &'static str {
        match self {
            Status::Alive => "🟢",
            Status::Dead => "🔴",
            Status::Unknown => "⚪",
        }
    }

    /// Hex color used by card rendering
    pub fn color(&self) -> &'static str {
        match self {
            Status::Alive => "#4CAF50",
            Status::Dead => "#f44336",
            Status::Unknown => "#9E9E9E",
        }
    }
}

/// Gender of a character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Gender {
    #[serde(rename = "Male")]
    Male,
    #[serde(rename = "Female")]
    Female,
    #[serde(rename = "Genderless")]
    Genderless,
    #[serde(rename = "unknown")]
    Unknown,
}

impl Gender {
    pub const ALL: [Gender; 4] = [
        Gender::Male,
        Gender::Female,
        Gender::Genderless,
        Gender::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Genderless => "Genderless",
            Gender::Unknown => "unknown",
        }
    }

    pub fn from_label(value: &str) -> Self {
        let value = value.trim();
        Self::ALL
            .into_iter()
            .find(|gender| gender.as_str().eq_ignore_ascii_case(value))
            .unwrap_or(Gender::Unknown)
    }
}

/// Species of a character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Species {
    #[serde(rename = "Human")]
    Human,
    #[serde(rename = "Alien")]
    Alien,
    #[serde(rename = "Humanoid")]
    Humanoid,
    #[serde(rename = "Robot")]
    Robot,
    #[serde(rename = "Animal")]
    Animal,
    #[serde(rename = "unknown")]
    Unknown,
}

impl Species {
    pub const ALL: [Species; 6] = [
        Species::Human,
        Species::Alien,
        Species::Humanoid,
        Species::Robot,
        Species::Animal,
        Species::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Species::Human => "Human",
            Species::Alien => "Alien",
            Species::Humanoid => "Humanoid",
            Species::Robot => "Robot",
            Species::Animal => "Animal",
            Species::Unknown => "unknown",
        }
    }

    pub fn from_label(value: &str) -> Self {
        let value = value.trim();
        Self::ALL
            .into_iter()
            .find(|species| species.as_str().eq_ignore_ascii_case(value))
            .unwrap_or(Species::Unknown)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Origin or last known location of a character
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Location {
    pub name: String,
    pub url: String,
}

impl Location {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }

    /// Identifier embedded in the trailing segment of `url`, if any
    pub fn id(&self) -> Option<i64> {
        crate::parser::extract_id_from_url(&self.url)
    }
}

/// A character from the directory
///
/// Built exclusively by [`crate::parser::parse_character`] and never mutated
/// afterwards. Episode count, liveness and the species label are derived on
/// read from the stored fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Character {
    pub id: i64,
    pub name: String,
    pub status: Status,
    pub species: Species,
    #[serde(rename = "type")]
    pub kind: String,
    pub gender: Gender,
    pub origin: Location,
    pub location: Location,
    pub image_url: String,
    pub episode_ids: Vec<i64>,
    pub url: String,
    pub created: Option<DateTime<FixedOffset>>,
}

impl Character {
    pub fn episode_count(&self) -> usize {
        self.episode_ids.len()
    }

    pub fn is_alive(&self) -> bool {
        self.status == Status::Alive
    }

    /// Species label with the free-text subtype appended when present
    pub fn display_species(&self) -> String {
        if self.kind.is_empty() {
            self.species.as_str().to_string()
        } else {
            format!("{} ({})", self.species, self.kind)
        }
    }
}

impl fmt::Display for Character {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} - {}",
            self.status.emoji(),
            self.name,
            self.display_species()
        )
    }
}

/// Pagination block (`info`) of a list payload
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub count: u64,
    pub pages: u64,
    pub next: Option<String>,
    pub prev: Option<String>,
}
