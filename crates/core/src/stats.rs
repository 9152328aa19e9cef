//! Statistics aggregation over a character collection

use serde::Serialize;
use std::collections::BTreeMap;

use crate::model::Character;
use crate::sort::{sort_characters, SortCriteria, SortField, SortOrder};

/// Number of entries in [`CatalogStatistics::top_characters`]
pub const TOP_CHARACTERS: usize = 5;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CatalogStatistics {
    pub total_characters: usize,
    pub status_distribution: BTreeMap<String, usize>,
    pub species_distribution: BTreeMap<String, usize>,
    pub gender_distribution: BTreeMap<String, usize>,
    /// Mean episode count, rounded to 2 decimal places
    pub avg_episodes: f64,
    /// `(name, episode_count)` pairs, most episodes first
    pub top_characters: Vec<(String, usize)>,
}

/// Divide and round to 2 decimal places, halves away from zero
///
/// Done in integer arithmetic so 0.125 becomes 0.13 regardless of how the
/// quotient would be represented as a float.
pub fn rounded_average(sum: u64, count: u64) -> f64 {
    if count == 0 {
        return 0.0;
    }
    let hundredths = (sum * 200 + count) / (count * 2);
    hundredths as f64 / 100.0
}

fn distribution<'a, I>(labels: I) -> BTreeMap<String, usize>
where
    I: Iterator<Item = &'a str>,
{
    let mut counts = BTreeMap::new();
    for label in labels {
        *counts.entry(label.to_string()).or_insert(0) += 1;
    }
    counts
}

/// Reduce a collection into counts, an average and a top-N ranking
///
/// An empty collection yields the zero-valued statistics.
pub fn calculate_statistics(characters: &[Character]) -> CatalogStatistics {
    if characters.is_empty() {
        return CatalogStatistics::default();
    }

    let total_episodes: u64 = characters.iter().map(|c| c.episode_count() as u64).sum();

    let top_characters = sort_characters(
        characters,
        &SortCriteria::new(SortField::Episodes, SortOrder::Desc),
    )
    .into_iter()
    .take(TOP_CHARACTERS)
    .map(|c| {
        let episodes = c.episode_count();
        (c.name, episodes)
    })
    .collect();

    CatalogStatistics {
        total_characters: characters.len(),
        status_distribution: distribution(characters.iter().map(|c| c.status.as_str())),
        species_distribution: distribution(characters.iter().map(|c| c.species.as_str())),
        gender_distribution: distribution(characters.iter().map(|c| c.gender.as_str())),
        avg_episodes: rounded_average(total_episodes, characters.len() as u64),
        top_characters,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures::character;
    use crate::model::{Gender, Species, Status};

    #[test]
    fn test_empty_collection() {
        let stats = calculate_statistics(&[]);

        assert_eq!(stats.total_characters, 0);
        assert!(stats.status_distribution.is_empty());
        assert!(stats.species_distribution.is_empty());
        assert!(stats.gender_distribution.is_empty());
        assert_eq!(stats.avg_episodes, 0.0);
        assert!(stats.top_characters.is_empty());
    }

    #[test]
    fn test_seven_characters_scenario() {
        let characters: Vec<Character> = (1..=7)
            .map(|n| character(n, &format!("Character {n}"), Status::Alive, n as usize))
            .collect();

        let stats = calculate_statistics(&characters);

        assert_eq!(stats.total_characters, 7);
        assert_eq!(stats.avg_episodes, 4.0);
        assert_eq!(stats.top_characters.len(), 5);
        assert_eq!(stats.top_characters[0], ("Character 7".to_string(), 7));
        assert_eq!(stats.top_characters[4], ("Character 3".to_string(), 3));
    }

    #[test]
    fn test_top_characters_ties_keep_input_order() {
        let characters = vec![
            character(1, "Beth", Status::Alive, 2),
            character(2, "Jerry", Status::Alive, 9),
            character(3, "Summer", Status::Alive, 2),
        ];

        let stats = calculate_statistics(&characters);

        assert_eq!(
            stats.top_characters,
            vec![
                ("Jerry".to_string(), 9),
                ("Beth".to_string(), 2),
                ("Summer".to_string(), 2),
            ]
        );
    }

    #[test]
    fn test_distributions() {
        let mut squanchy = character(3, "Squanchy", Status::Unknown, 1);
        squanchy.species = Species::Alien;
        squanchy.gender = Gender::Unknown;
        let characters = vec![
            character(1, "Rick", Status::Alive, 1),
            character(2, "Morty", Status::Alive, 1),
            squanchy,
            character(4, "Ghost", Status::Dead, 1),
        ];

        let stats = calculate_statistics(&characters);

        assert_eq!(stats.status_distribution.get("Alive"), Some(&2));
        assert_eq!(stats.status_distribution.get("Dead"), Some(&1));
        assert_eq!(stats.status_distribution.get("unknown"), Some(&1));
        assert_eq!(stats.species_distribution.get("Human"), Some(&3));
        assert_eq!(stats.species_distribution.get("Alien"), Some(&1));
        assert_eq!(stats.gender_distribution.get("Male"), Some(&3));
        assert_eq!(stats.gender_distribution.get("unknown"), Some(&1));
        assert_eq!(stats.status_distribution.values().sum::<usize>(), 4);
    }

    #[test]
    fn test_rounding_halves_away_from_zero() {
        assert_eq!(rounded_average(1, 8), 0.13);
        assert_eq!(rounded_average(3, 8), 0.38);
        assert_eq!(rounded_average(5, 3), 1.67);
        assert_eq!(rounded_average(4, 3), 1.33);
        assert_eq!(rounded_average(28, 7), 4.0);
        assert_eq!(rounded_average(0, 5), 0.0);
        assert_eq!(rounded_average(3, 0), 0.0);
    }

    #[test]
    fn test_average_of_fractional_counts() {
        let characters = vec![
            character(1, "a", Status::Alive, 1),
            character(2, "b", Status::Alive, 0),
            character(3, "c", Status::Alive, 0),
        ];
        assert_eq!(calculate_statistics(&characters).avg_episodes, 0.33);
    }
}
