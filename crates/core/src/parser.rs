//! Record parser
//!
//! Turns raw JSON records from the character API into [`Character`] values.
//! Only `id` and `name` are mandatory; every other field degrades to a
//! default instead of failing the record.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::model::{Character, Gender, Location, Pagination, Species, Status};

/// Location name used when a record carries no usable name
pub const UNKNOWN_LOCATION: &str = "Unknown";

/// Error raised when a record cannot become a character
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize)]
pub enum ParseError {
    #[error("Record is not a JSON object")]
    NotAnObject,

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid value for field {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },
}

/// A record of a batch that failed to parse
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedRecord {
    /// Position of the record inside `results`
    pub index: usize,
    pub error: ParseError,
}

/// Result of parsing a full list payload
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParsedBatch {
    pub characters: Vec<Character>,
    pub pagination: Pagination,
    /// Records dropped from `characters`, for the caller to report
    pub skipped: Vec<SkippedRecord>,
}

/// Extract the integer id from the trailing path segment of a URL
///
/// "https://host/api/episode/28/" -> Some(28). Empty, non-numeric or
/// slash-only inputs yield `None`.
pub fn extract_id_from_url(url: &str) -> Option<i64> {
    let trimmed = url.trim_end_matches('/');
    if trimmed.is_empty() {
        return None;
    }
    trimmed.rsplit('/').next()?.trim().parse::<i64>().ok()
}

/// Extract ids from a list of URLs, dropping entries that do not parse
pub fn extract_ids_from_urls<'a, I>(urls: I) -> Vec<i64>
where
    I: IntoIterator<Item = &'a Value>,
{
    urls.into_iter()
        .filter_map(Value::as_str)
        .filter_map(extract_id_from_url)
        .collect()
}

const OFFSET_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M%z",
];

const NAIVE_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

/// Parse an ISO-8601 style timestamp, returning `None` on any failure
///
/// A trailing `Z` is rewritten to `+00:00`. Offsets may omit the colon
/// (`+0200`) and seconds may be omitted. Timestamps without an offset and
/// bare dates are read as UTC.
pub fn parse_timestamp(input: &str) -> Option<DateTime<FixedOffset>> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    let normalized = match input.strip_suffix(['Z', 'z']) {
        Some(rest) => format!("{rest}+00:00"),
        None => input.to_string(),
    };

    if let Ok(dt) = DateTime::parse_from_rfc3339(&normalized) {
        return Some(dt);
    }

    for format in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(&normalized, format) {
            return Some(dt);
        }
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, format) {
            return Some(naive.and_utc().fixed_offset());
        }
    }

    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc().fixed_offset())
}

fn text_field(record: &Map<String, Value>, key: &str) -> String {
    record
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn label_field<'a>(record: &'a Map<String, Value>, key: &str) -> &'a str {
    record
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or("unknown")
}

fn parse_location(value: Option<&Value>) -> Location {
    let Some(object) = value.and_then(Value::as_object) else {
        return Location::new(UNKNOWN_LOCATION, "");
    };

    Location {
        name: object
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or(UNKNOWN_LOCATION)
            .to_string(),
        url: text_field(object, "url"),
    }
}

fn required<'a>(
    record: &'a Map<String, Value>,
    field: &'static str,
) -> Result<&'a Value, ParseError> {
    match record.get(field) {
        None | Some(Value::Null) => Err(ParseError::MissingField(field)),
        Some(value) => Ok(value),
    }
}

fn parse_id(value: &Value) -> Result<i64, ParseError> {
    match value {
        Value::Number(number) => number.as_i64().ok_or_else(|| ParseError::InvalidField {
            field: "id",
            reason: format!("{number} is not an integer"),
        }),
        Value::String(text) => text
            .trim()
            .parse::<i64>()
            .map_err(|_| ParseError::InvalidField {
                field: "id",
                reason: format!("{text:?} is not an integer"),
            }),
        other => Err(ParseError::InvalidField {
            field: "id",
            reason: format!("expected an integer, got {other}"),
        }),
    }
}

/// Parse a single raw record into a [`Character`]
///
/// Fails only when the record is not an object or when `id` or `name` are
/// missing or unusable.
pub fn parse_character(record: &Value) -> Result<Character, ParseError> {
    let record = record.as_object().ok_or(ParseError::NotAnObject)?;

    let id = parse_id(required(record, "id")?)?;
    let name = required(record, "name")?
        .as_str()
        .ok_or_else(|| ParseError::InvalidField {
            field: "name",
            reason: "expected a string".to_string(),
        })?
        .to_string();

    let episode_ids = record
        .get("episode")
        .and_then(Value::as_array)
        .map(|urls| extract_ids_from_urls(urls))
        .unwrap_or_default();

    let created = record
        .get("created")
        .and_then(Value::as_str)
        .and_then(parse_timestamp);

    Ok(Character {
        id,
        name,
        status: Status::from_label(label_field(record, "status")),
        species: Species::from_label(label_field(record, "species")),
        kind: text_field(record, "type"),
        gender: Gender::from_label(label_field(record, "gender")),
        origin: parse_location(record.get("origin")),
        location: parse_location(record.get("location")),
        image_url: text_field(record, "image"),
        episode_ids,
        url: text_field(record, "url"),
        created,
    })
}

/// Parse the `info` block of a list payload
pub fn parse_pagination(info: Option<&Value>) -> Pagination {
    let Some(info) = info.and_then(Value::as_object) else {
        return Pagination::default();
    };

    let link = |key: &str| info.get(key).and_then(Value::as_str).map(str::to_string);

    Pagination {
        count: info.get("count").and_then(Value::as_u64).unwrap_or(0),
        pages: info.get("pages").and_then(Value::as_u64).unwrap_or(0),
        next: link("next"),
        prev: link("prev"),
    }
}

/// Parse a list payload (`{"info": {...}, "results": [...]}`)
///
/// Each record is parsed independently. Records that fail are collected in
/// [`ParsedBatch::skipped`] and never abort the batch.
pub fn parse_character_list(payload: &Value) -> ParsedBatch {
    let pagination = parse_pagination(payload.get("info"));

    let mut characters = Vec::new();
    let mut skipped = Vec::new();

    let records = payload
        .get("results")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    for (index, record) in records.iter().enumerate() {
        match parse_character(record) {
            Ok(character) => characters.push(character),
            Err(error) => skipped.push(SkippedRecord { index, error }),
        }
    }

    ParsedBatch {
        characters,
        pagination,
        skipped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rick_record() -> Value {
        json!({
            "id": 1,
            "name": "Rick Sanchez",
            "status": "Alive",
            "species": "Human",
            "gender": "Male",
            "episode": ["/api/episode/1", "/api/episode/2", "bad-url"],
            "origin": {"name": "Earth", "url": ""},
            "location": {"name": "Earth", "url": ""},
            "image": "x.png"
        })
    }

    #[test]
    fn test_extract_id_from_url() {
        assert_eq!(
            extract_id_from_url("https://rickandmortyapi.com/api/episode/28"),
            Some(28)
        );
        assert_eq!(extract_id_from_url("/api/location/20/"), Some(20));
        assert_eq!(extract_id_from_url("/api/location/20///"), Some(20));
        assert_eq!(extract_id_from_url("42"), Some(42));
        assert_eq!(extract_id_from_url(""), None);
        assert_eq!(extract_id_from_url("/"), None);
        assert_eq!(extract_id_from_url("bad-url"), None);
        assert_eq!(extract_id_from_url("/api/episode/abc"), None);
    }

    #[test]
    fn test_extract_ids_drops_bad_entries_and_keeps_order() {
        let urls = json!(["/e/3", 7, "nope", "/e/1", null, "/e/2/"]);
        let ids = extract_ids_from_urls(urls.as_array().unwrap());
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_parse_timestamp_zulu() {
        let dt = parse_timestamp("2017-11-04T18:48:46.250Z").unwrap();
        assert_eq!(dt.offset().local_minus_utc(), 0);
        assert_eq!(dt.to_rfc3339(), "2017-11-04T18:48:46.250+00:00");
    }

    #[test]
    fn test_parse_timestamp_with_offset() {
        let dt = parse_timestamp("2020-01-02T03:04:05+02:00").unwrap();
        assert_eq!(dt.offset().local_minus_utc(), 7200);
    }

    #[test]
    fn test_parse_timestamp_offset_without_colon() {
        let dt = parse_timestamp("2020-01-02T03:04:05+0200").unwrap();
        assert_eq!(dt.offset().local_minus_utc(), 7200);
        assert_eq!(dt.to_rfc3339(), "2020-01-02T03:04:05+02:00");

        let spaced = parse_timestamp("2020-01-02 03:04:05.5-0130").unwrap();
        assert_eq!(spaced.offset().local_minus_utc(), -5400);
    }

    #[test]
    fn test_parse_timestamp_without_seconds() {
        let dt = parse_timestamp("2020-01-02T03:04").unwrap();
        assert_eq!(dt.to_rfc3339(), "2020-01-02T03:04:00+00:00");

        let zulu = parse_timestamp("2020-01-02T03:04Z").unwrap();
        assert_eq!(zulu.to_rfc3339(), "2020-01-02T03:04:00+00:00");
    }

    #[test]
    fn test_parse_timestamp_naive_and_date_only() {
        let dt = parse_timestamp("2020-01-02T03:04:05").unwrap();
        assert_eq!(dt.to_rfc3339(), "2020-01-02T03:04:05+00:00");

        let date = parse_timestamp("2020-01-02").unwrap();
        assert_eq!(date.to_rfc3339(), "2020-01-02T00:00:00+00:00");
    }

    #[test]
    fn test_parse_timestamp_invalid() {
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("yesterday"), None);
        assert_eq!(parse_timestamp("2020-13-45T00:00:00Z"), None);
    }

    #[test]
    fn test_parse_character_scenario() {
        let character = parse_character(&rick_record()).unwrap();

        assert_eq!(character.id, 1);
        assert_eq!(character.name, "Rick Sanchez");
        assert_eq!(character.episode_ids, vec![1, 2]);
        assert_eq!(character.episode_count(), 2);
        assert!(character.is_alive());
        assert_eq!(character.species, Species::Human);
        assert_eq!(character.gender, Gender::Male);
        assert_eq!(character.origin.name, "Earth");
        assert_eq!(character.origin.id(), None);
        assert_eq!(character.image_url, "x.png");
        assert_eq!(character.kind, "");
        assert_eq!(character.created, None);
    }

    #[test]
    fn test_episode_count_never_exceeds_url_count() {
        let record = rick_record();
        let url_count = record["episode"].as_array().unwrap().len();
        let character = parse_character(&record).unwrap();
        assert!(character.episode_count() <= url_count);
        assert_eq!(character.episode_count(), 2);
    }

    #[test]
    fn test_parse_character_minimal_record_uses_defaults() {
        let character = parse_character(&json!({"id": 5, "name": "Jerry"})).unwrap();

        assert_eq!(character.status, Status::Unknown);
        assert_eq!(character.species, Species::Unknown);
        assert_eq!(character.gender, Gender::Unknown);
        assert_eq!(character.origin, Location::new(UNKNOWN_LOCATION, ""));
        assert_eq!(character.location, Location::new(UNKNOWN_LOCATION, ""));
        assert!(character.episode_ids.is_empty());
        assert_eq!(character.url, "");
        assert_eq!(character.image_url, "");
        assert_eq!(character.created, None);
    }

    #[test]
    fn test_parse_character_wrong_optional_types_degrade() {
        let record = json!({
            "id": 2,
            "name": "Morty Smith",
            "status": 12,
            "species": null,
            "type": ["x"],
            "origin": "Earth",
            "location": {"url": "https://example.com/api/location/20"},
            "episode": "not-a-list",
            "created": "garbage"
        });

        let character = parse_character(&record).unwrap();
        assert_eq!(character.status, Status::Unknown);
        assert_eq!(character.species, Species::Unknown);
        assert_eq!(character.kind, "");
        assert_eq!(character.origin.name, UNKNOWN_LOCATION);
        assert_eq!(character.location.name, UNKNOWN_LOCATION);
        assert_eq!(character.location.id(), Some(20));
        assert!(character.episode_ids.is_empty());
        assert_eq!(character.created, None);
    }

    #[test]
    fn test_parse_character_missing_required() {
        assert_eq!(
            parse_character(&json!({"name": "Nobody"})),
            Err(ParseError::MissingField("id"))
        );
        assert_eq!(
            parse_character(&json!({"id": 3})),
            Err(ParseError::MissingField("name"))
        );
        assert_eq!(
            parse_character(&json!({"id": null, "name": "Nobody"})),
            Err(ParseError::MissingField("id"))
        );
        assert_eq!(parse_character(&json!([1, 2])), Err(ParseError::NotAnObject));
    }

    #[test]
    fn test_parse_character_invalid_required() {
        let err = parse_character(&json!({"id": "abc", "name": "X"})).unwrap_err();
        assert!(matches!(err, ParseError::InvalidField { field: "id", .. }));

        let err = parse_character(&json!({"id": 1, "name": 7})).unwrap_err();
        assert!(matches!(err, ParseError::InvalidField { field: "name", .. }));

        let character = parse_character(&json!({"id": " 9 ", "name": "X"})).unwrap();
        assert_eq!(character.id, 9);
    }

    #[test]
    fn test_parse_character_keeps_non_positive_id() {
        let character = parse_character(&json!({"id": -1, "name": ""})).unwrap();
        assert_eq!(character.id, -1);
        assert_eq!(character.name, "");
    }

    #[test]
    fn test_parse_character_list_skips_bad_records() {
        let payload = json!({
            "info": {
                "count": 826,
                "pages": 42,
                "next": "https://rickandmortyapi.com/api/character?page=2",
                "prev": null
            },
            "results": [
                rick_record(),
                {"name": "No Id"},
                {"id": 2, "name": "Morty Smith", "status": "Alive"}
            ]
        });

        let batch = parse_character_list(&payload);

        assert_eq!(batch.characters.len(), 2);
        assert_eq!(batch.characters[0].id, 1);
        assert_eq!(batch.characters[1].id, 2);
        assert_eq!(
            batch.skipped,
            vec![SkippedRecord {
                index: 1,
                error: ParseError::MissingField("id"),
            }]
        );
        assert_eq!(batch.pagination.count, 826);
        assert_eq!(batch.pagination.pages, 42);
        assert!(batch.pagination.next.is_some());
        assert!(batch.pagination.prev.is_none());
    }

    #[test]
    fn test_parse_character_list_empty_payload() {
        let batch = parse_character_list(&json!({}));
        assert!(batch.characters.is_empty());
        assert!(batch.skipped.is_empty());
        assert_eq!(batch.pagination, Pagination::default());
    }

    #[test]
    fn test_parse_error_messages() {
        assert_eq!(
            ParseError::MissingField("id").to_string(),
            "Missing required field: id"
        );
    }
}
