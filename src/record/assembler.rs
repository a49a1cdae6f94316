use crate::record::{Character, RawRecord};
use crate::{RecordError, RecordResult};

/// Reference fields of one record, each resolved into a comma-joined name list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedReferences {
    pub films: String,
    pub species: String,
    pub starships: String,
    pub vehicles: String,
    pub homeworld: String,
}

/// Extracts the numeric identifier from a resource self URL
///
/// Trailing slashes are stripped and the last path segment is parsed.
///
/// # Example
///
/// ```
/// use swapi_loader::record::extract_id;
///
/// assert_eq!(extract_id("https://swapi.dev/api/people/42/").unwrap(), 42);
/// ```
pub fn extract_id(url: &str) -> RecordResult<i64> {
    url.trim_end_matches('/')
        .rsplit('/')
        .next()
        .and_then(|segment| segment.parse::<i64>().ok())
        .ok_or_else(|| RecordError::InvalidIdentifier(url.to_string()))
}

/// Combines a raw record with its resolved references into a [`Character`]
///
/// Missing scalar attributes become empty strings. The record must carry
/// a `url` with a numeric last segment and a `name`.
pub fn assemble(raw: RawRecord, references: ResolvedReferences) -> RecordResult<Character> {
    let url = raw.url.ok_or(RecordError::MissingField("url"))?;
    let id = extract_id(&url)?;
    let name = raw.name.ok_or(RecordError::MissingField("name"))?;

    Ok(Character {
        id,
        name,
        birth_year: raw.birth_year.unwrap_or_default(),
        eye_color: raw.eye_color.unwrap_or_default(),
        gender: raw.gender.unwrap_or_default(),
        hair_color: raw.hair_color.unwrap_or_default(),
        height: raw.height.unwrap_or_default(),
        homeworld: references.homeworld,
        mass: raw.mass.unwrap_or_default(),
        skin_color: raw.skin_color.unwrap_or_default(),
        films: references.films,
        species: references.species,
        starships: references.starships,
        vehicles: references.vehicles,
    })
}
