use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Reads a scalar attribute as text
///
/// Strings are kept as-is, numbers and booleans are rendered as text, and
/// null becomes `None`. Arrays and objects are rejected.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected a scalar value, got {}",
            other
        ))),
    }
}

/// One character object as returned by the API
///
/// Every field is optional so that presence checks happen during assembly
/// rather than at deserialization time. Scalar attributes accept numbers
/// and booleans as well as strings. Unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawRecord {
    /// Self URL, e.g. `https://swapi.dev/api/people/1/`
    #[serde(default, deserialize_with = "lenient_string")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub birth_year: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub eye_color: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub gender: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub hair_color: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub height: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub mass: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub skin_color: Option<String>,

    #[serde(default)]
    pub films: Option<Vec<String>>,
    #[serde(default)]
    pub species: Option<Vec<String>>,
    #[serde(default)]
    pub starships: Option<Vec<String>>,
    #[serde(default)]
    pub vehicles: Option<Vec<String>>,
    #[serde(default)]
    pub homeworld: Option<String>,
}

impl RawRecord {
    pub fn films(&self) -> &[String] {
        self.films.as_deref().unwrap_or_default()
    }

    pub fn species(&self) -> &[String] {
        self.species.as_deref().unwrap_or_default()
    }

    pub fn starships(&self) -> &[String] {
        self.starships.as_deref().unwrap_or_default()
    }

    pub fn vehicles(&self) -> &[String] {
        self.vehicles.as_deref().unwrap_or_default()
    }

    /// Homeworld as a zero- or one-element list; an empty string counts as absent
    pub fn homeworld(&self) -> &[String] {
        match &self.homeworld {
            Some(url) if !url.is_empty() => std::slice::from_ref(url),
            _ => &[],
        }
    }
}
