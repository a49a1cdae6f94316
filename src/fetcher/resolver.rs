//! Reference resolution
//!
//! Turns the URL lists of a record's reference fields into comma-joined
//! lists of the referenced resources' names.

use crate::fetcher::http::fetch_json;
use crate::record::{RawRecord, ResolvedReferences};
use futures::future::join_all;
use reqwest::Client;

/// Separator between resolved names
const NAME_SEPARATOR: &str = ", ";

/// Fetches every URL concurrently and joins the `name` of each resource
///
/// Failed fetches and resources without a string `name` are skipped, so the
/// result holds one name per successful fetch, in input order. An empty
/// slice yields an empty string without any request.
pub async fn fetch_names(client: &Client, urls: &[String]) -> String {
    if urls.is_empty() {
        return String::new();
    }

    let results = join_all(urls.iter().map(|url| fetch_json(client, url))).await;

    results
        .into_iter()
        .filter_map(|result| {
            let value = result.into_value()?;
            value.get("name")?.as_str().map(str::to_owned)
        })
        .collect::<Vec<_>>()
        .join(NAME_SEPARATOR)
}

/// Resolves all five reference groups of a record concurrently
pub async fn resolve_references(client: &Client, record: &RawRecord) -> ResolvedReferences {
    let (films, species, starships, vehicles, homeworld) = tokio::join!(
        fetch_names(client, record.films()),
        fetch_names(client, record.species()),
        fetch_names(client, record.starships()),
        fetch_names(client, record.vehicles()),
        fetch_names(client, record.homeworld())
    );

    ResolvedReferences {
        films,
        species,
        starships,
        vehicles,
        homeworld,
    }
}
