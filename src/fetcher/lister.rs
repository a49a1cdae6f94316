//! Collection listing
//!
//! The collection endpoint only reports how many items it holds; items are
//! then fetched one by one at `<collection>/<index>/` for every index from 1
//! to that count. This assumes dense identifiers starting at 1: items with
//! a higher index than the count are never requested, and missing indices
//! simply produce failed fetches.

use crate::fetcher::http::fetch_json;
use crate::record::RawRecord;
use futures::future::join_all;
use reqwest::Client;

/// Outcome of listing a collection
#[derive(Debug, Default)]
pub struct CollectionListing {
    /// The `count` the collection endpoint reported
    pub reported_count: u64,

    /// Records that were fetched and parsed successfully
    pub records: Vec<RawRecord>,
}

/// Builds the URL of the item with the given index
///
/// # Example
///
/// ```
/// use swapi_loader::fetcher::item_url;
///
/// assert_eq!(item_url("https://swapi.dev/api/people", 3), "https://swapi.dev/api/people/3/");
/// assert_eq!(item_url("https://swapi.dev/api/people/", 3), "https://swapi.dev/api/people/3/");
/// ```
pub fn item_url(collection_url: &str, index: u64) -> String {
    format!("{}/{}/", collection_url.trim_end_matches('/'), index)
}

/// Fetches every item of a collection concurrently
///
/// Issues one request to read the collection's `count`, then exactly
/// `count` concurrent item requests. Failed fetches and bodies that are not
/// character objects are dropped. A failed collection request yields an
/// empty listing.
pub async fn list_collection(client: &Client, collection_url: &str) -> CollectionListing {
    let Some(collection) = fetch_json(client, collection_url).await.into_value() else {
        tracing::error!("Failed to fetch collection {}", collection_url);
        return CollectionListing::default();
    };

    let Some(count) = collection.get("count").and_then(|c| c.as_u64()) else {
        tracing::error!(
            "Collection {} did not report a valid 'count' field",
            collection_url
        );
        return CollectionListing::default();
    };

    tracing::info!("Found {} characters", count);

    let fetches = (1..=count).map(|index| {
        let url = item_url(collection_url, index);
        async move {
            let value = fetch_json(client, &url).await.into_value();
            (value, url)
        }
    });

    let records = join_all(fetches)
        .await
        .into_iter()
        .filter_map(|(value, url)| {
            let value = value?;
            match serde_json::from_value::<RawRecord>(value) {
                Ok(record) => Some(record),
                Err(e) => {
                    tracing::warn!("Skipping malformed record at {}: {}", url, e);
                    None
                }
            }
        })
        .collect::<Vec<_>>();

    tracing::debug!("Fetched {} of {} records", records.len(), count);

    CollectionListing {
        reported_count: count,
        records,
    }
}
