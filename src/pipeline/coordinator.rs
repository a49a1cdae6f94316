//! Pipeline coordinator - fetch, enrich, persist
//!
//! Records are listed with full fan-out, but enriched one at a time: the
//! reference fetches of a single record run concurrently, while records
//! wait for each other. Writes happen after all records are assembled.

use crate::config::Config;
use crate::fetcher::{build_http_client, list_collection, resolve_references};
use crate::record::{assemble, Character, RawRecord};
use crate::storage::{connect_store, save_characters, RecordStore};
use crate::{LoaderError, RecordResult};
use chrono::Utc;
use reqwest::Client;
use std::time::Instant;

use super::LoadSummary;

/// Runs the pipeline against one record store
pub struct Loader<S> {
    client: Client,
    collection_url: String,
    store: S,
}

impl<S: RecordStore> Loader<S> {
    /// Creates a new loader
    ///
    /// # Arguments
    ///
    /// * `client` - HTTP client shared by every request of the run
    /// * `collection_url` - Collection endpoint, e.g. `https://swapi.dev/api/people/`
    /// * `store` - Destination of the assembled characters
    pub fn new(client: Client, collection_url: impl Into<String>, store: S) -> Self {
        Self {
            client,
            collection_url: collection_url.into(),
            store,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Runs one full fetch-enrich-persist pass
    ///
    /// Never fails: fetch and assembly failures drop the affected records,
    /// and a write failure is reported in the returned summary.
    pub async fn run(&mut self) -> LoadSummary {
        let start_time = Instant::now();
        let mut summary = LoadSummary::new(Utc::now());
        tracing::info!("Loading characters from {}", self.collection_url);

        let listing = list_collection(&self.client, &self.collection_url).await;
        summary.reported_count = listing.reported_count;
        summary.fetched = listing.records.len();

        if listing.records.is_empty() {
            tracing::info!("No characters found");
            summary.elapsed = start_time.elapsed();
            return summary;
        }

        tracing::info!("Processing {} characters...", listing.records.len());
        let mut characters: Vec<Character> = Vec::with_capacity(listing.records.len());
        for raw in listing.records {
            match process_record(&self.client, raw).await {
                Ok(character) => characters.push(character),
                Err(e) => tracing::warn!("Dropping character record: {}", e),
            }
        }
        summary.assembled = characters.len();

        summary.save = save_characters(&mut self.store, &characters);
        if summary.save.is_success() {
            tracing::info!("Successfully saved {} characters", summary.save.saved);
        } else {
            tracing::error!(
                "Saving stopped after {} of {} characters",
                summary.save.saved,
                characters.len()
            );
        }

        summary.elapsed = start_time.elapsed();
        tracing::info!("Total time: {:?}", summary.elapsed);
        summary
    }
}

/// Resolves the references of one record and assembles it
async fn process_record(client: &Client, raw: RawRecord) -> RecordResult<Character> {
    let references = resolve_references(client, &raw).await;
    let character = assemble(raw, references)?;
    tracing::debug!("Assembled character {} ({})", character.id, character.name);
    Ok(character)
}

/// Connects to the configured database and runs the pipeline
///
/// # Returns
///
/// * `Ok(LoadSummary)` - The run completed, possibly with dropped records or
///   a reported write failure
/// * `Err(LoaderError)` - The database could not be reached after retries,
///   or the HTTP client could not be built
pub async fn run_load(config: &Config) -> Result<LoadSummary, LoaderError> {
    let store = connect_store(&config.database, &config.retry).await?;
    let client = build_http_client(&config.source)?;

    let mut loader = Loader::new(client, config.source.base_url.clone(), store);
    Ok(loader.run().await)
}
