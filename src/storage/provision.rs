//! Database provisioning and connection
//!
//! Provisioning creates the database file, the `characters` table and the
//! update timestamp trigger. Every step is idempotent.

use crate::config::DatabaseConfig;
use crate::retry::RetryPolicy;
use crate::storage::sqlite::SqliteStore;
use crate::storage::traits::StorageResult;
use std::path::Path;

/// Outcome of provisioning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProvisionReport {
    /// Whether the database file had to be created
    pub created: bool,
}

/// Creates the database, table and trigger if they do not exist yet
///
/// Opening the database is retried according to `retry`; DDL failures are
/// returned immediately.
pub async fn provision_database(
    config: &DatabaseConfig,
    retry: &RetryPolicy,
) -> StorageResult<ProvisionReport> {
    let path = Path::new(&config.path);
    let created = !path.exists();

    if created {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        tracing::info!("Database '{}' does not exist, creating it", config.path);
    } else {
        tracing::info!("Database '{}' already exists", config.path);
    }

    let store = retry
        .run("Database connection", move || async move { SqliteStore::create(path) })
        .await?;
    tracing::info!("Successfully connected to {}", config.path);

    store.create_table()?;
    tracing::info!("Created characters table");

    store.create_update_trigger()?;
    tracing::info!("Created update timestamp trigger");

    Ok(ProvisionReport { created })
}

/// Opens a provisioned database, retrying according to `retry`
pub async fn connect_store(config: &DatabaseConfig, retry: &RetryPolicy) -> StorageResult<SqliteStore> {
    let path = Path::new(&config.path);
    let store = retry
        .run("Database connection", move || async move { SqliteStore::open(path) })
        .await?;
    store.ping()?;
    tracing::info!("Successfully connected to {}", config.path);
    Ok(store)
}
