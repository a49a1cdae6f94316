//! swapi-loader main entry point
//!
//! This is the command-line interface for provisioning the character
//! database and loading Star Wars characters into it.

use chrono::Utc;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Instant;
use swapi_loader::config::{load_config_with_hash, Config};
use swapi_loader::storage::{connect_store, provision_database, RecordStore};
use swapi_loader::LoaderError;
use tracing_subscriber::EnvFilter;

/// swapi-loader: Star Wars character loader
///
/// Fetches every character from the Star Wars API, resolves the films,
/// species, starships, vehicles and homeworld they reference into names,
/// and upserts them into a SQLite table.
#[derive(Parser, Debug)]
#[command(name = "swapi-loader")]
#[command(version)]
#[command(about = "Loads Star Wars characters into SQLite", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (built-in defaults when omitted)
    #[arg(short, long, value_name = "CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose", global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create the database, the characters table and the update trigger
    Migrate,

    /// Fetch, resolve and store all characters
    Load,

    /// Show statistics from the database and exit
    Stats,
}

#[tokio::main]
async fn main() -> Result<(), LoaderError> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            match load_config_with_hash(path) {
                Ok((cfg, hash)) => {
                    tracing::info!("Configuration loaded successfully (hash: {})", hash);
                    cfg
                }
                Err(e) => {
                    tracing::error!("Failed to load configuration: {}", e);
                    return Err(e.into());
                }
            }
        }
        None => {
            tracing::info!("No configuration file given, using defaults");
            Config::default()
        }
    };

    match cli.command {
        Command::Migrate => handle_migrate(&config).await?,
        Command::Load => handle_load(&config).await?,
        Command::Stats => handle_stats(&config).await?,
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("swapi_loader=info,warn"),
            1 => EnvFilter::new("swapi_loader=debug,info"),
            2 => EnvFilter::new("swapi_loader=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the migrate command: provisions database, table and trigger
async fn handle_migrate(config: &Config) -> swapi_loader::Result<()> {
    let started_at = Utc::now();
    let start_time = Instant::now();
    tracing::info!("Starting migration at {}", started_at.to_rfc3339());

    match provision_database(&config.database, &config.retry).await {
        Ok(report) => {
            if report.created {
                println!("✓ Database created: {}", config.database.path);
            } else {
                println!("✓ Database already exists: {}", config.database.path);
            }
            println!("✓ Migration completed successfully");
        }
        Err(e) => {
            tracing::error!("Migration failed: {}", e);
            return Err(e.into());
        }
    }

    tracing::info!("Finished migration at {}", Utc::now().to_rfc3339());
    println!("Total time: {:?}", start_time.elapsed());
    Ok(())
}

/// Handles the load command: runs the fetch-enrich-persist pipeline
async fn handle_load(config: &Config) -> swapi_loader::Result<()> {
    tracing::info!("Starting Star Wars character load");

    let summary = match swapi_loader::run_load(config).await {
        Ok(summary) => summary,
        Err(e) => {
            tracing::error!("Load failed: {}", e);
            return Err(e);
        }
    };

    println!("=== Load Summary ===\n");
    println!("  Started: {}", summary.started_at.to_rfc3339());
    println!("  Reported by API: {}", summary.reported_count);
    println!("  Fetched: {}", summary.fetched);
    println!("  Assembled: {}", summary.assembled);
    println!("  Dropped: {}", summary.dropped());
    println!("  Saved: {}", summary.saved());
    if let Some(error) = &summary.save.error {
        println!("  Save error: {}", error);
    }
    println!("  Total time: {:?}", summary.elapsed);

    Ok(())
}

/// Handles the stats command: shows what the database holds
async fn handle_stats(config: &Config) -> swapi_loader::Result<()> {
    let store = connect_store(&config.database, &config.retry).await?;

    println!("=== Character Database Statistics ===\n");
    println!("Database: {}", config.database.path);
    println!("  Characters: {}", store.count_characters()?);
    match store.latest_update()? {
        Some(updated_at) => println!("  Last updated: {}", updated_at),
        None => println!("  Last updated: never"),
    }

    Ok(())
}
