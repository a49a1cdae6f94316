//! Load pipeline
//!
//! This module ties the fetcher, record assembly and storage together:
//! 1. List the collection (concurrent item fetches)
//! 2. For each record in turn, resolve its references and assemble it
//! 3. Upsert every assembled character sequentially

mod coordinator;
mod summary;

pub use coordinator::{run_load, Loader};
pub use summary::LoadSummary;
