//! Batch writer for assembled characters

use crate::record::Character;
use crate::storage::traits::RecordStore;

/// Outcome of a batch write
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SaveReport {
    /// Number of characters written before the batch finished or failed
    pub saved: usize,

    /// Error that aborted the batch, if any
    pub error: Option<String>,
}

impl SaveReport {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Upserts characters one at a time, in order
///
/// The first failure stops the batch; rows written before it stay written.
/// The failure is logged and returned in the report rather than raised.
pub fn save_characters<S: RecordStore + ?Sized>(store: &mut S, characters: &[Character]) -> SaveReport {
    let mut report = SaveReport::default();

    for character in characters {
        if let Err(e) = store.upsert_character(character) {
            tracing::error!(
                "Failed to save character {} ({}): {}; aborting remaining {} write(s)",
                character.id,
                character.name,
                e,
                characters.len() - report.saved - 1
            );
            report.error = Some(e.to_string());
            return report;
        }
        report.saved += 1;
    }

    report
}
