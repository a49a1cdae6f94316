use crate::storage::SaveReport;
use chrono::{DateTime, Utc};
use std::time::Duration;

/// Counts and timing of one pipeline run
#[derive(Debug)]
pub struct LoadSummary {
    /// When the run started
    pub started_at: DateTime<Utc>,

    /// Number of items the collection endpoint reported
    pub reported_count: u64,

    /// Records fetched successfully
    pub fetched: usize,

    /// Records that were resolved and assembled
    pub assembled: usize,

    /// Outcome of the batch write
    pub save: SaveReport,

    /// Wall-clock duration of the run
    pub elapsed: Duration,
}

impl LoadSummary {
    pub(crate) fn new(started_at: DateTime<Utc>) -> Self {
        Self {
            started_at,
            reported_count: 0,
            fetched: 0,
            assembled: 0,
            save: SaveReport::default(),
            elapsed: Duration::ZERO,
        }
    }

    /// Records fetched but rejected during assembly
    pub fn dropped(&self) -> usize {
        self.fetched.saturating_sub(self.assembled)
    }

    /// Number of rows written
    pub fn saved(&self) -> usize {
        self.save.saved
    }

    pub fn is_success(&self) -> bool {
        self.save.is_success()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dropped_counts_rejected_records() {
        let mut summary = LoadSummary::new(Utc::now());
        summary.fetched = 5;
        summary.assembled = 3;
        assert_eq!(summary.dropped(), 2);
        assert!(summary.is_success());
    }

    #[test]
    fn test_save_error_marks_failure() {
        let mut summary = LoadSummary::new(Utc::now());
        summary.save = SaveReport {
            saved: 1,
            error: Some("disk full".to_string()),
        };
        assert!(!summary.is_success());
        assert_eq!(summary.saved(), 1);
    }
}
