//! Outcome accounting for a migration run.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Running counts of per-record migration outcomes.
///
/// Mutated incrementally by the reconciliation engine and read once at
/// run end. `failed > 0` is one of the two conditions that make a run's
/// exit signal non-zero (the other being a failed provider restore).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunTally {
    /// Users created on the target realm.
    pub created: usize,

    /// Existing users updated in place.
    pub updated: usize,

    /// Records left untouched by the conflict rules.
    pub skipped: usize,

    /// Records that failed to migrate.
    pub failed: usize,

    /// When reconciliation started.
    pub started_at: DateTime<Utc>,

    /// When reconciliation finished.
    pub completed_at: DateTime<Utc>,
}

impl RunTally {
    /// Creates an empty tally stamped with the start time.
    #[must_use]
    pub fn new(started_at: DateTime<Utc>) -> Self {
        Self {
            created: 0,
            updated: 0,
            skipped: 0,
            failed: 0,
            started_at,
            completed_at: started_at,
        }
    }

    /// Stamps the completion time.
    pub fn complete(&mut self) {
        self.completed_at = Utc::now();
    }

    /// Records a created user.
    pub fn record_created(&mut self) {
        self.created += 1;
    }

    /// Records an updated user.
    pub fn record_updated(&mut self) {
        self.updated += 1;
    }

    /// Records a skipped record.
    pub fn record_skipped(&mut self) {
        self.skipped += 1;
    }

    /// Records a failed record.
    pub fn record_failed(&mut self) {
        self.failed += 1;
    }

    /// Total number of records processed.
    #[must_use]
    pub fn total(&self) -> usize {
        self.created + self.updated + self.skipped + self.failed
    }

    /// Whether any record failed to migrate.
    #[must_use]
    pub fn is_failure(&self) -> bool {
        self.failed > 0
    }

    /// One-line human summary.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "{} created, {} updated, {} skipped, {} failed",
            self.created, self.updated, self.skipped, self.failed
        )
    }
}
