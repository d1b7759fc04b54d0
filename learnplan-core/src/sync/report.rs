//! Counting what a sync run did.

use crate::event::RemoteEvent;
use crate::row::SyncKey;

/// What happened to a single row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowOutcome {
    Created(RemoteEvent),
    Updated(RemoteEvent),
    Skipped(String),
}

/// A row that could not be synced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowFailure {
    pub key: SyncKey,
    pub label: String,
    pub error: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub created: usize,
    pub updated: usize,
    pub skipped: usize,
    pub failures: Vec<RowFailure>,
}

impl SyncReport {
    pub fn record(&mut self, key: SyncKey, label: String, outcome: &RowOutcome) {
        match outcome {
            RowOutcome::Created(_) => self.created += 1,
            RowOutcome::Updated(_) => self.updated += 1,
            RowOutcome::Skipped(error) => {
                self.skipped += 1;
                self.failures.push(RowFailure {
                    key,
                    label,
                    error: error.clone(),
                });
            }
        }
    }

    /// Rows seen, equal to the number of input rows after a run.
    pub fn total(&self) -> usize {
        self.created + self.updated + self.skipped
    }
}
