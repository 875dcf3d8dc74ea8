//! Engine types
//!
//! Per-cycle values and the statistics collected by [`Metered`](super::Metered).

use crate::error::Error;
use crate::outcome::Outcome;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Result of one fetch/publish cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleResult {
    /// Whether the sink accepted the page
    pub published: bool,
    /// Whether the source reported another page
    pub has_more: bool,
}

impl CycleResult {
    /// Create a cycle result
    pub fn new(published: bool, has_more: bool) -> Self {
        Self {
            published,
            has_more,
        }
    }
}

/// Outcome of one cycle
pub type CycleOutcome = Outcome<Error, CycleResult>;

/// Outcome of a whole transfer; the success value is always `true`
pub type TransferResult = Outcome<Error, bool>;

/// Statistics from a transfer
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TransferStats {
    /// Successful fetch calls
    pub pages_fetched: u64,
    /// Items received from the source
    pub items_fetched: u64,
    /// Successful publish calls
    pub pages_published: u64,
    /// Items accepted by the sink
    pub items_published: u64,
    /// Failed calls on either side
    pub failures: u64,
    /// Time of the first metered call
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    /// Time the last metered call returned
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<DateTime<Utc>>,
}

impl TransferStats {
    /// Create new stats
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a fetched page
    pub fn add_fetched(&mut self, items: usize) {
        self.pages_fetched += 1;
        self.items_fetched += items as u64;
    }

    /// Record a published page
    pub fn add_published(&mut self, items: usize) {
        self.pages_published += 1;
        self.items_published += items as u64;
    }

    /// Record a failed call
    pub fn add_failure(&mut self) {
        self.failures += 1;
    }

    /// Mark a call starting at `at`
    pub fn mark_started(&mut self, at: DateTime<Utc>) {
        self.started_at.get_or_insert(at);
    }

    /// Mark a call finishing at `at`
    pub fn mark_finished(&mut self, at: DateTime<Utc>) {
        self.finished_at = Some(at);
    }

    /// Wall time between the first call and the last return, in milliseconds
    pub fn duration_ms(&self) -> u64 {
        match (self.started_at, self.finished_at) {
            (Some(start), Some(end)) => {
                u64::try_from((end - start).num_milliseconds()).unwrap_or(0)
            }
            _ => 0,
        }
    }

    /// Combine the stats of the source and sink sides
    #[must_use]
    pub fn merge(mut self, other: &TransferStats) -> Self {
        self.pages_fetched += other.pages_fetched;
        self.items_fetched += other.items_fetched;
        self.pages_published += other.pages_published;
        self.items_published += other.items_published;
        self.failures += other.failures;
        self.started_at = match (self.started_at, other.started_at) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        };
        self.finished_at = match (self.finished_at, other.finished_at) {
            (Some(a), Some(b)) => Some(a.max(b)),
            (a, b) => a.or(b),
        };
        self
    }
}
