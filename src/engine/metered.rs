//! Metering decorator
//!
//! Counts the calls that pass through a source or sink without changing
//! their outcomes.

use super::types::TransferStats;
use crate::error::Error;
use crate::outcome::Outcome;
use crate::pagination::{Item, PageResponse};
use crate::sink::ItemSink;
use crate::source::PageSource;
use chrono::Utc;

/// Wraps a [`PageSource`] or [`ItemSink`] and records [`TransferStats`]
#[derive(Debug, Default)]
pub struct Metered<T> {
    inner: T,
    stats: TransferStats,
}

impl<T> Metered<T> {
    /// Wrap a collaborator
    pub fn new(inner: T) -> Self {
        Self {
            inner,
            stats: TransferStats::default(),
        }
    }

    /// Statistics recorded so far
    pub fn stats(&self) -> &TransferStats {
        &self.stats
    }

    /// The wrapped collaborator
    pub fn inner(&self) -> &T {
        &self.inner
    }

    /// Consume the decorator, returning the collaborator and its stats
    pub fn into_parts(self) -> (T, TransferStats) {
        (self.inner, self.stats)
    }

    /// Consume the decorator, returning the collaborator
    pub fn into_inner(self) -> T {
        self.inner
    }
}

impl<S: PageSource> PageSource for Metered<S> {
    fn fetch_page(&mut self) -> Outcome<Error, PageResponse> {
        self.stats.mark_started(Utc::now());
        let outcome = self.inner.fetch_page();
        self.stats.mark_finished(Utc::now());
        match &outcome {
            Outcome::Success(page) => self.stats.add_fetched(page.items.len()),
            Outcome::Failure(_) => self.stats.add_failure(),
        }
        outcome
    }
}

impl<K: ItemSink> ItemSink for Metered<K> {
    fn publish(&mut self, items: &[Item]) -> Outcome<Error, bool> {
        self.stats.mark_started(Utc::now());
        let outcome = self.inner.publish(items);
        self.stats.mark_finished(Utc::now());
        match &outcome {
            Outcome::Success(_) => self.stats.add_published(items.len()),
            Outcome::Failure(_) => self.stats.add_failure(),
        }
        outcome
    }
}
