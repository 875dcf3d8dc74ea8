//! Transfer engine module
//!
//! Drives fetch/publish cycles between a page source and an item sink.
//!
//! # Overview
//!
//! The engine module provides:
//! - `PaginationDriver` - Runs cycles until the first failure or the last page
//! - `Metered` - Decorator that records `TransferStats` for a source or sink
//! - Cycle and transfer result types
//!
//! Cycles are generated on demand by a [`LazySequence`] and searched for the
//! first terminal one, so no page is fetched or published after a failure or
//! after the source reports that nothing is left.

mod metered;
mod types;

pub use metered::Metered;
pub use types::{CycleOutcome, CycleResult, TransferResult, TransferStats};

use crate::outcome::Outcome;
use crate::sequence::LazySequence;
use crate::sink::ItemSink;
use crate::source::PageSource;
use tracing::{debug, info, warn};

/// Moves every page from a source to a sink
///
/// The driver keeps nothing between cycles; sources own their cursors.
#[derive(Debug)]
pub struct PaginationDriver<S, K> {
    source: S,
    sink: K,
}

impl<S: PageSource, K: ItemSink> PaginationDriver<S, K> {
    /// Create a driver over a source and a sink
    pub fn new(source: S, sink: K) -> Self {
        Self { source, sink }
    }

    /// Get the page source
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Get the item sink
    pub fn sink(&self) -> &K {
        &self.sink
    }

    /// Consume the driver, returning its collaborators
    pub fn into_parts(self) -> (S, K) {
        (self.source, self.sink)
    }

    /// Run cycles until one is terminal
    ///
    /// Returns `Success(true)` once the last page has been published, or the
    /// first fetch or publish failure.
    pub fn transfer(&mut self) -> TransferResult {
        let (source, sink) = (&mut self.source, &mut self.sink);
        let terminal = LazySequence::continually(|| run_cycle(source, sink)).find(is_terminal);

        match terminal {
            Some(outcome) => conclude(outcome.map(|_| true)),
            // continually never runs dry
            None => conclude(Outcome::Success(true)),
        }
    }

    /// Same contract as [`transfer`](Self::transfer), written as a plain loop
    pub fn transfer_stepwise(&mut self) -> TransferResult {
        loop {
            let page = match self.source.fetch_page() {
                Outcome::Success(page) => page,
                Outcome::Failure(error) => return conclude(Outcome::Failure(error)),
            };

            if let Outcome::Failure(error) = self.sink.publish(&page.items) {
                return conclude(Outcome::Failure(error));
            }

            debug!(items = page.items.len(), has_more = page.has_more, "Cycle completed");
            if !page.has_more {
                return conclude(Outcome::Success(true));
            }
        }
    }
}

/// Fetch one page and publish its items
///
/// The sink is only called when the fetch succeeded.
fn run_cycle<S: PageSource, K: ItemSink>(source: &mut S, sink: &mut K) -> CycleOutcome {
    source.fetch_page().flat_map(|page| {
        sink.publish(&page.items).map(|published| {
            debug!(items = page.items.len(), has_more = page.has_more, "Cycle completed");
            CycleResult::new(published, page.has_more)
        })
    })
}

/// A cycle is terminal when it failed or saw the last page
fn is_terminal(outcome: &CycleOutcome) -> bool {
    outcome.as_ref().fold(|_| true, |cycle| !cycle.has_more)
}

fn conclude(result: TransferResult) -> TransferResult {
    match &result {
        Outcome::Success(_) => info!("Transfer completed"),
        Outcome::Failure(error) => warn!(error = %error, "Transfer failed"),
    }
    result
}
