//! In-memory sink

use super::ItemSink;
use crate::error::Error;
use crate::outcome::Outcome;
use crate::pagination::Item;

/// Keeps every accepted page in memory
///
/// Can be told to reject the Nth publish call, counting from 1.
#[derive(Debug, Default)]
pub struct CollectingSink {
    pages: Vec<Vec<Item>>,
    calls: usize,
    fail_on: Option<(usize, String)>,
}

impl CollectingSink {
    /// Create an empty sink that accepts everything
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject the `call`th publish with `message`
    #[must_use]
    pub fn fail_on(mut self, call: usize, message: impl Into<String>) -> Self {
        self.fail_on = Some((call, message.into()));
        self
    }

    /// Number of publish calls made so far
    pub fn publish_count(&self) -> usize {
        self.calls
    }

    /// Accepted pages, in publish order
    pub fn pages(&self) -> &[Vec<Item>] {
        &self.pages
    }

    /// All accepted items, flattened
    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.pages.iter().flatten()
    }

    /// Consume the sink, returning the accepted pages
    pub fn into_pages(self) -> Vec<Vec<Item>> {
        self.pages
    }
}

impl ItemSink for CollectingSink {
    fn publish(&mut self, items: &[Item]) -> Outcome<Error, bool> {
        self.calls += 1;
        if let Some((call, message)) = &self.fail_on {
            if *call == self.calls {
                return Outcome::Failure(Error::publish(Error::other(message.clone())));
            }
        }
        if !items.is_empty() {
            self.pages.push(items.to_vec());
        }
        Outcome::Success(true)
    }
}
