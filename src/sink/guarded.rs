//! Sink adapter for clients that may panic
//!
//! Third-party publishing clients sometimes report failures by unwinding.
//! [`GuardedSink`] turns both a returned error and a panic into a publish
//! failure, so the transfer loop only ever sees values.

use super::ItemSink;
use crate::error::{Error, Result};
use crate::outcome::Outcome;
use crate::pagination::Item;
use tracing::warn;

/// A client that publishes pages in its own way
pub trait PublishClient {
    /// Publish `items`, returning whether they were accepted
    fn publish_items(&mut self, items: &[Item]) -> Result<bool>;
}

impl<F> PublishClient for F
where
    F: FnMut(&[Item]) -> Result<bool>,
{
    fn publish_items(&mut self, items: &[Item]) -> Result<bool> {
        self(items)
    }
}

/// Wraps a [`PublishClient`] as an [`ItemSink`]
#[derive(Debug)]
pub struct GuardedSink<C> {
    client: C,
}

impl<C: PublishClient> GuardedSink<C> {
    /// Wrap a client
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// Consume the sink, returning the client
    pub fn into_inner(self) -> C {
        self.client
    }
}

impl<C: PublishClient> ItemSink for GuardedSink<C> {
    fn publish(&mut self, items: &[Item]) -> Outcome<Error, bool> {
        if items.is_empty() {
            return Outcome::Success(true);
        }
        let client = &mut self.client;
        Outcome::<Error, bool>::catching(|| client.publish_items(items))
            .map_failure(|error| {
                warn!(error = %error, "Publish client failed");
                Error::publish(error)
            })
    }
}
