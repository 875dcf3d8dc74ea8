//! Item sinks
//!
//! An [`ItemSink`] accepts one page of items per call. It answers with
//! `Outcome::Success(true)` once the page has been accepted and with
//! `Outcome::Failure` otherwise, wrapped with
//! [`Error::publish`](crate::Error::publish). An empty page is always
//! accepted.
//!
//! # Implementations
//!
//! - [`CollectingSink`] - keeps every published page in memory
//! - [`JsonlSink`] - writes one JSON line per item
//! - [`HttpSink`] - sends each page as a JSON array to an API
//! - [`GuardedSink`] - adapts a [`PublishClient`] that may panic

mod collecting;
mod guarded;
mod http;
mod jsonl;

pub use collecting::CollectingSink;
pub use guarded::{GuardedSink, PublishClient};
pub use http::HttpSink;
pub use jsonl::JsonlSink;

use crate::error::Error;
use crate::outcome::Outcome;
use crate::pagination::Item;

/// Publishes pages of items downstream
pub trait ItemSink {
    /// Publish one page of items
    fn publish(&mut self, items: &[Item]) -> Outcome<Error, bool>;
}

impl<K: ItemSink + ?Sized> ItemSink for &mut K {
    fn publish(&mut self, items: &[Item]) -> Outcome<Error, bool> {
        (**self).publish(items)
    }
}

impl<K: ItemSink + ?Sized> ItemSink for Box<K> {
    fn publish(&mut self, items: &[Item]) -> Outcome<Error, bool> {
        (**self).publish(items)
    }
}
