//! Page sources
//!
//! A [`PageSource`] hands out one page per call and owns whatever cursor it
//! needs to know which page comes next. Failures are returned as
//! `Outcome::Failure`, wrapped with [`Error::fetch`](crate::Error::fetch).
//!
//! # Implementations
//!
//! - [`ScriptedSource`] - replays a fixed list of outcomes
//! - [`FileSource`] - serves pages stored in a JSON or JSON Lines file
//! - [`HttpPageSource`] - offset/limit pagination over a JSON API

mod file;
mod http;
mod scripted;

pub use file::FileSource;
pub use http::HttpPageSource;
pub use scripted::ScriptedSource;

use crate::error::Error;
use crate::outcome::Outcome;
use crate::pagination::PageResponse;

/// Supplies successive pages of items
pub trait PageSource {
    /// Fetch the next page
    fn fetch_page(&mut self) -> Outcome<Error, PageResponse>;
}

impl<S: PageSource + ?Sized> PageSource for &mut S {
    fn fetch_page(&mut self) -> Outcome<Error, PageResponse> {
        (**self).fetch_page()
    }
}

impl<S: PageSource + ?Sized> PageSource for Box<S> {
    fn fetch_page(&mut self) -> Outcome<Error, PageResponse> {
        (**self).fetch_page()
    }
}
