//! Scripted page source

use super::PageSource;
use crate::error::Error;
use crate::outcome::Outcome;
use crate::pagination::PageResponse;
use std::collections::VecDeque;

/// Replays a fixed sequence of fetch outcomes, in order
///
/// Once the script is used up every further fetch returns an empty final page.
#[derive(Debug, Default)]
pub struct ScriptedSource {
    script: VecDeque<Outcome<Error, PageResponse>>,
    fetches: usize,
}

impl ScriptedSource {
    /// Create a source from a list of outcomes
    pub fn new(script: impl IntoIterator<Item = Outcome<Error, PageResponse>>) -> Self {
        Self {
            script: script.into_iter().collect(),
            fetches: 0,
        }
    }

    /// Create a source that only ever succeeds
    pub fn pages(pages: impl IntoIterator<Item = PageResponse>) -> Self {
        Self::new(pages.into_iter().map(Outcome::Success))
    }

    /// Append a successful page
    #[must_use]
    pub fn then_page(mut self, page: PageResponse) -> Self {
        self.script.push_back(Outcome::Success(page));
        self
    }

    /// Append a failing fetch
    #[must_use]
    pub fn then_fail(mut self, error: Error) -> Self {
        self.script.push_back(Outcome::Failure(error));
        self
    }

    /// Number of fetch calls made so far
    pub fn fetch_count(&self) -> usize {
        self.fetches
    }

    /// Number of scripted outcomes not yet served
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl PageSource for ScriptedSource {
    fn fetch_page(&mut self) -> Outcome<Error, PageResponse> {
        self.fetches += 1;
        self.script
            .pop_front()
            .unwrap_or_else(|| Outcome::Success(PageResponse::last(Vec::new())))
    }
}
