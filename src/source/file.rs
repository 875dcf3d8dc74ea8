//! File-backed page source
//!
//! Reads pages from either a JSON array of page documents or a JSON Lines
//! file with one page document per line.

use super::PageSource;
use crate::error::{Error, Result};
use crate::outcome::Outcome;
use crate::pagination::PageResponse;
use std::collections::VecDeque;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Serves pages previously stored in a file
///
/// The last stored page is always served as final, whatever its flag says.
#[derive(Debug, Default)]
pub struct FileSource {
    pages: VecDeque<PageResponse>,
}

impl FileSource {
    /// Load pages from a file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::FileNotFound {
                    path: path.display().to_string(),
                }
            } else {
                Error::Io(e)
            }
        })?;
        let source = Self::from_str(&content)?;
        debug!(path = %path.display(), pages = source.pages.len(), "Loaded page file");
        Ok(source)
    }

    /// Parse pages from file contents
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self> {
        let trimmed = content.trim_start();
        let pages: Vec<PageResponse> = if trimmed.starts_with('[') {
            serde_json::from_str(trimmed)?
        } else {
            trimmed
                .lines()
                .filter(|line| !line.trim().is_empty())
                .map(serde_json::from_str::<PageResponse>)
                .collect::<std::result::Result<Vec<_>, _>>()?
        };
        Ok(Self::from_pages(pages))
    }

    /// Serve an in-memory list of pages
    pub fn from_pages(pages: impl IntoIterator<Item = PageResponse>) -> Self {
        Self {
            pages: pages.into_iter().collect(),
        }
    }

    /// Number of pages not yet served
    pub fn remaining(&self) -> usize {
        self.pages.len()
    }
}

impl PageSource for FileSource {
    fn fetch_page(&mut self) -> Outcome<Error, PageResponse> {
        let mut page = self
            .pages
            .pop_front()
            .unwrap_or_else(|| PageResponse::last(Vec::new()));
        if self.pages.is_empty() {
            page.has_more = false;
        }
        Outcome::Success(page)
    }
}
