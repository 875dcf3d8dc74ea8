//! JSON Lines sink

use super::ItemSink;
use crate::error::{Error, Result};
use crate::outcome::Outcome;
use crate::pagination::Item;
use std::fs::File;
use std::io::{self, BufWriter, Stdout, Write};
use std::path::Path;
use tracing::debug;

/// Writes each item as one line of JSON
///
/// The writer is flushed after every page, so a page is only reported as
/// published once it has left the buffer.
#[derive(Debug)]
pub struct JsonlSink<W: Write> {
    writer: W,
    written: u64,
}

impl<W: Write> JsonlSink<W> {
    /// Wrap an existing writer
    pub fn new(writer: W) -> Self {
        Self { writer, written: 0 }
    }

    /// Number of items written so far
    pub fn written(&self) -> u64 {
        self.written
    }

    /// Consume the sink, returning the writer
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_page(&mut self, items: &[Item]) -> Result<()> {
        for item in items {
            serde_json::to_writer(&mut self.writer, item)?;
            self.writer.write_all(b"\n")?;
        }
        self.writer.flush()?;
        self.written += items.len() as u64;
        Ok(())
    }
}

impl JsonlSink<Stdout> {
    /// Write to standard output
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl JsonlSink<BufWriter<File>> {
    /// Create (or truncate) a file and write to it
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let file = File::create(path)?;
        debug!(path = %path.display(), "Opened output file");
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> ItemSink for JsonlSink<W> {
    fn publish(&mut self, items: &[Item]) -> Outcome<Error, bool> {
        if items.is_empty() {
            return Outcome::Success(true);
        }
        Outcome::from(self.write_page(items))
            .map(|()| true)
            .map_failure(Error::publish)
    }
}
