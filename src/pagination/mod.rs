//! Pagination module
//!
//! Page and item values, plus the offset strategy HTTP sources use to
//! request successive pages and decide whether another page exists.

mod strategies;
mod types;

pub use strategies::{OffsetCursor, OffsetPagination, ResponseLayout};
pub use types::{extract_path, Item, PageResponse};
