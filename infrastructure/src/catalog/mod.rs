//! Poem catalog adapters.

mod http;
mod tsv;

pub use http::HttpContentCatalog;
pub use tsv::{TsvContentCatalog, UNKNOWN_POET, UNTITLED, parse_tsv};
