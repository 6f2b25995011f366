//! Reader profile store adapters.

mod http;
mod json_file;

pub use http::HttpProfileStore;
pub use json_file::JsonFileProfileStore;
