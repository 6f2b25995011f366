//! Infrastructure layer for verse-tutor
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod catalog;
pub mod config;
pub mod dictionary;
pub mod http;
pub mod logging;
pub mod profile;
pub mod tutor;

// Re-export commonly used types
pub use catalog::{HttpContentCatalog, TsvContentCatalog};
pub use config::{ConfigLoader, FileConfig, ProfileStoreKind};
pub use dictionary::HttpDictionary;
pub use http::{ApiClient, ApiError};
pub use logging::JsonlConversationLogger;
pub use profile::{HttpProfileStore, JsonFileProfileStore};
pub use tutor::HttpTutorService;
