//! Application layer for verse-tutor
//!
//! This crate contains the conversation use case and the port definitions
//! its adapters implement. It depends only on the domain layer.

pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use ports::{
    content_catalog::{CatalogError, ContentCatalog},
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    dictionary::{Dictionary, DictionaryError},
    profile_store::{ProfileStore, ProfileStoreError},
    progress::{NoProgress, ProgressNotifier},
    tutor_service::{TutorError, TutorService},
};
pub use use_cases::conversation::{ControllerError, ConversationController};
