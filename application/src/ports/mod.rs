//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod content_catalog;
pub mod conversation_logger;
pub mod dictionary;
pub mod profile_store;
pub mod progress;
pub mod tutor_service;
