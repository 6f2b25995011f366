//! Profile store port
//!
//! Persists reader profiles. Saving is best effort: the session never waits
//! on or fails because of the store.

use async_trait::async_trait;
use thiserror::Error;
use tutor_domain::Profile;

#[derive(Error, Debug)]
pub enum ProfileStoreError {
    #[error("Profile store I/O error: {0}")]
    Io(String),

    #[error("Profile data is invalid: {0}")]
    Serialization(String),

    #[error("Profile request failed: {0}")]
    Http(String),
}

#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Insert or replace the profile stored under its display name.
    async fn save(&self, profile: &Profile) -> Result<(), ProfileStoreError>;

    /// A previously saved profile, if any.
    async fn load(&self, display_name: &str) -> Result<Option<Profile>, ProfileStoreError>;
}
