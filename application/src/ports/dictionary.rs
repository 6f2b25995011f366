//! Dictionary port
//!
//! Word lookup while reading. It sits beside the conversation and never
//! touches the session.

use async_trait::async_trait;
use thiserror::Error;
use tutor_domain::WordSense;

#[derive(Error, Debug)]
pub enum DictionaryError {
    #[error("Enter a word to look up")]
    EmptyWord,

    #[error("Dictionary request failed: {0}")]
    Http(String),

    #[error("Invalid dictionary response: {0}")]
    Decode(String),
}

#[async_trait]
pub trait Dictionary: Send + Sync {
    /// At most [`tutor_domain::MAX_SENSES`] senses, most common first.
    /// An unknown word yields an empty list, not an error.
    async fn lookup(&self, word: &str) -> Result<Vec<WordSense>, DictionaryError>;
}
