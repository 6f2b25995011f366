//! Domain error types

use thiserror::Error;

/// Domain-level errors raised while constructing value objects.
///
/// State-machine refusals are not errors in this sense; they are reported as
/// [`Rejection`](crate::session::Rejection) and leave the session untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Skill level {0} is out of range (expected 1-6)")]
    LevelOutOfRange(u8),

    #[error("Unknown skill dimension: {0}")]
    UnknownDimension(String),

    #[error("Unknown agent: {0}")]
    UnknownAgent(String),

    #[error("Unknown topology: {0}")]
    UnknownTopology(String),
}
