//! Tutor service port
//!
//! Defines the interface for talking to the external tutor (the agent
//! backend that actually generates questions, replies and essays).

use async_trait::async_trait;
use thiserror::Error;
use tutor_domain::{CritiqueRequest, Critiques, OpeningRequest, RespondRequest, TutorReply};

/// Errors that can occur while talking to the tutor service
#[derive(Error, Debug)]
pub enum TutorError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Tutor service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Could not decode tutor reply: {0}")]
    Decode(String),

    #[error("Timeout")]
    Timeout,

    #[error("Unexpected reply: {0}")]
    UnexpectedReply(String),

    #[error("Request cancelled")]
    Cancelled,
}

/// Gateway to the tutor agents
///
/// Implementations (adapters) live in the infrastructure layer. Every call
/// resolves exactly once; retries are the reader's decision.
#[async_trait]
pub trait TutorService: Send + Sync {
    /// Opening question(s) for a freshly selected poem.
    ///
    /// Lens targets answer with [`TutorReply::Lenses`], the teacher with
    /// [`TutorReply::Agent`].
    async fn opening_round(&self, request: &OpeningRequest) -> Result<TutorReply, TutorError>;

    /// The agents' answer to the reader's input.
    async fn respond(&self, request: &RespondRequest) -> Result<TutorReply, TutorError>;

    /// Both critic essays on a poem.
    async fn critique(&self, request: &CritiqueRequest) -> Result<Critiques, TutorError>;
}
