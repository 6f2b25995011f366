//! Domain layer for verse-tutor
//!
//! This crate contains the core reading-session logic, entities, and value
//! objects. It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Session
//!
//! A reading session walks a reader through four phases: profile setup,
//! poem selection, conversation and summary. [`Session::apply`] is a pure
//! reducer; the application layer performs the [`Effect`]s it returns.
//!
//! ## Topology
//!
//! - **ParallelLens** (default): three lenses share one history and ask
//!   their questions together; the reader answers one per round
//! - **SequentialPipeline**: a teacher first, then two critics unlocked by
//!   ending the teacher conversation; each agent keeps a private history

pub mod agent;
pub mod config;
pub mod content;
pub mod core;
pub mod history;
pub mod profile;
pub mod session;
pub mod tutor;

// Re-export commonly used types
pub use agent::{AgentId, Lens, PipelineAgent, Topology};
pub use config::{ConfigIssue, ConfigIssueCode, Severity};
pub use content::{ContentItem, MAX_SENSES, WordSense};
pub use core::error::DomainError;
pub use history::{Critiques, History, LensQuestions, Message, Role, Transcript};
pub use profile::{Profile, SkillDimension, SkillLevel, SkillLevels};
pub use session::{
    Action, ActionKind, Conversation, Effect, InFlight, LensConversation, Phase, PhaseKind,
    PipelineConversation, PipelineStage, Rejection, Session, Transition,
};
pub use tutor::{
    CritiqueRequest, OpeningRequest, RequestKind, RespondRequest, Targets, Ticket, TutorReply,
    TutorRequest,
};
