//! Reading session domain.
//!
//! - [`Session`] is the root aggregate: profile, phase and the in-flight guard
//! - [`Phase`] holds the data that only exists in one phase
//! - [`Conversation`] is the per-topology state while conversing
//! - [`Action`] / [`Effect`] / [`Transition`] describe one reducer step

pub mod action;
pub mod conversation;
pub mod phase;
mod reducer;

pub use action::{Action, ActionKind, Effect, InFlight, Rejection, Transition};
pub use conversation::{Conversation, LensConversation, PipelineConversation, PipelineStage};
pub use phase::{Phase, PhaseKind};
pub use reducer::Session;
