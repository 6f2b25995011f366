//! Agent registry: the closed set of tutoring personas in a session.
//!
//! - [`topology::Topology`] - which persona set a deployment runs
//! - [`identity::Lens`] - the three parallel lenses
//! - [`identity::PipelineAgent`] - teacher, then two critics
//! - [`identity::AgentId`] - either of the above, for messages and display

pub mod identity;
pub mod topology;

pub use identity::{AgentId, Lens, PipelineAgent};
pub use topology::Topology;
