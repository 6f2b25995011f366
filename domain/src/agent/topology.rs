//! Conversation topology definitions.
//!
//! Defines [`Topology`], selected once per deployment:
//! - ParallelLens: three lenses question the reader side by side
//! - SequentialPipeline: a teacher first, then two critics once unlocked

use crate::agent::identity::{AgentId, Lens, PipelineAgent};
use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How the personas of a session are arranged.
///
/// # ParallelLens vs SequentialPipeline
///
/// - **ParallelLens** (default): empathy, aesthetic and interpretive lenses
///   all observe one shared history and each offer a question every round.
///   The reader picks one question to answer.
///
/// - **SequentialPipeline**: the teacher converses alone until the reader
///   ends that phase; two critic essays are then generated and both critics
///   become selectable. Every agent keeps a private history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Topology {
    #[default]
    ParallelLens,
    SequentialPipeline,
}

impl Topology {
    /// All agents of this topology, in display order.
    pub fn agents(&self) -> Vec<AgentId> {
        match self {
            Topology::ParallelLens => Lens::ALL.into_iter().map(AgentId::Lens).collect(),
            Topology::SequentialPipeline => PipelineAgent::ALL
                .into_iter()
                .map(AgentId::Pipeline)
                .collect(),
        }
    }

    /// Get a human-readable description of this topology
    pub fn description(&self) -> &'static str {
        match self {
            Topology::ParallelLens => "Lens: three tutors question you side by side",
            Topology::SequentialPipeline => "Pipeline: a teacher first, then two critics",
        }
    }

    pub fn is_pipeline(&self) -> bool {
        matches!(self, Topology::SequentialPipeline)
    }
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Topology::ParallelLens => write!(f, "lens"),
            Topology::SequentialPipeline => write!(f, "pipeline"),
        }
    }
}

impl std::str::FromStr for Topology {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lens" | "lenses" | "parallel" | "parallel_lens" | "l" => Ok(Topology::ParallelLens),
            "pipeline" | "sequential" | "sequential_pipeline" | "p" => {
                Ok(Topology::SequentialPipeline)
            }
            _ => Err(DomainError::UnknownTopology(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Topology::ParallelLens), "lens");
        assert_eq!(format!("{}", Topology::SequentialPipeline), "pipeline");
    }

    #[test]
    fn test_default() {
        assert_eq!(Topology::default(), Topology::ParallelLens);
    }

    #[test]
    fn test_from_str() {
        assert_eq!("lens".parse::<Topology>().ok(), Some(Topology::ParallelLens));
        assert_eq!("P".parse::<Topology>().ok(), Some(Topology::SequentialPipeline));
        assert_eq!(
            "sequential".parse::<Topology>().ok(),
            Some(Topology::SequentialPipeline)
        );
        assert!("round-robin".parse::<Topology>().is_err());
    }

    #[test]
    fn test_agents_are_three_per_topology() {
        assert_eq!(Topology::ParallelLens.agents().len(), 3);
        assert_eq!(
            Topology::SequentialPipeline.agents()[0],
            AgentId::Pipeline(PipelineAgent::Teacher)
        );
    }
}
