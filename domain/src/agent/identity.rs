//! Agent identities.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the three parallel tutoring lenses. No lens takes precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Lens {
    Empathy,
    Aesthetic,
    Interpretive,
}

impl Lens {
    pub const ALL: [Lens; 3] = [Lens::Empathy, Lens::Aesthetic, Lens::Interpretive];

    /// Key used by the tutor backend.
    pub fn key(&self) -> &'static str {
        match self {
            Lens::Empathy => "empathy",
            Lens::Aesthetic => "aesthetic",
            Lens::Interpretive => "interpretive",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Lens::Empathy => "Lens 1",
            Lens::Aesthetic => "Lens 2",
            Lens::Interpretive => "Lens 3",
        }
    }
}

impl fmt::Display for Lens {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl std::str::FromStr for Lens {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "empathy" | "e" | "1" => Ok(Lens::Empathy),
            "aesthetic" | "a" | "2" => Ok(Lens::Aesthetic),
            "interpretive" | "i" | "3" => Ok(Lens::Interpretive),
            _ => Err(DomainError::UnknownAgent(s.to_string())),
        }
    }
}

/// One stage of the sequential pipeline: the teacher must finish before the
/// critics unlock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PipelineAgent {
    #[serde(rename = "teacher")]
    Teacher,
    #[serde(rename = "criticA")]
    CriticA,
    #[serde(rename = "criticB")]
    CriticB,
}

impl PipelineAgent {
    pub const ALL: [PipelineAgent; 3] = [
        PipelineAgent::Teacher,
        PipelineAgent::CriticA,
        PipelineAgent::CriticB,
    ];

    /// Key used by the tutor backend route (`/api/chat/{key}`).
    pub fn key(&self) -> &'static str {
        match self {
            PipelineAgent::Teacher => "teacher",
            PipelineAgent::CriticA => "criticA",
            PipelineAgent::CriticB => "criticB",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PipelineAgent::Teacher => "Teacher",
            PipelineAgent::CriticA => "Critic A",
            PipelineAgent::CriticB => "Critic B",
        }
    }

    pub fn is_critic(&self) -> bool {
        !matches!(self, PipelineAgent::Teacher)
    }
}

impl fmt::Display for PipelineAgent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl std::str::FromStr for PipelineAgent {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['-', '_', ' '], "").as_str() {
            "teacher" | "t" => Ok(PipelineAgent::Teacher),
            "critica" | "a" => Ok(PipelineAgent::CriticA),
            "criticb" | "b" => Ok(PipelineAgent::CriticB),
            _ => Err(DomainError::UnknownAgent(s.to_string())),
        }
    }
}

/// Any agent identity, used where both topologies meet (messages, display).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AgentId {
    Lens(Lens),
    Pipeline(PipelineAgent),
}

impl AgentId {
    pub fn key(&self) -> &'static str {
        match self {
            AgentId::Lens(lens) => lens.key(),
            AgentId::Pipeline(agent) => agent.key(),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AgentId::Lens(lens) => lens.label(),
            AgentId::Pipeline(agent) => agent.label(),
        }
    }
}

impl From<Lens> for AgentId {
    fn from(lens: Lens) -> Self {
        AgentId::Lens(lens)
    }
}

impl From<PipelineAgent> for AgentId {
    fn from(agent: PipelineAgent) -> Self {
        AgentId::Pipeline(agent)
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}
