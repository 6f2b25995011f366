//! Per-topology conversation state inside the `Conversing` phase.

use crate::agent::{AgentId, Lens, PipelineAgent, Topology};
use crate::history::{History, LensQuestions, Transcript};

/// Conversation state for one poem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Conversation {
    Lens(LensConversation),
    Pipeline(PipelineConversation),
}

impl Conversation {
    /// Empty conversation with nothing unlocked beyond the defaults.
    pub fn fresh(topology: Topology) -> Self {
        match topology {
            Topology::ParallelLens => Conversation::Lens(LensConversation::default()),
            Topology::SequentialPipeline => Conversation::Pipeline(PipelineConversation::default()),
        }
    }

    pub fn topology(&self) -> Topology {
        match self {
            Conversation::Lens(_) => Topology::ParallelLens,
            Conversation::Pipeline(_) => Topology::SequentialPipeline,
        }
    }

    /// True when no history holds any message.
    pub fn is_empty(&self) -> bool {
        match self {
            Conversation::Lens(c) => c.shared.is_empty(),
            Conversation::Pipeline(c) => PipelineAgent::ALL
                .iter()
                .all(|agent| c.history(*agent).is_empty()),
        }
    }

    /// Whether the opening request has already been answered.
    ///
    /// A reader message kept after a failed reply does not count; only a
    /// tutor message does.
    pub fn has_opened(&self) -> bool {
        match self {
            Conversation::Lens(c) => c.questions.is_some() || !c.shared.is_empty(),
            Conversation::Pipeline(c) => {
                c.teacher.messages().iter().any(|m| !m.is_user()) || c.critics_unlocked()
            }
        }
    }

    pub fn active_agent(&self) -> Option<AgentId> {
        match self {
            Conversation::Lens(_) => None,
            Conversation::Pipeline(c) => Some(c.active().into()),
        }
    }

    pub fn pending_selection(&self) -> Option<Lens> {
        match self {
            Conversation::Lens(c) => c.pending_selection,
            Conversation::Pipeline(_) => None,
        }
    }

    /// Agents the reader may currently address.
    pub fn unlocked(&self) -> Vec<AgentId> {
        match self {
            Conversation::Lens(_) => Lens::ALL.into_iter().map(AgentId::Lens).collect(),
            Conversation::Pipeline(c) => c.unlocked().into_iter().map(AgentId::Pipeline).collect(),
        }
    }

    pub fn transcript(&self) -> Transcript {
        match self {
            Conversation::Lens(c) => Transcript::Shared {
                history: c.shared.clone(),
            },
            Conversation::Pipeline(c) => Transcript::PerAgent {
                teacher: c.teacher.clone(),
                critic_a: c.critic_a.clone(),
                critic_b: c.critic_b.clone(),
            },
        }
    }
}

/// Parallel-lens state: one shared history all lenses observe.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LensConversation {
    pub(crate) shared: History,
    pub(crate) questions: Option<LensQuestions>,
    pub(crate) pending_selection: Option<Lens>,
}

impl LensConversation {
    pub fn shared(&self) -> &History {
        &self.shared
    }

    /// The three outstanding questions, once the opening round returned.
    pub fn questions(&self) -> Option<&LensQuestions> {
        self.questions.as_ref()
    }

    pub fn pending_selection(&self) -> Option<Lens> {
        self.pending_selection
    }
}

/// Where the pipeline is: teacher alone, or critics available too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PipelineStage {
    #[default]
    TeacherOnly,
    CriticsUnlocked { active: PipelineAgent },
}

/// Sequential-pipeline state: a private history per agent.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PipelineConversation {
    pub(crate) teacher: History,
    pub(crate) critic_a: History,
    pub(crate) critic_b: History,
    pub(crate) stage: PipelineStage,
}

impl PipelineConversation {
    pub fn history(&self, agent: PipelineAgent) -> &History {
        match agent {
            PipelineAgent::Teacher => &self.teacher,
            PipelineAgent::CriticA => &self.critic_a,
            PipelineAgent::CriticB => &self.critic_b,
        }
    }

    pub(crate) fn history_mut(&mut self, agent: PipelineAgent) -> &mut History {
        match agent {
            PipelineAgent::Teacher => &mut self.teacher,
            PipelineAgent::CriticA => &mut self.critic_a,
            PipelineAgent::CriticB => &mut self.critic_b,
        }
    }

    pub fn stage(&self) -> PipelineStage {
        self.stage
    }

    pub fn active(&self) -> PipelineAgent {
        match self.stage {
            PipelineStage::TeacherOnly => PipelineAgent::Teacher,
            PipelineStage::CriticsUnlocked { active } => active,
        }
    }

    pub fn critics_unlocked(&self) -> bool {
        matches!(self.stage, PipelineStage::CriticsUnlocked { .. })
    }

    pub fn is_unlocked(&self, agent: PipelineAgent) -> bool {
        !agent.is_critic() || self.critics_unlocked()
    }

    pub fn unlocked(&self) -> Vec<PipelineAgent> {
        PipelineAgent::ALL
            .into_iter()
            .filter(|agent| self.is_unlocked(*agent))
            .collect()
    }
}
