//! Conversation phases.

use super::conversation::Conversation;
use crate::content::ContentItem;
use crate::history::Transcript;
use serde::{Deserialize, Serialize};

/// The single active phase of a session.
///
/// Data that only exists in one phase lives inside that variant, so there is
/// no way to hold, say, an active agent outside `Conversing`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Phase {
    /// Entering name and levels
    #[default]
    ProfileSetup,
    /// Choosing a poem
    ContentSelection,
    /// Talking with the agents about `content`
    Conversing {
        content: ContentItem,
        conversation: Conversation,
    },
    /// Reviewing a finished conversation
    Summary {
        content: ContentItem,
        transcript: Transcript,
    },
}

impl Phase {
    pub fn kind(&self) -> PhaseKind {
        match self {
            Phase::ProfileSetup => PhaseKind::ProfileSetup,
            Phase::ContentSelection => PhaseKind::ContentSelection,
            Phase::Conversing { .. } => PhaseKind::Conversing,
            Phase::Summary { .. } => PhaseKind::Summary,
        }
    }
}

/// Data-free tag of a [`Phase`], for display, logging and comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseKind {
    ProfileSetup,
    ContentSelection,
    Conversing,
    Summary,
}

impl PhaseKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PhaseKind::ProfileSetup => "profile_setup",
            PhaseKind::ContentSelection => "content_selection",
            PhaseKind::Conversing => "conversing",
            PhaseKind::Summary => "summary",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PhaseKind::ProfileSetup => "Profile Setup",
            PhaseKind::ContentSelection => "Poem Selection",
            PhaseKind::Conversing => "Conversation",
            PhaseKind::Summary => "Summary",
        }
    }
}

impl std::fmt::Display for PhaseKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
