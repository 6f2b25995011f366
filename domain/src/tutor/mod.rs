//! Tutor service contract.
//!
//! The request/response shapes exchanged with the external tutor service.
//! The session reducer produces [`TutorRequest`]s; the application layer
//! sends them and feeds the resulting [`TutorReply`] back into the reducer.

use crate::agent::PipelineAgent;
use crate::content::ContentItem;
use crate::history::{Critiques, LensQuestions, Message};
use crate::profile::Profile;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies one dispatched request so its reply can be matched.
///
/// Tickets increase monotonically for the lifetime of a controller, across
/// resets, so a reply meant for a discarded session never matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Ticket(u64);

impl Ticket {
    pub(crate) fn first() -> Self {
        Ticket(1)
    }

    pub(crate) fn next(self) -> Self {
        Ticket(self.0 + 1)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What kind of request is outstanding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestKind {
    /// First question(s) for a freshly selected poem
    Opening,
    /// A reply to the reader's answer
    Round,
    /// Critic essays that unlock the critics
    Critique,
}

impl RequestKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestKind::Opening => "opening",
            RequestKind::Round => "round",
            RequestKind::Critique => "critique",
        }
    }
}

impl fmt::Display for RequestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which agent(s) a request addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Targets {
    /// All three lenses, regenerated together
    AllLenses,
    /// A single pipeline agent
    Agent(PipelineAgent),
}

/// Ask for the opening question(s) on a poem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpeningRequest {
    pub profile: Profile,
    pub content: ContentItem,
    pub targets: Targets,
}

/// Send the reader's input along with the projected history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RespondRequest {
    pub profile: Profile,
    pub content: ContentItem,
    /// Context as projected for the target(s); see the session reducer.
    pub history: Vec<Message>,
    pub input: String,
    pub targets: Targets,
    /// Latest lens questions, sent so all three can be regenerated together.
    pub questions: Option<LensQuestions>,
}

/// Ask both critics for their essays on a poem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CritiqueRequest {
    pub content: ContentItem,
}

/// A request the session wants sent to the tutor service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TutorRequest {
    Opening(OpeningRequest),
    Respond(RespondRequest),
    Critique(CritiqueRequest),
}

impl TutorRequest {
    pub fn kind(&self) -> RequestKind {
        match self {
            TutorRequest::Opening(_) => RequestKind::Opening,
            TutorRequest::Respond(_) => RequestKind::Round,
            TutorRequest::Critique(_) => RequestKind::Critique,
        }
    }

    pub fn targets(&self) -> Option<Targets> {
        match self {
            TutorRequest::Opening(r) => Some(r.targets),
            TutorRequest::Respond(r) => Some(r.targets),
            TutorRequest::Critique(_) => None,
        }
    }
}

/// What the tutor service answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TutorReply {
    /// Three lens questions produced together
    Lenses(LensQuestions),
    /// One message from one pipeline agent
    Agent { agent: PipelineAgent, text: String },
    /// Both critic essays
    Critiques(Critiques),
}

impl TutorReply {
    /// Number of agent messages carried by this reply.
    pub fn message_count(&self) -> usize {
        match self {
            TutorReply::Lenses(_) => 3,
            TutorReply::Agent { .. } => 1,
            TutorReply::Critiques(_) => 2,
        }
    }
}
