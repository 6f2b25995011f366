//! Actions fed into the session reducer, and what a step produces.

use super::Session;
use super::phase::PhaseKind;
use crate::agent::{Lens, PipelineAgent, Topology};
use crate::content::ContentItem;
use crate::profile::Profile;
use crate::tutor::{RequestKind, Targets, Ticket, TutorReply, TutorRequest};
use std::fmt;
use thiserror::Error;

/// A discrete user action or service outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    SubmitProfile(Profile),
    SelectContent(ContentItem),
    /// Ask for the opening question(s) on the selected poem
    StartConversation,
    /// Choose which lens question the next reply answers
    SelectLens(Lens),
    SubmitReply(String),
    SwitchAgent(PipelineAgent),
    /// Request the critic essays that unlock the critics
    EndTeacherConversation,
    /// Resolution of a dispatched request. `Err` carries the failure text.
    ReplyReceived {
        ticket: Ticket,
        outcome: Result<TutorReply, String>,
    },
    EndConversation { confirmed: bool },
    ReadAnother,
    Reset { confirmed: bool },
}

/// Data-free tag of an [`Action`], for logging and dispatch on the kind alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    SubmitProfile,
    SelectContent,
    StartConversation,
    SelectLens,
    SubmitReply,
    SwitchAgent,
    EndTeacherConversation,
    ReplyReceived,
    EndConversation,
    ReadAnother,
    Reset,
}

impl ActionKind {
    pub fn name(&self) -> &'static str {
        match self {
            ActionKind::SubmitProfile => "submit_profile",
            ActionKind::SelectContent => "select_content",
            ActionKind::StartConversation => "start_conversation",
            ActionKind::SelectLens => "select_lens",
            ActionKind::SubmitReply => "submit_reply",
            ActionKind::SwitchAgent => "switch_agent",
            ActionKind::EndTeacherConversation => "end_teacher_conversation",
            ActionKind::ReplyReceived => "reply_received",
            ActionKind::EndConversation => "end_conversation",
            ActionKind::ReadAnother => "read_another",
            ActionKind::Reset => "reset",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::SubmitProfile(_) => ActionKind::SubmitProfile,
            Action::SelectContent(_) => ActionKind::SelectContent,
            Action::StartConversation => ActionKind::StartConversation,
            Action::SelectLens(_) => ActionKind::SelectLens,
            Action::SubmitReply(_) => ActionKind::SubmitReply,
            Action::SwitchAgent(_) => ActionKind::SwitchAgent,
            Action::EndTeacherConversation => ActionKind::EndTeacherConversation,
            Action::ReplyReceived { .. } => ActionKind::ReplyReceived,
            Action::EndConversation { .. } => ActionKind::EndConversation,
            Action::ReadAnother => ActionKind::ReadAnother,
            Action::Reset { .. } => ActionKind::Reset,
        }
    }

    pub fn name(&self) -> &'static str {
        self.kind().name()
    }
}

/// Side effect the caller must carry out after a step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Best-effort profile save; failure must not block the flow
    SaveProfile(Profile),
    /// Send `request`, then feed the outcome back as
    /// [`Action::ReplyReceived`] with the same ticket.
    Tutor { ticket: Ticket, request: TutorRequest },
}

/// Result of an accepted action.
#[derive(Debug, Clone)]
pub struct Transition {
    pub session: Session,
    pub effect: Effect,
    /// Set when a reply resolved as a failure (upstream error or a reply that
    /// did not fit the outstanding request). The guard is released either way.
    pub failure: Option<String>,
}

/// The outstanding request while the in-flight guard is held.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InFlight {
    pub ticket: Ticket,
    pub kind: RequestKind,
    pub targets: Option<Targets>,
}

/// Why an action was refused. A refused action never changes the session.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    #[error("Enter a name before continuing")]
    EmptyName,

    #[error("Input is empty")]
    EmptyInput,

    #[error("Select a lens question to answer first")]
    NoSelection,

    #[error("No lens questions yet; start the conversation first")]
    NoQuestions,

    #[error("A request is already in flight")]
    RequestInFlight,

    #[error("The opening round has already been requested")]
    AlreadyOpened,

    #[error("The critics are already unlocked")]
    AlreadyUnlocked,

    #[error("{0} is locked until the teacher conversation ends")]
    AgentLocked(PipelineAgent),

    #[error("This action needs confirmation")]
    ConfirmationRequired,

    #[error("'{action}' is not available during {phase}")]
    WrongPhase {
        action: &'static str,
        phase: PhaseKind,
    },

    #[error("'{action}' is not available with the {topology} topology")]
    WrongTopology {
        action: &'static str,
        topology: Topology,
    },

    #[error("Reply {0} does not match any outstanding request")]
    StaleReply(Ticket),
}

impl Rejection {
    /// True for refusals the UI should resolve by asking the reader to confirm.
    pub fn needs_confirmation(&self) -> bool {
        matches!(self, Rejection::ConfirmationRequired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_kind_names() {
        assert_eq!(Action::StartConversation.kind(), ActionKind::StartConversation);
        assert_eq!(
            Action::Reset { confirmed: true }.name(),
            ActionKind::Reset.to_string()
        );
        assert_eq!(
            Action::SubmitReply("hi".to_string()).name(),
            "submit_reply"
        );
    }
}
