//! The session aggregate and its reducer.
//!
//! [`Session::apply`] is a pure function of the current session and one
//! [`Action`]. It either refuses the action with a [`Rejection`] (the session
//! is untouched) or returns the next session plus the [`Effect`] the caller
//! has to carry out.
//!
//! # History projection
//!
//! - Lens topology: the answered question and the answer are committed to the
//!   shared history as one round, then the whole shared history (including
//!   that round) is sent with the answer and the three current questions.
//! - Pipeline topology: the active agent's own history is sent as it was
//!   *before* the reader's message; the message itself travels as `input`
//!   and is appended locally right away.
//!
//! On failure the reader's message stays in the history and no agent
//! message is added.

use super::action::{Action, Effect, InFlight, Rejection, Transition};
use super::conversation::{Conversation, PipelineStage};
use super::phase::{Phase, PhaseKind};
use crate::agent::{AgentId, Lens, PipelineAgent, Topology};
use crate::content::ContentItem;
use crate::core::text::non_blank;
use crate::history::{Message, Transcript};
use crate::profile::Profile;
use crate::tutor::{
    CritiqueRequest, OpeningRequest, RequestKind, RespondRequest, Targets, Ticket, TutorReply,
    TutorRequest,
};

/// Root aggregate of one reading session (Entity).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    topology: Topology,
    profile: Profile,
    phase: Phase,
    in_flight: Option<InFlight>,
    next_ticket: Ticket,
}

impl Session {
    pub fn new(topology: Topology) -> Self {
        Self {
            topology,
            profile: Profile::default(),
            phase: Phase::ProfileSetup,
            in_flight: None,
            next_ticket: Ticket::first(),
        }
    }

    pub fn topology(&self) -> Topology {
        self.topology
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn phase_kind(&self) -> PhaseKind {
        self.phase.kind()
    }

    pub fn content(&self) -> Option<&ContentItem> {
        match &self.phase {
            Phase::Conversing { content, .. } | Phase::Summary { content, .. } => Some(content),
            Phase::ProfileSetup | Phase::ContentSelection => None,
        }
    }

    pub fn conversation(&self) -> Option<&Conversation> {
        match &self.phase {
            Phase::Conversing { conversation, .. } => Some(conversation),
            _ => None,
        }
    }

    /// Histories of the current or just-finished conversation.
    pub fn transcript(&self) -> Option<Transcript> {
        match &self.phase {
            Phase::Conversing { conversation, .. } => Some(conversation.transcript()),
            Phase::Summary { transcript, .. } => Some(transcript.clone()),
            Phase::ProfileSetup | Phase::ContentSelection => None,
        }
    }

    pub fn active_agent(&self) -> Option<AgentId> {
        self.conversation().and_then(Conversation::active_agent)
    }

    pub fn pending_selection(&self) -> Option<Lens> {
        self.conversation().and_then(Conversation::pending_selection)
    }

    pub fn unlocked(&self) -> Vec<AgentId> {
        self.conversation()
            .map(Conversation::unlocked)
            .unwrap_or_default()
    }

    pub fn in_flight(&self) -> Option<&InFlight> {
        self.in_flight.as_ref()
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Apply one action.
    pub fn apply(&self, action: Action) -> Result<Transition, Rejection> {
        let mut next = self.clone();
        let mut failure = None;

        let effect = match action {
            Action::SubmitProfile(profile) => next.submit_profile(profile)?,
            Action::SelectContent(content) => next.select_content(content)?,
            Action::StartConversation => next.start_conversation()?,
            Action::SelectLens(lens) => next.select_lens(lens)?,
            Action::SubmitReply(text) => next.submit_reply(&text)?,
            Action::SwitchAgent(agent) => next.switch_agent(agent)?,
            Action::EndTeacherConversation => next.end_teacher_conversation()?,
            Action::ReplyReceived { ticket, outcome } => {
                failure = next.reply_received(ticket, outcome)?;
                Effect::None
            }
            Action::EndConversation { confirmed } => next.end_conversation(confirmed)?,
            Action::ReadAnother => next.read_another()?,
            Action::Reset { confirmed } => next.reset(confirmed)?,
        };

        Ok(Transition {
            session: next,
            effect,
            failure,
        })
    }

    // ==================== Phase transitions ====================

    fn submit_profile(&mut self, profile: Profile) -> Result<Effect, Rejection> {
        self.expect_phase("submit_profile", PhaseKind::ProfileSetup)?;
        if !profile.has_name() {
            return Err(Rejection::EmptyName);
        }
        self.profile = profile.clone();
        self.phase = Phase::ContentSelection;
        Ok(Effect::SaveProfile(profile))
    }

    fn select_content(&mut self, content: ContentItem) -> Result<Effect, Rejection> {
        self.expect_phase("select_content", PhaseKind::ContentSelection)?;
        self.phase = Phase::Conversing {
            content,
            conversation: Conversation::fresh(self.topology),
        };
        Ok(Effect::None)
    }

    fn end_conversation(&mut self, confirmed: bool) -> Result<Effect, Rejection> {
        let conversation = self.conversation_mut("end_conversation")?;
        let is_empty = conversation.is_empty();
        self.ensure_idle()?;
        if is_empty && !confirmed {
            return Err(Rejection::ConfirmationRequired);
        }

        if let Phase::Conversing {
            content,
            conversation,
        } = std::mem::take(&mut self.phase)
        {
            self.phase = Phase::Summary {
                content,
                transcript: conversation.transcript(),
            };
        }
        Ok(Effect::None)
    }

    fn read_another(&mut self) -> Result<Effect, Rejection> {
        self.expect_phase("read_another", PhaseKind::Summary)?;
        self.phase = Phase::ContentSelection;
        Ok(Effect::None)
    }

    fn reset(&mut self, confirmed: bool) -> Result<Effect, Rejection> {
        if !confirmed {
            return Err(Rejection::ConfirmationRequired);
        }
        let next_ticket = self.next_ticket;
        *self = Session::new(self.topology);
        self.next_ticket = next_ticket;
        Ok(Effect::None)
    }

    // ==================== Turn taking ====================

    fn start_conversation(&mut self) -> Result<Effect, Rejection> {
        let request = {
            let phase = self.phase.kind();
            let Phase::Conversing {
                content,
                conversation,
            } = &self.phase
            else {
                return Err(wrong_phase("start_conversation", phase));
            };
            if self.in_flight.is_some() {
                return Err(Rejection::RequestInFlight);
            }
            if conversation.has_opened() {
                return Err(Rejection::AlreadyOpened);
            }
            let targets = match conversation {
                Conversation::Lens(_) => Targets::AllLenses,
                Conversation::Pipeline(_) => Targets::Agent(PipelineAgent::Teacher),
            };
            TutorRequest::Opening(OpeningRequest {
                profile: self.profile.clone(),
                content: content.clone(),
                targets,
            })
        };
        Ok(self.dispatch(request))
    }

    fn select_lens(&mut self, lens: Lens) -> Result<Effect, Rejection> {
        let busy = self.in_flight.is_some();
        let topology = self.topology;
        let Conversation::Lens(conversation) = self.conversation_mut("select_lens")? else {
            return Err(Rejection::WrongTopology {
                action: "select_lens",
                topology,
            });
        };
        if busy {
            return Err(Rejection::RequestInFlight);
        }
        if conversation.questions.is_none() {
            return Err(Rejection::NoQuestions);
        }
        conversation.pending_selection = Some(lens);
        Ok(Effect::None)
    }

    fn submit_reply(&mut self, text: &str) -> Result<Effect, Rejection> {
        let phase = self.phase.kind();
        if phase != PhaseKind::Conversing {
            return Err(wrong_phase("submit_reply", phase));
        }
        let input = non_blank(text).ok_or(Rejection::EmptyInput)?.to_string();
        self.ensure_idle()?;

        let profile = self.profile.clone();
        let Phase::Conversing {
            content,
            conversation,
        } = &mut self.phase
        else {
            return Err(wrong_phase("submit_reply", phase));
        };
        let content = content.clone();

        let request = match conversation {
            Conversation::Lens(c) => {
                let lens = c.pending_selection.ok_or(Rejection::NoSelection)?;
                let questions = c.questions.clone().ok_or(Rejection::NoQuestions)?;
                c.shared.commit_round(questions.get(lens), &input);
                c.pending_selection = None;
                RespondRequest {
                    profile,
                    content,
                    history: c.shared.messages().to_vec(),
                    input,
                    targets: Targets::AllLenses,
                    questions: Some(questions),
                }
            }
            Conversation::Pipeline(c) => {
                let agent = c.active();
                let history = c.history(agent).messages().to_vec();
                c.history_mut(agent).push(Message::user(input.clone()));
                RespondRequest {
                    profile,
                    content,
                    history,
                    input,
                    targets: Targets::Agent(agent),
                    questions: None,
                }
            }
        };

        Ok(self.dispatch(TutorRequest::Respond(request)))
    }

    fn switch_agent(&mut self, agent: PipelineAgent) -> Result<Effect, Rejection> {
        let busy = self.in_flight.is_some();
        let topology = self.topology;
        let Conversation::Pipeline(conversation) = self.conversation_mut("switch_agent")? else {
            return Err(Rejection::WrongTopology {
                action: "switch_agent",
                topology,
            });
        };
        if busy {
            return Err(Rejection::RequestInFlight);
        }
        if !conversation.is_unlocked(agent) {
            return Err(Rejection::AgentLocked(agent));
        }
        if conversation.critics_unlocked() {
            conversation.stage = PipelineStage::CriticsUnlocked { active: agent };
        }
        Ok(Effect::None)
    }

    fn end_teacher_conversation(&mut self) -> Result<Effect, Rejection> {
        let request = {
            let phase = self.phase.kind();
            let Phase::Conversing {
                content,
                conversation,
            } = &self.phase
            else {
                return Err(wrong_phase("end_teacher_conversation", phase));
            };
            let Conversation::Pipeline(pipeline) = conversation else {
                return Err(Rejection::WrongTopology {
                    action: "end_teacher_conversation",
                    topology: self.topology,
                });
            };
            if self.in_flight.is_some() {
                return Err(Rejection::RequestInFlight);
            }
            if pipeline.critics_unlocked() {
                return Err(Rejection::AlreadyUnlocked);
            }
            TutorRequest::Critique(CritiqueRequest {
                content: content.clone(),
            })
        };
        Ok(self.dispatch(request))
    }

    /// Merge a reply into the conversation and release the guard.
    ///
    /// Returns the failure text when the reply could not be merged.
    fn reply_received(
        &mut self,
        ticket: Ticket,
        outcome: Result<TutorReply, String>,
    ) -> Result<Option<String>, Rejection> {
        let in_flight = self
            .in_flight
            .filter(|f| f.ticket == ticket)
            .ok_or(Rejection::StaleReply(ticket))?;
        self.in_flight = None;

        let reply = match outcome {
            Ok(reply) => reply,
            Err(message) => return Ok(Some(message)),
        };

        let phase = self.phase.kind();
        let Phase::Conversing { conversation, .. } = &mut self.phase else {
            return Ok(Some(format!("reply {ticket} arrived during {phase}")));
        };

        let failure = match (in_flight.kind, conversation, reply) {
            (
                RequestKind::Opening | RequestKind::Round,
                Conversation::Lens(c),
                TutorReply::Lenses(questions),
            ) => {
                c.questions = Some(questions);
                None
            }
            (
                RequestKind::Opening | RequestKind::Round,
                Conversation::Pipeline(c),
                TutorReply::Agent { agent, text },
            ) if in_flight.targets == Some(Targets::Agent(agent)) => {
                c.history_mut(agent).push(Message::agent_from(agent, text));
                None
            }
            (RequestKind::Critique, Conversation::Pipeline(c), TutorReply::Critiques(critiques)) => {
                c.critic_a.push(Message::agent_from(
                    PipelineAgent::CriticA,
                    critiques.critic_a,
                ));
                c.critic_b.push(Message::agent_from(
                    PipelineAgent::CriticB,
                    critiques.critic_b,
                ));
                c.stage = PipelineStage::CriticsUnlocked {
                    active: PipelineAgent::CriticA,
                };
                None
            }
            (kind, _, reply) => Some(format!(
                "reply with {} message(s) does not fit the outstanding {kind} request",
                reply.message_count()
            )),
        };
        Ok(failure)
    }

    // ==================== Helpers ====================

    fn dispatch(&mut self, request: TutorRequest) -> Effect {
        let ticket = self.next_ticket;
        self.next_ticket = ticket.next();
        self.in_flight = Some(InFlight {
            ticket,
            kind: request.kind(),
            targets: request.targets(),
        });
        Effect::Tutor { ticket, request }
    }

    fn ensure_idle(&self) -> Result<(), Rejection> {
        if self.in_flight.is_some() {
            Err(Rejection::RequestInFlight)
        } else {
            Ok(())
        }
    }

    fn expect_phase(&self, action: &'static str, expected: PhaseKind) -> Result<(), Rejection> {
        let phase = self.phase.kind();
        if phase == expected {
            Ok(())
        } else {
            Err(wrong_phase(action, phase))
        }
    }

    fn conversation_mut(&mut self, action: &'static str) -> Result<&mut Conversation, Rejection> {
        let phase = self.phase.kind();
        match &mut self.phase {
            Phase::Conversing { conversation, .. } => Ok(conversation),
            _ => Err(wrong_phase(action, phase)),
        }
    }
}

fn wrong_phase(action: &'static str, phase: PhaseKind) -> Rejection {
    Rejection::WrongPhase { action, phase }
}
