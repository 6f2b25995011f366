//! Message histories.
//!
//! - [`Message`] - one immutable utterance by the reader or an agent
//! - [`History`] - an append-only ordered log of messages
//! - [`LensQuestions`] - the three outstanding lens questions
//! - [`Critiques`] - the two critic essays that unlock the critics
//! - [`Transcript`] - read-only histories kept for the summary screen

use crate::agent::{AgentId, Lens, PipelineAgent};
use serde::{Deserialize, Serialize};

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Agent,
}

/// A message in a conversation (Entity)
///
/// `produced_by` is only set on agent messages in histories that need to
/// tell agents apart. The shared lens history never sets it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    role: Role,
    text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    produced_by: Option<AgentId>,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
            produced_by: None,
        }
    }

    /// An agent message with no identity attached.
    pub fn agent(text: impl Into<String>) -> Self {
        Self {
            role: Role::Agent,
            text: text.into(),
            produced_by: None,
        }
    }

    pub fn agent_from(agent: impl Into<AgentId>, text: impl Into<String>) -> Self {
        Self {
            role: Role::Agent,
            text: text.into(),
            produced_by: Some(agent.into()),
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn produced_by(&self) -> Option<AgentId> {
        self.produced_by
    }

    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }
}

/// An append-only message log.
///
/// There is no way to remove or reorder entries; a history only goes away
/// when its whole conversation is discarded.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct History(Vec<Message>);

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[Message] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.0.last()
    }

    pub(crate) fn push(&mut self, message: Message) {
        self.0.push(message);
    }

    /// Append an answered question and its answer as one unit.
    ///
    /// The question is stored without an agent label.
    pub(crate) fn commit_round(&mut self, question: &str, answer: &str) {
        self.0.reserve(2);
        self.0.push(Message::agent(question));
        self.0.push(Message::user(answer));
    }
}

/// The current question from each lens. All three are always produced
/// together so they refer to the same point in the shared history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LensQuestions {
    pub empathy: String,
    pub aesthetic: String,
    pub interpretive: String,
}

impl LensQuestions {
    pub fn new(
        empathy: impl Into<String>,
        aesthetic: impl Into<String>,
        interpretive: impl Into<String>,
    ) -> Self {
        Self {
            empathy: empathy.into(),
            aesthetic: aesthetic.into(),
            interpretive: interpretive.into(),
        }
    }

    pub fn get(&self, lens: Lens) -> &str {
        match lens {
            Lens::Empathy => &self.empathy,
            Lens::Aesthetic => &self.aesthetic,
            Lens::Interpretive => &self.interpretive,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Lens, &str)> {
        Lens::ALL.into_iter().map(move |lens| (lens, self.get(lens)))
    }
}

/// Opening essays written by the two critics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Critiques {
    pub critic_a: String,
    pub critic_b: String,
}

impl Critiques {
    pub fn new(critic_a: impl Into<String>, critic_b: impl Into<String>) -> Self {
        Self {
            critic_a: critic_a.into(),
            critic_b: critic_b.into(),
        }
    }
}

/// Histories of a finished conversation, kept for review on the summary
/// screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "topology", rename_all = "snake_case")]
pub enum Transcript {
    Shared { history: History },
    PerAgent {
        teacher: History,
        critic_a: History,
        critic_b: History,
    },
}

impl Transcript {
    pub fn message_count(&self) -> usize {
        match self {
            Transcript::Shared { history } => history.len(),
            Transcript::PerAgent {
                teacher,
                critic_a,
                critic_b,
            } => teacher.len() + critic_a.len() + critic_b.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.message_count() == 0
    }

    /// Each history with the agent it belongs to (`None` for the shared log).
    pub fn sections(&self) -> Vec<(Option<PipelineAgent>, &History)> {
        match self {
            Transcript::Shared { history } => vec![(None, history)],
            Transcript::PerAgent {
                teacher,
                critic_a,
                critic_b,
            } => vec![
                (Some(PipelineAgent::Teacher), teacher),
                (Some(PipelineAgent::CriticA), critic_a),
                (Some(PipelineAgent::CriticB), critic_b),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commit_round_appends_question_then_answer() {
        let mut history = History::new();
        history.commit_round("How does the speaker feel?", "I feel sad");

        assert_eq!(history.len(), 2);
        let messages = history.messages();
        assert_eq!(messages[0].role(), Role::Agent);
        assert_eq!(messages[0].text(), "How does the speaker feel?");
        assert_eq!(messages[0].produced_by(), None);
        assert_eq!(messages[1].role(), Role::User);
        assert_eq!(messages[1].text(), "I feel sad");
    }

    #[test]
    fn test_agent_from_keeps_identity() {
        let message = Message::agent_from(PipelineAgent::Teacher, "Welcome");
        assert_eq!(
            message.produced_by(),
            Some(AgentId::Pipeline(PipelineAgent::Teacher))
        );
        assert!(!message.is_user());
    }

    #[test]
    fn test_lens_questions_lookup() {
        let questions = LensQuestions::new("q1", "q2", "q3");
        assert_eq!(questions.get(Lens::Aesthetic), "q2");
        let collected: Vec<_> = questions.iter().map(|(_, q)| q).collect();
        assert_eq!(collected, vec!["q1", "q2", "q3"]);
    }

    #[test]
    fn test_unlabelled_message_serializes_without_produced_by() {
        let json = serde_json::to_value(Message::agent("q")).unwrap();
        assert!(json.get("produced_by").is_none());
        assert_eq!(json["role"], "agent");
    }

    #[test]
    fn test_transcript_counts_all_sections() {
        let mut teacher = History::new();
        teacher.push(Message::agent_from(PipelineAgent::Teacher, "hi"));
        let mut critic_a = History::new();
        critic_a.push(Message::agent_from(PipelineAgent::CriticA, "essay"));
        let transcript = Transcript::PerAgent {
            teacher,
            critic_a,
            critic_b: History::new(),
        };
        assert_eq!(transcript.message_count(), 2);
        assert_eq!(transcript.sections().len(), 3);
        assert!(!transcript.is_empty());
    }
}
