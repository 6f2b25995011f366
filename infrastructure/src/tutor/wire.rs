//! JSON shapes exchanged with the tutor backend.
//!
//! Messages travel as `{role: "user" | "assistant", content}`; skill levels
//! as `{emp_state, ase_state, int_state}`; poems as
//! `{id, title, author, content}`.

use serde::{Deserialize, Serialize};
use tutor_domain::{
    ContentItem, Critiques, DomainError, LensQuestions, Message, Profile, Role, SkillLevels,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireMessage {
    pub role: String,
    pub content: String,
}

impl From<&Message> for WireMessage {
    fn from(message: &Message) -> Self {
        let role = match message.role() {
            Role::User => "user",
            Role::Agent => "assistant",
        };
        Self {
            role: role.to_string(),
            content: message.text().to_string(),
        }
    }
}

pub fn wire_history(history: &[Message]) -> Vec<WireMessage> {
    history.iter().map(WireMessage::from).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireLevels {
    pub emp_state: u8,
    pub ase_state: u8,
    pub int_state: u8,
}

impl From<&SkillLevels> for WireLevels {
    fn from(levels: &SkillLevels) -> Self {
        Self {
            emp_state: levels.empathy.value(),
            ase_state: levels.aesthetic.value(),
            int_state: levels.interpretive.value(),
        }
    }
}

impl TryFrom<WireLevels> for SkillLevels {
    type Error = DomainError;

    fn try_from(levels: WireLevels) -> Result<Self, Self::Error> {
        SkillLevels::from_values(levels.emp_state, levels.ase_state, levels.int_state)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WirePoem {
    pub id: u64,
    pub title: String,
    pub author: String,
    pub content: String,
}

impl From<&ContentItem> for WirePoem {
    fn from(item: &ContentItem) -> Self {
        Self {
            id: item.id,
            title: item.title.clone(),
            author: item.author.clone(),
            content: item.body.clone(),
        }
    }
}

impl From<WirePoem> for ContentItem {
    fn from(poem: WirePoem) -> Self {
        ContentItem::new(poem.id, poem.title, poem.author, poem.content)
    }
}

/// Body of `POST /api/chat/multi`.
#[derive(Debug, Serialize)]
pub struct MultiChatPayload {
    pub user_name: String,
    pub user_level: WireLevels,
    pub selected_poem: WirePoem,
    pub shared_chat_history: Vec<WireMessage>,
    pub user_input: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_questions: Option<LensBody>,
}

/// Body of `POST /api/chat/{teacher|criticA|criticB}`.
#[derive(Debug, Serialize)]
pub struct AgentChatPayload {
    pub user_name: String,
    pub user_level: WireLevels,
    pub selected_poem: WirePoem,
    pub chat_history: Vec<WireMessage>,
    pub user_input: String,
}

/// The three lens questions, as sent and received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LensBody {
    pub empathy: String,
    pub aesthetic: String,
    pub interpretive: String,
}

impl From<&LensQuestions> for LensBody {
    fn from(q: &LensQuestions) -> Self {
        Self {
            empathy: q.empathy.clone(),
            aesthetic: q.aesthetic.clone(),
            interpretive: q.interpretive.clone(),
        }
    }
}

impl From<LensBody> for LensQuestions {
    fn from(body: LensBody) -> Self {
        LensQuestions::new(body.empathy, body.aesthetic, body.interpretive)
    }
}

#[derive(Debug, Deserialize)]
pub struct AgentBody {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct CritiqueBody {
    pub critic_a: String,
    pub critic_b: String,
}

impl From<CritiqueBody> for Critiques {
    fn from(body: CritiqueBody) -> Self {
        Critiques::new(body.critic_a, body.critic_b)
    }
}

/// Body of `POST /api/profile/save`.
#[derive(Debug, Serialize)]
pub struct ProfilePayload {
    pub user_name: String,
    pub emp_state: u8,
    pub ase_state: u8,
    pub int_state: u8,
}

impl From<&Profile> for ProfilePayload {
    fn from(profile: &Profile) -> Self {
        let levels = WireLevels::from(profile.levels());
        Self {
            user_name: profile.display_name().to_string(),
            emp_state: levels.emp_state,
            ase_state: levels.ase_state,
            int_state: levels.int_state,
        }
    }
}

/// Response of `GET /api/profile/{user_name}`.
#[derive(Debug, Deserialize)]
pub struct ProfileBody {
    pub user_name: String,
    pub states: WireLevels,
    #[serde(default)]
    pub is_new: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tutor_domain::PipelineAgent;

    #[test]
    fn test_agent_messages_become_assistant() {
        let history = vec![
            Message::agent_from(PipelineAgent::Teacher, "어떤 느낌이었니?"),
            Message::user("슬펐어요"),
        ];
        let wire = wire_history(&history);
        assert_eq!(wire[0].role, "assistant");
        assert_eq!(wire[0].content, "어떤 느낌이었니?");
        assert_eq!(wire[1].role, "user");
    }

    #[test]
    fn test_levels_serialize_with_state_keys() {
        let levels = SkillLevels::from_values(2, 3, 4).unwrap();
        let json = serde_json::to_value(WireLevels::from(&levels)).unwrap();
        assert_eq!(json, serde_json::json!({"emp_state": 2, "ase_state": 3, "int_state": 4}));
    }

    #[test]
    fn test_out_of_range_levels_are_rejected() {
        let wire = WireLevels {
            emp_state: 0,
            ase_state: 1,
            int_state: 1,
        };
        assert!(SkillLevels::try_from(wire).is_err());
    }

    #[test]
    fn test_profile_body_defaults_is_new() {
        let body: ProfileBody = serde_json::from_str(
            r#"{"user_name":"A","states":{"emp_state":1,"ase_state":2,"int_state":3}}"#,
        )
        .unwrap();
        assert!(!body.is_new);
        assert_eq!(body.states.ase_state, 2);
    }
}
