//! [`TutorService`] over the tutor backend's chat routes.

use super::wire::{
    AgentBody, AgentChatPayload, CritiqueBody, LensBody, MultiChatPayload, WireLevels, WirePoem,
    wire_history,
};
use crate::http::{ApiClient, ApiError};
use async_trait::async_trait;
use tracing::{debug, info};
use tutor_application::ports::tutor_service::{TutorError, TutorService};
use tutor_domain::{
    ContentItem, CritiqueRequest, Critiques, LensQuestions, Message, OpeningRequest,
    PipelineAgent, Profile, RespondRequest, Targets, TutorReply,
};

/// Kick-off input for the lens opening round.
pub const LENS_OPENING_INPUT: &str = "시를 선택했어. 각자의 목표 분야에서 첫 질문을 던져줘.";
/// Kick-off input for the teacher's greeting.
pub const TEACHER_OPENING_INPUT: &str = "시를 선택했어. 첫 인사를 건네주렴.";

impl From<ApiError> for TutorError {
    fn from(e: ApiError) -> Self {
        match e {
            ApiError::Connection(msg) => TutorError::Connection(msg),
            ApiError::Timeout => TutorError::Timeout,
            ApiError::Status { status, body } => TutorError::Status { status, body },
            ApiError::Decode(msg) => TutorError::Decode(msg),
        }
    }
}

/// Tutor adapter speaking JSON to `{base_url}/api/chat/...`.
pub struct HttpTutorService {
    api: ApiClient,
}

impl HttpTutorService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    async fn lenses(
        &self,
        profile: &Profile,
        content: &ContentItem,
        history: &[Message],
        input: &str,
        questions: Option<&LensQuestions>,
    ) -> Result<TutorReply, TutorError> {
        let payload = MultiChatPayload {
            user_name: profile.display_name().to_string(),
            user_level: WireLevels::from(profile.levels()),
            selected_poem: WirePoem::from(content),
            shared_chat_history: wire_history(history),
            user_input: input.to_string(),
            latest_questions: questions.map(LensBody::from),
        };
        let body: LensBody = self.api.post_json("/api/chat/multi", &payload).await?;
        debug!("Lens questions received for poem {}", content.id);
        Ok(TutorReply::Lenses(body.into()))
    }

    async fn agent(
        &self,
        agent: PipelineAgent,
        profile: &Profile,
        content: &ContentItem,
        history: &[Message],
        input: &str,
    ) -> Result<TutorReply, TutorError> {
        let payload = AgentChatPayload {
            user_name: profile.display_name().to_string(),
            user_level: WireLevels::from(profile.levels()),
            selected_poem: WirePoem::from(content),
            chat_history: wire_history(history),
            user_input: input.to_string(),
        };
        let route = format!("/api/chat/{}", agent.key());
        let body: AgentBody = self.api.post_json(&route, &payload).await?;
        if body.message.trim().is_empty() {
            return Err(TutorError::UnexpectedReply(format!(
                "{} returned an empty message",
                agent.label()
            )));
        }
        Ok(TutorReply::Agent {
            agent,
            text: body.message,
        })
    }
}

#[async_trait]
impl TutorService for HttpTutorService {
    async fn opening_round(&self, request: &OpeningRequest) -> Result<TutorReply, TutorError> {
        match request.targets {
            Targets::AllLenses => {
                self.lenses(
                    &request.profile,
                    &request.content,
                    &[],
                    LENS_OPENING_INPUT,
                    None,
                )
                .await
            }
            Targets::Agent(agent) => {
                self.agent(
                    agent,
                    &request.profile,
                    &request.content,
                    &[],
                    TEACHER_OPENING_INPUT,
                )
                .await
            }
        }
    }

    async fn respond(&self, request: &RespondRequest) -> Result<TutorReply, TutorError> {
        match request.targets {
            Targets::AllLenses => {
                self.lenses(
                    &request.profile,
                    &request.content,
                    &request.history,
                    &request.input,
                    request.questions.as_ref(),
                )
                .await
            }
            Targets::Agent(agent) => {
                self.agent(
                    agent,
                    &request.profile,
                    &request.content,
                    &request.history,
                    &request.input,
                )
                .await
            }
        }
    }

    async fn critique(&self, request: &CritiqueRequest) -> Result<Critiques, TutorError> {
        info!("Requesting critic essays for poem {}", request.content.id);
        let body: CritiqueBody = self
            .api
            .post_json("/api/chat/critique", &WirePoem::from(&request.content))
            .await?;
        Ok(body.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tutor_domain::SkillLevels;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn profile() -> Profile {
        Profile::new("A", SkillLevels::from_values(1, 2, 3).unwrap())
    }

    fn poem() -> ContentItem {
        ContentItem::new(7, "서시", "윤동주", "죽는 날까지 하늘을 우러러")
    }

    fn service(server: &MockServer) -> HttpTutorService {
        HttpTutorService::new(ApiClient::new(server.uri(), None).unwrap())
    }

    #[tokio::test]
    async fn test_lens_opening_uses_multi_route() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat/multi"))
            .and(body_partial_json(json!({
                "user_name": "A",
                "user_input": LENS_OPENING_INPUT,
                "shared_chat_history": [],
                "user_level": {"int_state": 3},
                "selected_poem": {"content": "죽는 날까지 하늘을 우러러"}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "empathy": "e?", "aesthetic": "a?", "interpretive": "i?"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let reply = service(&server)
            .opening_round(&OpeningRequest {
                profile: profile(),
                content: poem(),
                targets: Targets::AllLenses,
            })
            .await
            .unwrap();
        assert_eq!(
            reply,
            TutorReply::Lenses(LensQuestions::new("e?", "a?", "i?"))
        );

        let requests = server.received_requests().await.unwrap();
        let body: serde_json::Value = requests[0].body_json().unwrap();
        assert!(body.get("latest_questions").is_none());
    }

    #[tokio::test]
    async fn test_teacher_opening_uses_greeting_input() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat/teacher"))
            .and(body_partial_json(json!({"user_input": TEACHER_OPENING_INPUT})))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"message": "안녕, A!"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let reply = service(&server)
            .opening_round(&OpeningRequest {
                profile: profile(),
                content: poem(),
                targets: Targets::Agent(PipelineAgent::Teacher),
            })
            .await
            .unwrap();
        assert_eq!(
            reply,
            TutorReply::Agent {
                agent: PipelineAgent::Teacher,
                text: "안녕, A!".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_critic_round_sends_private_history() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat/criticA"))
            .and(body_partial_json(json!({
                "chat_history": [{"role": "assistant", "content": "essay A"}],
                "user_input": "왜 하늘인가요?"
            })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"message": "좋은 질문이야"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        service(&server)
            .respond(&RespondRequest {
                profile: profile(),
                content: poem(),
                history: vec![Message::agent_from(PipelineAgent::CriticA, "essay A")],
                input: "왜 하늘인가요?".to_string(),
                targets: Targets::Agent(PipelineAgent::CriticA),
                questions: None,
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_lens_round_sends_latest_questions() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat/multi"))
            .and(body_partial_json(json!({
                "latest_questions": {"aesthetic": "a1"}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "empathy": "e2", "aesthetic": "a2", "interpretive": "i2"
            })))
            .expect(1)
            .mount(&server)
            .await;

        service(&server)
            .respond(&RespondRequest {
                profile: profile(),
                content: poem(),
                history: vec![Message::agent("e1"), Message::user("sad")],
                input: "sad".to_string(),
                targets: Targets::AllLenses,
                questions: Some(LensQuestions::new("e1", "a1", "i1")),
            })
            .await
            .unwrap();

        let requests = server.received_requests().await.unwrap();
        let body: serde_json::Value = requests[0].body_json().unwrap();
        assert_eq!(body["shared_chat_history"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_critique_returns_both_essays() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat/critique"))
            .and(body_partial_json(json!({"title": "서시"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "critic_a": "essay A", "critic_b": "essay B"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let critiques = service(&server)
            .critique(&CritiqueRequest { content: poem() })
            .await
            .unwrap();
        assert_eq!(critiques, Critiques::new("essay A", "essay B"));
    }

    #[tokio::test]
    async fn test_server_error_maps_to_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat/critique"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({"detail": "LLM down"})))
            .mount(&server)
            .await;

        let err = service(&server)
            .critique(&CritiqueRequest { content: poem() })
            .await
            .unwrap_err();
        assert!(matches!(err, TutorError::Status { status: 500, .. }));
    }

    #[tokio::test]
    async fn test_empty_agent_message_is_unexpected() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat/teacher"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "  "})))
            .mount(&server)
            .await;

        let err = service(&server)
            .opening_round(&OpeningRequest {
                profile: profile(),
                content: poem(),
                targets: Targets::Agent(PipelineAgent::Teacher),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, TutorError::UnexpectedReply(_)));
    }
}
