//! Conversation controller use case.
//!
//! Owns one [`Session`] and drives it through the reducer. Every public
//! operation applies one [`Action`], then carries out the resulting
//! [`Effect`] against the ports:
//!
//! - `SaveProfile` is sent to the [`ProfileStore`]; failures are logged only
//! - `Tutor` is sent to the [`TutorService`] and its outcome is fed back as
//!   [`Action::ReplyReceived`] with the same ticket
//!
//! The session lock is held only while applying a step, never across an
//! `.await`, so a second caller sees the in-flight guard and is rejected.

use crate::ports::content_catalog::{CatalogError, ContentCatalog};
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::profile_store::{ProfileStore, ProfileStoreError};
use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::ports::tutor_service::{TutorError, TutorService};
use serde_json::json;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use thiserror::Error;
use tracing::{debug, info, warn};
use tutor_domain::core::text::preview;
use tutor_domain::{
    Action, ActionKind, ContentItem, Conversation, Effect, Lens, PipelineAgent, Profile,
    Rejection, Session, Ticket, Topology, Transition, TutorReply, TutorRequest,
};

/// Errors surfaced by [`ConversationController`].
#[derive(Error, Debug)]
pub enum ControllerError {
    /// The reducer refused the action; nothing changed.
    #[error(transparent)]
    Rejected(#[from] Rejection),

    /// The tutor request failed. The in-flight guard is already released.
    #[error("Tutor service failed: {0}")]
    Upstream(#[from] TutorError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("No poem with id {0}")]
    UnknownContent(u64),
}

impl ControllerError {
    pub fn needs_confirmation(&self) -> bool {
        matches!(self, ControllerError::Rejected(r) if r.needs_confirmation())
    }
}

/// Use case driving one reading session.
pub struct ConversationController {
    session: Mutex<Session>,
    contents: Mutex<Vec<ContentItem>>,
    catalog: Arc<dyn ContentCatalog>,
    profiles: Arc<dyn ProfileStore>,
    tutor: Arc<dyn TutorService>,
    progress: Arc<dyn ProgressNotifier>,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl ConversationController {
    pub fn new(
        topology: Topology,
        catalog: Arc<dyn ContentCatalog>,
        profiles: Arc<dyn ProfileStore>,
        tutor: Arc<dyn TutorService>,
    ) -> Self {
        Self {
            session: Mutex::new(Session::new(topology)),
            contents: Mutex::new(Vec::new()),
            catalog,
            profiles,
            tutor,
            progress: Arc::new(NoProgress),
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    /// Create with a progress notifier.
    pub fn with_progress(mut self, progress: Arc<dyn ProgressNotifier>) -> Self {
        self.progress = progress;
        self
    }

    /// Create with a conversation logger.
    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    /// A copy of the current session.
    pub fn snapshot(&self) -> Session {
        self.lock_session().clone()
    }

    /// Poems listed at bootstrap.
    pub fn contents(&self) -> Vec<ContentItem> {
        self.contents
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Load the catalog once. Returns the number of poems available.
    pub async fn bootstrap(&self) -> Result<usize, CatalogError> {
        let items = self.catalog.list().await?;
        info!("Loaded {} poems from catalog", items.len());
        let count = items.len();
        *self.contents.lock().unwrap_or_else(PoisonError::into_inner) = items;
        Ok(count)
    }

    /// A previously saved profile for `display_name`, to prefill levels.
    pub async fn load_profile(
        &self,
        display_name: &str,
    ) -> Result<Option<Profile>, ProfileStoreError> {
        self.profiles.load(display_name).await
    }

    // ==================== Operations ====================

    pub async fn submit_profile(&self, profile: Profile) -> Result<Session, ControllerError> {
        self.dispatch(Action::SubmitProfile(profile)).await
    }

    /// Select a poem by id, from the bootstrap list or the catalog.
    pub async fn select_content(&self, id: u64) -> Result<Session, ControllerError> {
        let cached = self.contents().into_iter().find(|item| item.id == id);
        let content = match cached {
            Some(item) => item,
            None => self
                .catalog
                .find(id)
                .await?
                .ok_or(ControllerError::UnknownContent(id))?,
        };
        self.dispatch(Action::SelectContent(content)).await
    }

    pub async fn start(&self) -> Result<Session, ControllerError> {
        self.dispatch(Action::StartConversation).await
    }

    pub async fn pick(&self, lens: Lens) -> Result<Session, ControllerError> {
        self.dispatch(Action::SelectLens(lens)).await
    }

    pub async fn reply(&self, text: impl Into<String>) -> Result<Session, ControllerError> {
        self.dispatch(Action::SubmitReply(text.into())).await
    }

    pub async fn switch(&self, agent: PipelineAgent) -> Result<Session, ControllerError> {
        self.dispatch(Action::SwitchAgent(agent)).await
    }

    pub async fn end_teacher(&self) -> Result<Session, ControllerError> {
        self.dispatch(Action::EndTeacherConversation).await
    }

    pub async fn end(&self, confirmed: bool) -> Result<Session, ControllerError> {
        self.dispatch(Action::EndConversation { confirmed }).await
    }

    pub async fn read_another(&self) -> Result<Session, ControllerError> {
        self.dispatch(Action::ReadAnother).await
    }

    pub async fn reset(&self, confirmed: bool) -> Result<Session, ControllerError> {
        self.dispatch(Action::Reset { confirmed }).await
    }

    /// Apply one action and carry out its effect.
    ///
    /// Returns the session as it stands once the effect is resolved.
    pub async fn dispatch(&self, action: Action) -> Result<Session, ControllerError> {
        let transition = self.step(action)?;

        match transition.effect {
            Effect::None => Ok(transition.session),
            Effect::SaveProfile(profile) => {
                self.save_profile(&profile).await;
                Ok(transition.session)
            }
            Effect::Tutor { ticket, request } => self.run_request(ticket, request).await,
        }
    }

    // ==================== Internals ====================

    fn lock_session(&self) -> MutexGuard<'_, Session> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Apply one reducer step and publish the new session.
    fn step(&self, action: Action) -> Result<Transition, Rejection> {
        let kind = action.kind();
        let mut session = self.lock_session();
        let before = session.clone();
        let transition = session.apply(action).inspect_err(|rejection| {
            debug!("Rejected {}: {}", kind, rejection);
        })?;
        *session = transition.session.clone();
        drop(session);

        self.record(kind, &before, &transition);
        Ok(transition)
    }

    async fn save_profile(&self, profile: &Profile) {
        match self.profiles.save(profile).await {
            Ok(()) => debug!("Saved profile for {}", profile.display_name()),
            Err(e) => {
                warn!("Failed to save profile for {}: {}", profile.display_name(), e);
                self.conversation_logger.log(ConversationEvent::new(
                    "profile_save_failed",
                    json!({
                        "display_name": profile.display_name(),
                        "error": e.to_string(),
                    }),
                ));
            }
        }
    }

    async fn run_request(
        &self,
        ticket: Ticket,
        request: TutorRequest,
    ) -> Result<Session, ControllerError> {
        let kind = request.kind();
        self.progress.on_request_start(kind, request.targets());

        let mut pending = PendingReply::new(self, ticket);
        let result = self.send(&request).await;
        pending.disarm();

        self.progress.on_request_complete(kind, result.is_ok());

        let (outcome, error) = match result {
            Ok(reply) => (Ok(reply), None),
            Err(e) => {
                warn!("Tutor request {} ({}) failed: {}", ticket, kind, e);
                (Err(e.to_string()), Some(e))
            }
        };

        let transition = match self.step(Action::ReplyReceived { ticket, outcome }) {
            Ok(transition) => transition,
            Err(Rejection::StaleReply(_)) => {
                // The session was reset while the request was outstanding.
                debug!("Dropping stale reply {}", ticket);
                return Ok(self.snapshot());
            }
            Err(rejection) => return Err(rejection.into()),
        };

        match (error, transition.failure) {
            (Some(e), _) => Err(ControllerError::Upstream(e)),
            (None, Some(failure)) => Err(ControllerError::Upstream(TutorError::UnexpectedReply(
                failure,
            ))),
            (None, None) => Ok(transition.session),
        }
    }

    async fn send(&self, request: &TutorRequest) -> Result<TutorReply, TutorError> {
        match request {
            TutorRequest::Opening(r) => self.tutor.opening_round(r).await,
            TutorRequest::Respond(r) => self.tutor.respond(r).await,
            TutorRequest::Critique(r) => self.tutor.critique(r).await.map(TutorReply::Critiques),
        }
    }

    fn record(&self, kind: ActionKind, before: &Session, transition: &Transition) {
        let after = &transition.session;
        let logger = &self.conversation_logger;

        match kind {
            ActionKind::SubmitProfile => {
                info!("Profile submitted for {}", after.profile().display_name());
                logger.log(ConversationEvent::new(
                    "profile_submitted",
                    json!({ "profile": after.profile() }),
                ));
            }
            ActionKind::SelectContent => {
                if let Some(content) = after.content() {
                    info!("Selected poem {} ({})", content.id, content.title);
                    logger.log(ConversationEvent::new(
                        "content_selected",
                        json!({
                            "content_id": content.id,
                            "title": content.title,
                            "topology": after.topology().to_string(),
                        }),
                    ));
                }
            }
            ActionKind::SubmitReply => {
                if let Effect::Tutor {
                    request: TutorRequest::Respond(request),
                    ..
                } = &transition.effect
                {
                    debug!("Round committed: {}", preview(&request.input, 60));
                    logger.log(ConversationEvent::new(
                        "round_committed",
                        json!({
                            "lens": before.pending_selection().map(|l| l.key()),
                            "agent": before.active_agent().map(|a| a.key()),
                            "input": request.input,
                        }),
                    ));
                }
            }
            ActionKind::ReplyReceived => {
                let ticket = before.in_flight().map(|f| f.ticket.value());
                let kind = before.in_flight().map(|f| f.kind.as_str());
                match &transition.failure {
                    Some(error) => logger.log(ConversationEvent::new(
                        "request_failed",
                        json!({ "ticket": ticket, "kind": kind, "error": error }),
                    )),
                    None => logger.log(ConversationEvent::new(
                        "reply_received",
                        json!({ "ticket": ticket, "kind": kind }),
                    )),
                }
                if critics_unlocked(after) && !critics_unlocked(before) {
                    info!("Critics unlocked");
                    logger.log(ConversationEvent::new("critics_unlocked", json!({})));
                }
            }
            ActionKind::EndConversation => {
                let messages = after.transcript().map(|t| t.message_count()).unwrap_or(0);
                info!("Conversation ended with {} messages", messages);
                logger.log(ConversationEvent::new(
                    "conversation_ended",
                    json!({
                        "content_id": after.content().map(|c| c.id),
                        "messages": messages,
                        "transcript": after.transcript(),
                    }),
                ));
            }
            ActionKind::Reset => {
                info!("Session reset");
                logger.log(ConversationEvent::new("session_reset", json!({})));
            }
            _ => {}
        }

        if let Effect::Tutor { ticket, request } = &transition.effect {
            debug!("Dispatching {} request {}", request.kind(), ticket);
            logger.log(ConversationEvent::new(
                "request_dispatched",
                json!({
                    "ticket": ticket.value(),
                    "kind": request.kind().as_str(),
                    "targets": request.targets(),
                }),
            ));
        }
    }
}

fn critics_unlocked(session: &Session) -> bool {
    matches!(
        session.conversation(),
        Some(Conversation::Pipeline(c)) if c.critics_unlocked()
    )
}

/// Releases the in-flight guard if the request future is dropped before
/// the reply was fed back.
struct PendingReply<'a> {
    controller: &'a ConversationController,
    ticket: Option<Ticket>,
}

impl<'a> PendingReply<'a> {
    fn new(controller: &'a ConversationController, ticket: Ticket) -> Self {
        Self {
            controller,
            ticket: Some(ticket),
        }
    }

    fn disarm(&mut self) {
        self.ticket = None;
    }
}

impl Drop for PendingReply<'_> {
    fn drop(&mut self) {
        if let Some(ticket) = self.ticket.take() {
            warn!("Tutor request {} was cancelled", ticket);
            let _ = self.controller.step(Action::ReplyReceived {
                ticket,
                outcome: Err(TutorError::Cancelled.to_string()),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::time::Duration;
    use tokio::sync::Notify;
    use tutor_domain::{
        CritiqueRequest, Critiques, LensQuestions, OpeningRequest, PhaseKind, RespondRequest,
        SkillLevels, Targets,
    };

    // === Mock implementations ===

    struct MockCatalog(Vec<ContentItem>);

    #[async_trait]
    impl ContentCatalog for MockCatalog {
        async fn list(&self) -> Result<Vec<ContentItem>, CatalogError> {
            Ok(self.0.clone())
        }
    }

    #[derive(Default)]
    struct MockProfiles {
        fail: bool,
        saved: Mutex<Vec<Profile>>,
    }

    #[async_trait]
    impl ProfileStore for MockProfiles {
        async fn save(&self, profile: &Profile) -> Result<(), ProfileStoreError> {
            if self.fail {
                return Err(ProfileStoreError::Io("disk full".to_string()));
            }
            self.saved.lock().unwrap().push(profile.clone());
            Ok(())
        }

        async fn load(&self, display_name: &str) -> Result<Option<Profile>, ProfileStoreError> {
            Ok(self
                .saved
                .lock()
                .unwrap()
                .iter()
                .find(|p| p.display_name() == display_name)
                .cloned())
        }
    }

    /// Replies are served in order; `gate` holds the next reply until notified.
    #[derive(Default)]
    struct MockTutor {
        replies: Mutex<VecDeque<Result<TutorReply, TutorError>>>,
        requests: Mutex<Vec<TutorRequest>>,
        gate: Option<Arc<Notify>>,
        hang: bool,
    }

    impl MockTutor {
        fn new(replies: Vec<Result<TutorReply, TutorError>>) -> Self {
            Self {
                replies: Mutex::new(VecDeque::from(replies)),
                ..Default::default()
            }
        }

        async fn next(&self, request: TutorRequest) -> Result<TutorReply, TutorError> {
            self.requests.lock().unwrap().push(request);
            if self.hang {
                std::future::pending::<()>().await;
            }
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(TutorError::Connection("no more replies".to_string())))
        }
    }

    #[async_trait]
    impl TutorService for MockTutor {
        async fn opening_round(&self, request: &OpeningRequest) -> Result<TutorReply, TutorError> {
            self.next(TutorRequest::Opening(request.clone())).await
        }

        async fn respond(&self, request: &RespondRequest) -> Result<TutorReply, TutorError> {
            self.next(TutorRequest::Respond(request.clone())).await
        }

        async fn critique(&self, request: &CritiqueRequest) -> Result<Critiques, TutorError> {
            match self.next(TutorRequest::Critique(request.clone())).await? {
                TutorReply::Critiques(c) => Ok(c),
                other => Err(TutorError::UnexpectedReply(format!("{other:?}"))),
            }
        }
    }

    #[derive(Default)]
    struct RecordingLogger(Mutex<Vec<ConversationEvent>>);

    impl RecordingLogger {
        fn types(&self) -> Vec<&'static str> {
            self.0.lock().unwrap().iter().map(|e| e.event_type).collect()
        }
    }

    impl ConversationLogger for RecordingLogger {
        fn log(&self, event: ConversationEvent) {
            self.0.lock().unwrap().push(event);
        }
    }

    // === Helpers ===

    fn poems() -> Vec<ContentItem> {
        vec![
            ContentItem::new(1, "진달래꽃", "김소월", "나 보기가 역겨워"),
            ContentItem::new(2, "서시", "윤동주", "죽는 날까지 하늘을 우러러"),
        ]
    }

    fn reader() -> Profile {
        Profile::new("A", SkillLevels::from_values(1, 1, 1).unwrap())
    }

    fn questions(tag: &str) -> TutorReply {
        TutorReply::Lenses(LensQuestions::new(
            format!("{tag} empathy"),
            format!("{tag} aesthetic"),
            format!("{tag} interpretive"),
        ))
    }

    fn teacher(text: &str) -> TutorReply {
        TutorReply::Agent {
            agent: PipelineAgent::Teacher,
            text: text.to_string(),
        }
    }

    fn controller(topology: Topology, tutor: Arc<MockTutor>) -> ConversationController {
        ConversationController::new(
            topology,
            Arc::new(MockCatalog(poems())),
            Arc::new(MockProfiles::default()),
            tutor,
        )
    }

    async fn conversing(controller: &ConversationController) {
        controller.bootstrap().await.unwrap();
        controller.submit_profile(reader()).await.unwrap();
        controller.select_content(1).await.unwrap();
    }

    // === Tests ===

    #[tokio::test]
    async fn test_bootstrap_lists_catalog() {
        let controller = controller(Topology::ParallelLens, Arc::new(MockTutor::default()));
        assert_eq!(controller.bootstrap().await.unwrap(), 2);
        assert_eq!(controller.contents().len(), 2);
    }

    #[tokio::test]
    async fn test_select_unknown_content() {
        let controller = controller(Topology::ParallelLens, Arc::new(MockTutor::default()));
        controller.bootstrap().await.unwrap();
        controller.submit_profile(reader()).await.unwrap();
        let err = controller.select_content(99).await.unwrap_err();
        assert!(matches!(err, ControllerError::UnknownContent(99)));
    }

    #[tokio::test]
    async fn test_profile_is_saved_and_loadable() {
        let profiles = Arc::new(MockProfiles::default());
        let controller = ConversationController::new(
            Topology::ParallelLens,
            Arc::new(MockCatalog(poems())),
            profiles.clone(),
            Arc::new(MockTutor::default()),
        );
        let session = controller.submit_profile(reader()).await.unwrap();
        assert_eq!(session.phase_kind(), PhaseKind::ContentSelection);
        assert_eq!(profiles.saved.lock().unwrap().len(), 1);
        assert_eq!(controller.load_profile("A").await.unwrap(), Some(reader()));
    }

    #[tokio::test]
    async fn test_profile_save_failure_does_not_block() {
        let logger = Arc::new(RecordingLogger::default());
        let controller = ConversationController::new(
            Topology::ParallelLens,
            Arc::new(MockCatalog(poems())),
            Arc::new(MockProfiles {
                fail: true,
                ..Default::default()
            }),
            Arc::new(MockTutor::default()),
        )
        .with_conversation_logger(logger.clone());

        let session = controller.submit_profile(reader()).await.unwrap();
        assert_eq!(session.phase_kind(), PhaseKind::ContentSelection);
        assert_eq!(logger.types(), vec!["profile_submitted", "profile_save_failed"]);
    }

    #[tokio::test]
    async fn test_lens_flow() {
        let tutor = Arc::new(MockTutor::new(vec![Ok(questions("q1")), Ok(questions("q2"))]));
        let controller = controller(Topology::ParallelLens, tutor.clone());
        conversing(&controller).await;

        controller.start().await.unwrap();
        controller.pick(Lens::Empathy).await.unwrap();
        let session = controller.reply("I feel sad").await.unwrap();

        assert!(!session.is_in_flight());
        let transcript = session.transcript().unwrap();
        assert_eq!(transcript.message_count(), 2);

        let requests = tutor.requests.lock().unwrap();
        assert_eq!(requests.len(), 2);
        let TutorRequest::Respond(respond) = &requests[1] else {
            panic!("expected respond request");
        };
        assert_eq!(respond.input, "I feel sad");
        assert_eq!(respond.history[0].text(), "q1 empathy");
        assert_eq!(respond.targets, Targets::AllLenses);
    }

    #[tokio::test]
    async fn test_lens_round_event_sequence() {
        let tutor = Arc::new(MockTutor::new(vec![Ok(questions("q1")), Ok(questions("q2"))]));
        let logger = Arc::new(RecordingLogger::default());
        let controller =
            controller(Topology::ParallelLens, tutor).with_conversation_logger(logger.clone());
        conversing(&controller).await;

        controller.start().await.unwrap();
        controller.pick(Lens::Aesthetic).await.unwrap();
        controller.reply("the rhythm").await.unwrap();
        // Rejected steps leave no trace.
        assert!(controller.switch(PipelineAgent::Teacher).await.is_err());
        controller.end(false).await.unwrap();

        assert_eq!(
            logger.types(),
            vec![
                "profile_submitted",
                "content_selected",
                "request_dispatched",
                "reply_received",
                "round_committed",
                "request_dispatched",
                "reply_received",
                "conversation_ended",
            ]
        );
    }

    #[tokio::test]
    async fn test_pipeline_flow_unlocks_critics() {
        let tutor = Arc::new(MockTutor::new(vec![
            Ok(teacher("Welcome")),
            Ok(TutorReply::Critiques(Critiques::new("essay A", "essay B"))),
        ]));
        let logger = Arc::new(RecordingLogger::default());
        let controller = controller(Topology::SequentialPipeline, tutor)
            .with_conversation_logger(logger.clone());
        conversing(&controller).await;

        controller.start().await.unwrap();
        let session = controller.end_teacher().await.unwrap();

        assert_eq!(
            session.active_agent(),
            Some(PipelineAgent::CriticA.into())
        );
        assert_eq!(session.transcript().unwrap().message_count(), 3);
        assert!(logger.types().contains(&"critics_unlocked"));
        assert_eq!(
            logger.types().iter().filter(|t| **t == "request_dispatched").count(),
            2
        );
    }

    #[tokio::test]
    async fn test_upstream_failure_releases_guard() {
        let tutor = Arc::new(MockTutor::new(vec![
            Ok(teacher("Welcome")),
            Err(TutorError::Status {
                status: 500,
                body: "boom".to_string(),
            }),
            Ok(teacher("Try again")),
        ]));
        let logger = Arc::new(RecordingLogger::default());
        let controller = controller(Topology::SequentialPipeline, tutor)
            .with_conversation_logger(logger.clone());
        conversing(&controller).await;
        controller.start().await.unwrap();

        let err = controller.reply("first try").await.unwrap_err();
        assert!(matches!(err, ControllerError::Upstream(TutorError::Status { .. })));
        assert!(logger.types().contains(&"request_failed"));

        let session = controller.snapshot();
        assert!(!session.is_in_flight());
        // The reader's message stays; no agent message was added.
        assert_eq!(session.transcript().unwrap().message_count(), 2);

        let session = controller.reply("second try").await.unwrap();
        assert_eq!(session.transcript().unwrap().message_count(), 4);
    }

    #[tokio::test]
    async fn test_rejection_is_reported() {
        let controller = controller(Topology::ParallelLens, Arc::new(MockTutor::default()));
        let err = controller.reply("hello").await.unwrap_err();
        assert!(matches!(
            err,
            ControllerError::Rejected(Rejection::WrongPhase { .. })
        ));

        let err = controller.reset(false).await.unwrap_err();
        assert!(err.needs_confirmation());
    }

    #[tokio::test]
    async fn test_second_action_while_in_flight_is_rejected() {
        let gate = Arc::new(Notify::new());
        let tutor = Arc::new(MockTutor {
            replies: Mutex::new(VecDeque::from(vec![Ok(teacher("Welcome"))])),
            gate: Some(gate.clone()),
            ..Default::default()
        });
        let controller = controller(Topology::SequentialPipeline, tutor.clone());
        conversing(&controller).await;

        let (first, second) = tokio::join!(controller.start(), async {
            tokio::task::yield_now().await;
            let second = controller.reply("too early").await;
            gate.notify_one();
            second
        });

        assert!(first.is_ok());
        assert!(matches!(
            second,
            Err(ControllerError::Rejected(Rejection::RequestInFlight))
        ));
        assert_eq!(tutor.requests.lock().unwrap().len(), 1);
        assert!(!controller.snapshot().is_in_flight());
    }

    #[tokio::test]
    async fn test_dropped_request_releases_guard() {
        let tutor = Arc::new(MockTutor {
            hang: true,
            ..Default::default()
        });
        let controller = controller(Topology::ParallelLens, tutor);
        conversing(&controller).await;

        let timed_out = tokio::time::timeout(Duration::from_millis(20), controller.start()).await;
        assert!(timed_out.is_err());

        let session = controller.snapshot();
        assert!(!session.is_in_flight());
        assert_eq!(session.phase_kind(), PhaseKind::Conversing);
    }

    #[tokio::test]
    async fn test_end_and_read_another() {
        let tutor = Arc::new(MockTutor::new(vec![Ok(teacher("Welcome"))]));
        let logger = Arc::new(RecordingLogger::default());
        let controller = controller(Topology::SequentialPipeline, tutor)
            .with_conversation_logger(logger.clone());
        conversing(&controller).await;
        controller.start().await.unwrap();

        let session = controller.end(false).await.unwrap();
        assert_eq!(session.phase_kind(), PhaseKind::Summary);
        let session = controller.read_another().await.unwrap();
        assert_eq!(session.phase_kind(), PhaseKind::ContentSelection);
        let session = controller.select_content(2).await.unwrap();
        assert_eq!(session.content().map(|c| c.id), Some(2));
        assert!(logger.types().contains(&"conversation_ended"));
    }

    #[tokio::test]
    async fn test_reset_clears_session() {
        let tutor = Arc::new(MockTutor::new(vec![Ok(questions("q1"))]));
        let logger = Arc::new(RecordingLogger::default());
        let controller =
            controller(Topology::ParallelLens, tutor).with_conversation_logger(logger.clone());
        conversing(&controller).await;
        controller.start().await.unwrap();

        let session = controller.reset(true).await.unwrap();
        assert_eq!(session.phase_kind(), PhaseKind::ProfileSetup);
        assert_eq!(session.profile(), &Profile::default());
        assert_eq!(logger.types().last(), Some(&"session_reset"));
    }
}
