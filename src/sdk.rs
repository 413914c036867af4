use log::info;
use thiserror::Error;

use crate::ai::AiService;
use crate::config::Settings;
use crate::content::ContentRepository;
use crate::interview::{InterviewController, InterviewError, InterviewReport};
use crate::session;
use crate::speech::{SpeechEngine, SpeechManager};
use crate::store::{Database, StoreError};

#[derive(Error, Debug)]
pub enum SdkError {
    #[error("Unknown interview topic: {0}")]
    UnknownTopic(String),
    #[error("A session is already active: {0}")]
    SessionAlreadyActive(String),
    #[error("No active session")]
    NoActiveSession,
    #[error(transparent)]
    Interview(#[from] InterviewError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type Result<T> = std::result::Result<T, SdkError>;

/// Facade over the whole voice-interview stack: content, local store, model
/// client and speech channel. Holds at most one session at a time.
pub struct VoiceInterviewSdk {
    settings: Settings,
    content: ContentRepository,
    store: Database,
    ai: AiService,
    speech: SpeechManager,
    current: Option<InterviewController>,
}

impl VoiceInterviewSdk {
    pub fn new(
        settings: Settings,
        content: ContentRepository,
        store: Database,
        engine: Box<dyn SpeechEngine>,
    ) -> Self {
        let ai = AiService::new(&settings);
        Self {
            settings,
            content,
            store,
            ai,
            speech: SpeechManager::new(engine),
            current: None,
        }
    }

    pub fn content(&self) -> &ContentRepository {
        &self.content
    }

    pub fn store(&self) -> &Database {
        &self.store
    }

    /// Prepares a session for the given interview topic. Fails when the topic
    /// is unknown or another session is still in flight.
    pub fn start_session(&mut self, topic_id: &str) -> Result<String> {
        if let Some(active) = &self.current {
            return Err(SdkError::SessionAlreadyActive(
                active.session_id().to_string(),
            ));
        }

        let topic = self
            .content
            .interview_topic(topic_id)
            .cloned()
            .ok_or_else(|| SdkError::UnknownTopic(topic_id.to_string()))?;

        let seeded: Vec<_> = self
            .content
            .interview_questions_of(topic_id)
            .into_iter()
            .cloned()
            .collect();

        // Settings only override when explicitly set; the topic's own count
        // is the default.
        let question_count = self.settings.question_count.unwrap_or(topic.question_count);

        let controller = InterviewController::new(topic, seeded, question_count);
        let session_id = controller.session_id().to_string();
        session::register_session(&session_id, topic_id);
        self.current = Some(controller);

        info!("🎯 Session {} ready for topic {}", session_id, topic_id);
        Ok(session_id)
    }

    /// Runs the active session through every turn and the closing summary.
    pub async fn run_to_completion(&mut self) -> Result<InterviewReport> {
        let mut controller = self.current.take().ok_or(SdkError::NoActiveSession)?;
        let outcome = controller.run(&self.ai, &mut self.speech, &self.store).await;

        match outcome {
            Ok(report) => {
                session::complete_session(&report.session_id);
                Ok(report)
            }
            Err(e) => {
                session::abandon_session(controller.session_id());
                Err(e.into())
            }
        }
    }

    /// Drops the active session, if any.
    pub fn abandon(&mut self) -> bool {
        match self.current.take() {
            Some(controller) => session::abandon_session(controller.session_id()),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{InterviewQuestion, InterviewTopic};
    use crate::speech::ScriptedEngine;

    fn sdk_with(answers: Vec<String>) -> VoiceInterviewSdk {
        sdk_with_count(answers, None)
    }

    fn sdk_with_count(answers: Vec<String>, question_count: Option<u32>) -> VoiceInterviewSdk {
        let topics = vec![InterviewTopic {
            id: "backend".into(),
            name: "Backend".into(),
            role: "Backend Engineer".into(),
            description: String::new(),
            question_count: 2,
        }];
        let questions = vec![InterviewQuestion {
            id: "iq1".into(),
            topic_id: "backend".into(),
            number: 1,
            text: "Describe a service you designed.".into(),
            category: "technical".into(),
        }];
        let content = ContentRepository::from_parts(vec![], topics, questions);
        let settings = Settings {
            question_count,
            ..Settings::default()
        };
        VoiceInterviewSdk::new(
            settings,
            content,
            Database::open_in_memory().unwrap(),
            Box::new(ScriptedEngine::new(answers)),
        )
    }

    #[tokio::test]
    async fn start_and_run_produces_report() {
        let mut sdk = sdk_with(vec!["answer one".into(), "answer two".into()]);
        let session_id = sdk.start_session("backend").unwrap();
        let report = sdk.run_to_completion().await.unwrap();

        assert_eq!(report.session_id, session_id);
        // No settings override, so the topic's question_count (2) applies.
        assert_eq!(report.turns.len(), 2);
        // Registry was cleaned up on completion.
        assert!(crate::session::get_session(&session_id).is_none());
        // SDK is free for the next session.
        assert!(sdk.start_session("backend").is_ok());
    }

    #[tokio::test]
    async fn settings_question_count_overrides_topic_default() {
        let mut sdk = sdk_with_count(vec!["only answer".into()], Some(1));
        sdk.start_session("backend").unwrap();
        let report = sdk.run_to_completion().await.unwrap();
        assert_eq!(report.turns.len(), 1);
    }

    #[tokio::test]
    async fn second_session_rejected_while_one_is_active() {
        let mut sdk = sdk_with(vec![]);
        sdk.start_session("backend").unwrap();
        let err = sdk.start_session("backend").unwrap_err();
        assert!(matches!(err, SdkError::SessionAlreadyActive(_)));
    }

    #[test]
    fn unknown_topic_is_rejected() {
        let mut sdk = sdk_with(vec![]);
        let err = sdk.start_session("astronaut").unwrap_err();
        assert!(matches!(err, SdkError::UnknownTopic(_)));
    }

    #[tokio::test]
    async fn run_without_session_fails() {
        let mut sdk = sdk_with(vec![]);
        let err = sdk.run_to_completion().await.unwrap_err();
        assert!(matches!(err, SdkError::NoActiveSession));
    }

    #[test]
    fn abandon_clears_the_slot() {
        let mut sdk = sdk_with(vec![]);
        sdk.start_session("backend").unwrap();
        assert!(sdk.abandon());
        assert!(!sdk.abandon());
        assert!(sdk.start_session("backend").is_ok());
    }
}
