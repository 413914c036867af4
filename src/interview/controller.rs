use log::{error, info, warn};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ai::{AiService, ConversationTurn, QuestionPayload, SummaryPayload};
use crate::content::{InterviewQuestion, InterviewTopic};
use crate::speech::SpeechManager;
use crate::store::Database;

use super::timer::SessionClock;
use super::{InterviewError, InterviewPhase, Result};

/// One completed turn as reported to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnRecord {
    pub number: u32,
    pub question: String,
    pub category: String,
    pub transcript: String,
    pub score: u8,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    pub feedback: String,
    pub response_secs: u64,
}

/// Final outcome of a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterviewReport {
    pub session_id: String,
    pub topic_id: String,
    pub turns: Vec<TurnRecord>,
    pub summary: SummaryPayload,
    pub total_secs: u64,
}

/// Drives one voice-interview session through the turn-taking protocol.
///
/// The controller is strictly single-session and sequential: one question is
/// in flight at a time, and every phase change goes through `advance`, which
/// rejects transitions the protocol does not allow. Model failures never end
/// a session (the AI layer degrades to canned material); speech failures do.
pub struct InterviewController {
    session_id: String,
    topic: InterviewTopic,
    question_count: u32,
    phase: InterviewPhase,
    seeded: Vec<InterviewQuestion>,
    history: Vec<ConversationTurn>,
    turns: Vec<TurnRecord>,
}

impl InterviewController {
    pub fn new(topic: InterviewTopic, seeded: Vec<InterviewQuestion>, question_count: u32) -> Self {
        let session_id = Uuid::new_v4().to_string();
        info!(
            "🎬 Interview session {} created for role {} ({} questions)",
            session_id, topic.role, question_count
        );
        Self {
            session_id,
            topic,
            question_count: question_count.max(1),
            phase: InterviewPhase::Initializing,
            seeded,
            history: Vec::new(),
            turns: Vec::new(),
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn phase(&self) -> InterviewPhase {
        self.phase
    }

    pub fn topic(&self) -> &InterviewTopic {
        &self.topic
    }

    fn advance(&mut self, to: InterviewPhase) -> Result<()> {
        if !self.phase.can_advance_to(to) {
            return Err(InterviewError::InvalidTransition {
                from: self.phase,
                to,
            });
        }
        self.phase = to;
        Ok(())
    }

    /// Runs the whole session: present, listen, evaluate, give feedback,
    /// repeat until the question count is reached, then summarize. A speech
    /// failure aborts the session into the terminal `Failed` phase.
    pub async fn run(
        &mut self,
        ai: &AiService,
        speech: &mut SpeechManager,
        store: &Database,
    ) -> Result<InterviewReport> {
        if self.phase.is_terminal() {
            return Err(InterviewError::AlreadyFinished);
        }

        match self.run_inner(ai, speech, store).await {
            Ok(report) => Ok(report),
            Err(e) => {
                error!("Interview session {} failed: {e}", self.session_id);
                self.phase = InterviewPhase::Failed;
                Err(e)
            }
        }
    }

    async fn run_inner(
        &mut self,
        ai: &AiService,
        speech: &mut SpeechManager,
        store: &Database,
    ) -> Result<InterviewReport> {
        let mut clock = SessionClock::start();
        let mut question = self.first_question(ai).await;

        for number in 1..=self.question_count {
            self.advance(InterviewPhase::PresentingQuestion)?;
            info!("Presenting question #{}: {}", number, question.text);
            speech.speak(&question.text)?;

            self.advance(InterviewPhase::Listening)?;
            clock.begin_answer();
            let transcript = speech.listen()?;
            let response_secs = clock.end_answer();

            self.advance(InterviewPhase::Processing)?;
            info!("🧠 Evaluating answer for question #{number}");
            let evaluation = ai
                .evaluate_answer(&self.topic, &question.text, &transcript, response_secs, &self.history)
                .await;

            self.advance(InterviewPhase::Feedback)?;
            speech.speak(&evaluation.feedback)?;

            // Persistence is best-effort; a broken local store must not end
            // the interview.
            if let Err(e) = store.insert_interview_response(
                &self.session_id,
                number,
                &question.text,
                &transcript,
                evaluation.score,
                &evaluation.feedback,
            ) {
                error!("Failed to persist turn #{number}: {e}");
            }

            self.history.push(ConversationTurn {
                question: question.text.clone(),
                transcript: transcript.clone(),
                score: evaluation.score,
            });
            self.turns.push(TurnRecord {
                number,
                question: question.text.clone(),
                category: question.category.clone(),
                transcript,
                score: evaluation.score,
                strengths: evaluation.strengths.clone(),
                improvements: evaluation.improvements.clone(),
                feedback: evaluation.feedback.clone(),
                response_secs,
            });

            if number < self.question_count {
                question = self
                    .next_question(ai, number + 1, evaluation.next_question_id.as_deref())
                    .await;
            }
        }

        self.advance(InterviewPhase::Summarizing)?;
        let summary = ai.summarize(&self.topic, &self.history).await;
        speech.speak(&summary.closing)?;

        self.advance(InterviewPhase::Completed)?;
        let total_secs = clock.elapsed_secs();
        info!(
            "✅ Interview session {} completed: {} turns, overall {}/10, {}s",
            self.session_id,
            self.turns.len(),
            summary.overall_score,
            total_secs
        );

        Ok(InterviewReport {
            session_id: self.session_id.clone(),
            topic_id: self.topic.id.clone(),
            turns: self.turns.clone(),
            summary,
            total_secs,
        })
    }

    /// Opening question: the first seeded question when the topic bundles
    /// one, otherwise whatever the model proposes.
    async fn first_question(&self, ai: &AiService) -> QuestionPayload {
        if let Some(seed) = self.seeded.first() {
            return seeded_payload(seed);
        }
        ai.opening_question(&self.topic).await
    }

    /// Resolves a `next_question_id` pointer against the seeded questions.
    fn resolve_seeded(&self, id: &str) -> Option<QuestionPayload> {
        self.seeded.iter().find(|q| q.id == id).map(seeded_payload)
    }

    /// Next question: honor the model's `next_question_id` pointer when it
    /// names a seeded question, otherwise ask the model for a follow-up.
    async fn next_question(
        &self,
        ai: &AiService,
        number: u32,
        next_question_id: Option<&str>,
    ) -> QuestionPayload {
        if let Some(id) = next_question_id {
            if let Some(seed) = self.resolve_seeded(id) {
                return seed;
            }
            warn!("Model pointed at unknown question id {id}, asking for a follow-up instead");
        }
        ai.next_question(&self.topic, number, &self.history).await
    }
}

fn seeded_payload(seed: &InterviewQuestion) -> QuestionPayload {
    QuestionPayload {
        text: seed.text.clone(),
        category: seed.category.clone(),
        next_question_id: None,
    }
}
