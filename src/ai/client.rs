use std::time::Duration;

use log::{info, warn};
use once_cell::sync::Lazy;
use rand::seq::SliceRandom;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::Settings;
use crate::content::InterviewTopic;

use super::prompts;
use super::types::{ConversationTurn, EvaluationPayload, ModelReply, QuestionPayload, SummaryPayload};
use super::{AiError, Result};

static QUESTION_BANK: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        "Tell me about a challenging project you worked on recently.",
        "How do you handle tight deadlines and pressure?",
        "Describe your experience with team collaboration.",
        "What interests you most about this role?",
        "How do you stay updated with industry trends?",
        "Walk me through how you debug a problem you have never seen before.",
    ]
});

#[derive(Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: String,
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f64,
    response_format: ResponseFormat,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

/// Client for the hosted chat-completion endpoint.
///
/// Every operation is best-effort: without an API key, or when the call or
/// the payload parse fails, it degrades to built-in material so a session
/// never aborts mid-interview.
#[derive(Clone)]
pub struct AiService {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    model: String,
}

impl AiService {
    pub fn new(settings: &Settings) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .build()
            .unwrap_or_default();
        Self {
            client,
            base_url: settings.api_base_url.clone(),
            api_key: settings.api_key.clone(),
            model: settings.model.clone(),
        }
    }

    /// Offline client, serves only canned material. Used by tests and by the
    /// demo binary when no key is configured.
    pub fn offline() -> Self {
        Self::new(&Settings::default())
    }

    pub fn is_live(&self) -> bool {
        self.api_key.is_some()
    }

    pub async fn opening_question(&self, topic: &InterviewTopic) -> QuestionPayload {
        match self.request_reply(topic, prompts::opening_question_prompt(topic)).await {
            Ok(ModelReply::Question(q)) | Ok(ModelReply::FollowUp(q)) => q,
            Ok(other) => {
                warn!("Expected a question payload, got {other:?}; using built-in question");
                canned_question(1)
            }
            Err(e) => {
                self.log_fallback("opening question", &e);
                canned_question(1)
            }
        }
    }

    pub async fn next_question(
        &self,
        topic: &InterviewTopic,
        question_number: u32,
        history: &[ConversationTurn],
    ) -> QuestionPayload {
        match self
            .request_reply(topic, prompts::next_question_prompt(question_number, history))
            .await
        {
            Ok(ModelReply::Question(q)) | Ok(ModelReply::FollowUp(q)) => q,
            Ok(other) => {
                warn!("Expected a follow-up payload, got {other:?}; using built-in question");
                canned_question(question_number)
            }
            Err(e) => {
                self.log_fallback("follow-up question", &e);
                canned_question(question_number)
            }
        }
    }

    pub async fn evaluate_answer(
        &self,
        topic: &InterviewTopic,
        question: &str,
        transcript: &str,
        response_secs: u64,
        history: &[ConversationTurn],
    ) -> EvaluationPayload {
        let prompt = prompts::evaluation_prompt(question, transcript, response_secs, history);
        match self.request_content(topic, prompt).await {
            Ok(content) => match ModelReply::parse(&content) {
                Ok(ModelReply::Evaluation(eval)) => eval,
                Ok(other) => {
                    warn!("Expected an evaluation payload, got {other:?}; using built-in feedback");
                    canned_evaluation(transcript, response_secs)
                }
                // The model answered in prose. Keep its words as feedback
                // rather than throwing the reply away.
                Err(_) => EvaluationPayload {
                    score: 6,
                    strengths: vec!["Response provided".to_string()],
                    improvements: vec!["More detail could be helpful".to_string()],
                    feedback: content,
                    next_question_id: None,
                },
            },
            Err(e) => {
                self.log_fallback("answer evaluation", &e);
                canned_evaluation(transcript, response_secs)
            }
        }
    }

    pub async fn summarize(
        &self,
        topic: &InterviewTopic,
        history: &[ConversationTurn],
    ) -> SummaryPayload {
        match self.request_reply(topic, prompts::summary_prompt(history)).await {
            Ok(ModelReply::Summary(summary)) => summary,
            Ok(other) => {
                warn!("Expected a summary payload, got {other:?}; using built-in summary");
                canned_summary(history)
            }
            Err(e) => {
                self.log_fallback("session summary", &e);
                canned_summary(history)
            }
        }
    }

    async fn request_reply(&self, topic: &InterviewTopic, prompt: String) -> Result<ModelReply> {
        let content = self.request_content(topic, prompt).await?;
        ModelReply::parse(&content).map_err(|_| AiError::MalformedPayload(content))
    }

    async fn request_content(&self, topic: &InterviewTopic, prompt: String) -> Result<String> {
        let api_key = self.api_key.as_ref().ok_or(AiError::MissingApiKey)?;

        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: prompts::system_prompt(topic),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: prompt,
                },
            ],
            max_tokens: 400,
            temperature: 0.7,
            response_format: ResponseFormat {
                format_type: "json_object".to_string(),
            },
        };

        info!("Sending interview request to model {}", self.model);

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AiError::BadStatus {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = response.json().await?;
        let choice = parsed.choices.into_iter().next().ok_or(AiError::EmptyResponse)?;
        Ok(choice.message.content.trim().to_string())
    }

    fn log_fallback(&self, what: &str, err: &AiError) {
        if matches!(err, AiError::MissingApiKey) {
            info!("No API key, serving built-in {what}");
        } else {
            warn!("Model call for {what} failed ({err}), serving built-in fallback");
        }
    }
}

/// Deterministic pick from the bank: turn N always gets the same question, so
/// offline sessions never repeat within a normal-length interview.
fn canned_question(question_number: u32) -> QuestionPayload {
    let index = (question_number.max(1) as usize - 1) % QUESTION_BANK.len();
    QuestionPayload {
        text: QUESTION_BANK[index].to_string(),
        category: category_for(question_number),
        next_question_id: None,
    }
}

/// Random pick, used when the caller has no position in the session yet
/// (e.g. a warm-up question outside any numbered turn).
pub fn practice_question() -> QuestionPayload {
    let mut rng = rand::thread_rng();
    let text = QUESTION_BANK
        .choose(&mut rng)
        .copied()
        .unwrap_or("Tell me about yourself.");
    QuestionPayload {
        text: text.to_string(),
        category: "general".to_string(),
        next_question_id: None,
    }
}

fn category_for(question_number: u32) -> String {
    match question_number {
        1..=2 => "introduction",
        3..=5 => "behavioral",
        6..=8 => "technical",
        _ => "situational",
    }
    .to_string()
}

fn canned_evaluation(transcript: &str, response_secs: u64) -> EvaluationPayload {
    let score = if transcript.trim().is_empty() {
        3
    } else if response_secs < 120 {
        7
    } else {
        6
    };
    EvaluationPayload {
        score,
        strengths: vec![
            "Clear communication".to_string(),
            "Thoughtful response".to_string(),
        ],
        improvements: vec!["Could provide more specific examples".to_string()],
        feedback: if transcript.trim().is_empty() {
            "No answer was captured for this question.".to_string()
        } else {
            "Good overall response with room for more concrete examples.".to_string()
        },
        next_question_id: None,
    }
}

fn canned_summary(history: &[ConversationTurn]) -> SummaryPayload {
    let overall = if history.is_empty() {
        5
    } else {
        let total: u32 = history.iter().map(|t| t.score as u32).sum();
        (total / history.len() as u32).clamp(1, 10) as u8
    };
    SummaryPayload {
        overall_score: overall,
        highlights: vec!["Completed the full interview".to_string()],
        areas_to_improve: vec!["Practice with more detailed scenarios".to_string()],
        closing: format!(
            "You answered {} questions with an average score of {}/10. Keep practicing!",
            history.len(),
            overall
        ),
    }
}
