pub mod client;
pub mod prompts;
pub mod types;

pub use client::{practice_question, AiService};
pub use types::{
    ConversationTurn, EvaluationPayload, ModelReply, QuestionPayload, SummaryPayload,
};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AiError {
    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
    #[error("API error {status}: {body}")]
    BadStatus { status: u16, body: String },
    #[error("No choices in model response")]
    EmptyResponse,
    #[error("Model reply did not match any known payload: {0}")]
    MalformedPayload(String),
    #[error("No API key configured")]
    MissingApiKey,
}

pub type Result<T> = std::result::Result<T, AiError>;
