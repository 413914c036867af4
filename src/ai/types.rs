use serde::{Deserialize, Serialize};

/// One prior question/answer pair, sent back to the model as context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub question: String,
    pub transcript: String,
    pub score: u8,
}

/// A question the model wants asked next. Covers both the opening question
/// (`type: "question"`) and follow-ups (`type: "follow_up"`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionPayload {
    pub text: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub next_question_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationPayload {
    /// 1-10.
    pub score: u8,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub improvements: Vec<String>,
    pub feedback: String,
    #[serde(default)]
    pub next_question_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryPayload {
    /// 1-10 across the whole session.
    pub overall_score: u8,
    #[serde(default)]
    pub highlights: Vec<String>,
    #[serde(default)]
    pub areas_to_improve: Vec<String>,
    pub closing: String,
}

/// The four reply shapes the model may return, tagged by a `type` field
/// inside the message content.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ModelReply {
    Question(QuestionPayload),
    FollowUp(QuestionPayload),
    Evaluation(EvaluationPayload),
    Summary(SummaryPayload),
}

impl ModelReply {
    pub fn parse(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content.trim())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_evaluation_shape() {
        let raw = r#"{
            "type": "evaluation",
            "score": 8,
            "strengths": ["clear structure"],
            "improvements": ["more examples"],
            "feedback": "Solid answer.",
            "next_question_id": "iq3"
        }"#;
        match ModelReply::parse(raw).unwrap() {
            ModelReply::Evaluation(eval) => {
                assert_eq!(eval.score, 8);
                assert_eq!(eval.next_question_id.as_deref(), Some("iq3"));
            }
            other => panic!("wrong shape: {other:?}"),
        }
    }

    #[test]
    fn parses_follow_up_with_defaults() {
        let raw = r#"{"type": "follow_up", "text": "And how would you test that?"}"#;
        match ModelReply::parse(raw).unwrap() {
            ModelReply::FollowUp(q) => {
                assert!(q.category.is_empty());
                assert!(q.next_question_id.is_none());
            }
            other => panic!("wrong shape: {other:?}"),
        }
    }

    #[test]
    fn rejects_untyped_blob() {
        assert!(ModelReply::parse(r#"{"text": "hello"}"#).is_err());
        assert!(ModelReply::parse("plain prose, not json").is_err());
    }
}
