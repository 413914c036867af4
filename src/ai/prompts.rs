use crate::content::InterviewTopic;

use super::types::ConversationTurn;

/// System prompt shared by every request of a session. The JSON contract is
/// restated here because the response_format hint alone does not pin the
/// shape of the object.
pub fn system_prompt(topic: &InterviewTopic) -> String {
    let mut prompt = format!(
        "You are a professional interviewer running a spoken mock interview for a {} role.",
        topic.role
    );

    if !topic.description.is_empty() {
        prompt.push_str(&format!("\nRole context: {}", topic.description));
    }

    prompt.push_str("\n\nAlways answer with a single JSON object, one of:");
    prompt.push_str("\n- {\"type\":\"question\",\"text\":...,\"category\":...}");
    prompt.push_str(
        "\n- {\"type\":\"follow_up\",\"text\":...,\"category\":...,\"next_question_id\":...}",
    );
    prompt.push_str(
        "\n- {\"type\":\"evaluation\",\"score\":1-10,\"strengths\":[...],\"improvements\":[...],\"feedback\":...,\"next_question_id\":...}",
    );
    prompt.push_str(
        "\n- {\"type\":\"summary\",\"overall_score\":1-10,\"highlights\":[...],\"areas_to_improve\":[...],\"closing\":...}",
    );
    prompt.push_str("\n\nKeep questions answerable out loud in under two minutes.");

    prompt
}

pub fn opening_question_prompt(topic: &InterviewTopic) -> String {
    format!(
        "Start the interview for the {} role. Ask the opening question. Reply with a `question` object.",
        topic.role
    )
}

pub fn next_question_prompt(question_number: u32, history: &[ConversationTurn]) -> String {
    format!(
        "{}Ask interview question #{}. Build on weak spots from earlier answers when possible. Reply with a `follow_up` object.",
        history_block(history),
        question_number
    )
}

pub fn evaluation_prompt(
    question: &str,
    transcript: &str,
    response_secs: u64,
    history: &[ConversationTurn],
) -> String {
    format!(
        "{}Question: {}\nSpoken answer (transcribed): {}\nResponse time: {} seconds\n\nEvaluate the answer. Reply with an `evaluation` object (score 1-10, at most 3 strengths and 3 improvements).",
        history_block(history),
        question,
        transcript,
        response_secs
    )
}

pub fn summary_prompt(history: &[ConversationTurn]) -> String {
    format!(
        "{}The interview is over. Summarize the candidate's performance. Reply with a `summary` object.",
        history_block(history)
    )
}

fn history_block(history: &[ConversationTurn]) -> String {
    if history.is_empty() {
        return String::new();
    }
    let mut block = String::from("Previous turns:\n");
    for (i, turn) in history.iter().enumerate() {
        block.push_str(&format!(
            "{}. Q: {} | A: {} | score {}\n",
            i + 1,
            turn.question,
            turn.transcript,
            turn.score
        ));
    }
    block.push('\n');
    block
}

#[cfg(test)]
mod tests {
    use super::*;

    fn topic() -> InterviewTopic {
        InterviewTopic {
            id: "backend".into(),
            name: "Backend".into(),
            role: "Backend Engineer".into(),
            description: "Rust microservices".into(),
            question_count: 5,
        }
    }

    #[test]
    fn system_prompt_states_all_four_shapes() {
        let prompt = system_prompt(&topic());
        for tag in ["\"question\"", "\"follow_up\"", "\"evaluation\"", "\"summary\""] {
            assert!(prompt.contains(tag), "missing {tag}");
        }
        assert!(prompt.contains("Backend Engineer"));
    }

    #[test]
    fn evaluation_prompt_carries_history() {
        let history = vec![ConversationTurn {
            question: "Q1".into(),
            transcript: "A1".into(),
            score: 6,
        }];
        let prompt = evaluation_prompt("Q2", "A2", 45, &history);
        assert!(prompt.contains("Previous turns"));
        assert!(prompt.contains("45 seconds"));
    }
}
