use serde::{Deserialize, Serialize};

/// Top-level content grouping (e.g. "Android", "Data Structures").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Domain {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub topics: Vec<Topic>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Topic {
    pub id: String,
    pub domain_id: String,
    pub name: String,
    #[serde(default)]
    pub questions: Vec<Question>,
}

/// A multiple-choice quiz question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub topic_id: String,
    pub text: String,
    pub options: Vec<String>,
    pub correct_index: usize,
    #[serde(default)]
    pub explanation: Option<String>,
}

impl Question {
    /// A question is answerable only when the marked answer exists.
    pub fn is_well_formed(&self) -> bool {
        !self.options.is_empty() && self.correct_index < self.options.len()
    }

    pub fn is_correct(&self, chosen_index: usize) -> bool {
        chosen_index == self.correct_index
    }
}

/// A role/topic the mock interview can be run against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterviewTopic {
    pub id: String,
    pub name: String,
    pub role: String,
    #[serde(default)]
    pub description: String,
    /// Default number of questions when the session config does not override.
    #[serde(default = "default_question_count")]
    pub question_count: u32,
}

fn default_question_count() -> u32 {
    5
}

/// A seeded interview question bundled with the app. Used as the opening
/// question source and as offline fallback material.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterviewQuestion {
    pub id: String,
    pub topic_id: String,
    pub number: u32,
    pub text: String,
    #[serde(default)]
    pub category: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(options: usize, correct: usize) -> Question {
        Question {
            id: "q1".into(),
            topic_id: "t1".into(),
            text: "What is ownership?".into(),
            options: (0..options).map(|i| format!("option {i}")).collect(),
            correct_index: correct,
            explanation: None,
        }
    }

    #[test]
    fn correct_index_must_be_in_range() {
        assert!(question(4, 3).is_well_formed());
        assert!(!question(4, 4).is_well_formed());
        assert!(!question(0, 0).is_well_formed());
    }

    #[test]
    fn answer_checking() {
        let q = question(4, 2);
        assert!(q.is_correct(2));
        assert!(!q.is_correct(0));
    }
}
