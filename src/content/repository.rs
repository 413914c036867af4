use log::warn;

use super::loader::AssetLoader;
use super::models::{Domain, InterviewQuestion, InterviewTopic, Question, Topic};

/// In-memory view over the bundled content. Loaded once at startup; all
/// lookups are cheap id scans over small collections.
#[derive(Debug, Clone)]
pub struct ContentRepository {
    domains: Vec<Domain>,
    interview_topics: Vec<InterviewTopic>,
    interview_questions: Vec<InterviewQuestion>,
}

impl ContentRepository {
    pub fn load(loader: &AssetLoader) -> Self {
        let domains = loader.load_domains();
        let interview_topics = loader.load_interview_topics();
        let interview_questions = loader.load_interview_questions();

        let repo = Self {
            domains,
            interview_topics,
            interview_questions,
        };
        repo.warn_on_broken_questions();
        repo
    }

    pub fn from_parts(
        domains: Vec<Domain>,
        interview_topics: Vec<InterviewTopic>,
        interview_questions: Vec<InterviewQuestion>,
    ) -> Self {
        Self {
            domains,
            interview_topics,
            interview_questions,
        }
    }

    pub fn domains(&self) -> &[Domain] {
        &self.domains
    }

    pub fn domain(&self, domain_id: &str) -> Option<&Domain> {
        self.domains.iter().find(|d| d.id == domain_id)
    }

    pub fn topics_of(&self, domain_id: &str) -> &[Topic] {
        self.domain(domain_id)
            .map(|d| d.topics.as_slice())
            .unwrap_or(&[])
    }

    pub fn topic(&self, topic_id: &str) -> Option<&Topic> {
        self.domains
            .iter()
            .flat_map(|d| d.topics.iter())
            .find(|t| t.id == topic_id)
    }

    pub fn questions_of(&self, topic_id: &str) -> &[Question] {
        self.topic(topic_id)
            .map(|t| t.questions.as_slice())
            .unwrap_or(&[])
    }

    pub fn question(&self, question_id: &str) -> Option<&Question> {
        self.domains
            .iter()
            .flat_map(|d| d.topics.iter())
            .flat_map(|t| t.questions.iter())
            .find(|q| q.id == question_id)
    }

    pub fn interview_topics(&self) -> &[InterviewTopic] {
        &self.interview_topics
    }

    pub fn interview_topic(&self, topic_id: &str) -> Option<&InterviewTopic> {
        self.interview_topics.iter().find(|t| t.id == topic_id)
    }

    /// Seeded questions for an interview topic, ordered by their number.
    pub fn interview_questions_of(&self, topic_id: &str) -> Vec<&InterviewQuestion> {
        let mut questions: Vec<&InterviewQuestion> = self
            .interview_questions
            .iter()
            .filter(|q| q.topic_id == topic_id)
            .collect();
        questions.sort_by_key(|q| q.number);
        questions
    }

    fn warn_on_broken_questions(&self) {
        for domain in &self.domains {
            for topic in &domain.topics {
                for question in &topic.questions {
                    if !question.is_well_formed() {
                        warn!(
                            "Question {} in topic {} has no valid answer, it will never score",
                            question.id, topic.id
                        );
                    }
                }
            }
        }
    }
}
