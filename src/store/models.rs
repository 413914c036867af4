use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bookmark {
    pub question_id: String,
    pub topic_id: String,
    pub created_at: DateTime<Utc>,
}

/// One finished quiz run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizRecord {
    pub id: i64,
    pub topic_id: String,
    pub correct: u32,
    pub total: u32,
    pub score_percent: u32,
    pub taken_at: DateTime<Utc>,
}

impl QuizRecord {
    /// Integer percentage; an empty quiz scores zero.
    pub fn score_percent(correct: u32, total: u32) -> u32 {
        if total == 0 {
            0
        } else {
            correct * 100 / total
        }
    }
}

/// Consecutive-calendar-day usage streak.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserStreak {
    pub current: u32,
    pub longest: u32,
    pub last_active_day: Option<NaiveDate>,
}

impl Default for UserStreak {
    fn default() -> Self {
        Self {
            current: 0,
            longest: 0,
            last_active_day: None,
        }
    }
}

impl UserStreak {
    /// Advances the streak for `today`. Idempotent within a calendar day:
    /// the first open of a day increments, later opens do nothing.
    pub fn tick(&mut self, today: NaiveDate) -> bool {
        match self.last_active_day {
            Some(day) if day == today => false,
            Some(day) if day.succ_opt() == Some(today) => {
                self.current += 1;
                self.longest = self.longest.max(self.current);
                self.last_active_day = Some(today);
                true
            }
            _ => {
                // Gap (or first ever open): today itself counts as day one.
                self.current = 1;
                self.longest = self.longest.max(1);
                self.last_active_day = Some(today);
                true
            }
        }
    }
}

/// A quiz the user left mid-way. One resumable test per topic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncompleteTest {
    pub topic_id: String,
    pub answered: u32,
    pub correct: u32,
    pub total: u32,
    pub updated_at: DateTime<Utc>,
}

/// One completed turn of a voice-interview session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterviewResponse {
    pub id: i64,
    pub session_id: String,
    pub question_number: u32,
    pub question: String,
    pub transcript: String,
    pub score: u8,
    pub feedback: String,
    pub answered_at: DateTime<Utc>,
}
