use chrono::Utc;
use log::info;

use crate::store::{Bookmark, Database, IncompleteTest, QuizRecord, Result, UserStreak};

/// Progress tracking over the local store: bookmarks, quiz history, the
/// daily streak and resumable tests.
pub struct ProgressTracker<'a> {
    db: &'a Database,
}

impl<'a> ProgressTracker<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    pub fn toggle_bookmark(&self, question_id: &str, topic_id: &str) -> Result<bool> {
        let bookmarked = self.db.toggle_bookmark(question_id, topic_id)?;
        info!(
            "Question {} {}",
            question_id,
            if bookmarked { "bookmarked" } else { "unbookmarked" }
        );
        Ok(bookmarked)
    }

    pub fn bookmarks(&self) -> Result<Vec<Bookmark>> {
        self.db.list_bookmarks()
    }

    /// Records a finished quiz and clears any resumable state for the topic.
    pub fn record_quiz(&self, topic_id: &str, correct: u32, total: u32) -> Result<QuizRecord> {
        self.db.delete_incomplete_test(topic_id)?;
        let record = self.db.insert_quiz_record(topic_id, correct, total)?;
        info!(
            "Quiz recorded for {}: {}/{} ({}%)",
            topic_id, correct, total, record.score_percent
        );
        Ok(record)
    }

    pub fn quiz_history(&self, limit: u32) -> Result<Vec<QuizRecord>> {
        self.db.quiz_history(limit)
    }

    /// Called on every app open. Advances the streak at most once per
    /// calendar day and returns the stored state.
    pub fn tick_streak(&self) -> Result<UserStreak> {
        let mut streak = self.db.load_streak()?;
        if streak.tick(Utc::now().date_naive()) {
            self.db.save_streak(&streak)?;
            info!("Streak advanced to {} days", streak.current);
        }
        Ok(streak)
    }

    /// Saves mid-quiz state so the test can be picked up later.
    pub fn save_progress(&self, topic_id: &str, answered: u32, correct: u32, total: u32) -> Result<()> {
        self.db.upsert_incomplete_test(&IncompleteTest {
            topic_id: topic_id.to_string(),
            answered,
            correct,
            total,
            updated_at: Utc::now(),
        })
    }

    pub fn resume(&self, topic_id: &str) -> Result<Option<IncompleteTest>> {
        self.db.incomplete_test(topic_id)
    }

    pub fn discard(&self, topic_id: &str) -> Result<()> {
        self.db.delete_incomplete_test(topic_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn streak_tick_is_idempotent_within_a_day() {
        let db = Database::open_in_memory().unwrap();
        let tracker = ProgressTracker::new(&db);

        let first = tracker.tick_streak().unwrap();
        let second = tracker.tick_streak().unwrap();
        assert_eq!(first.current, 1);
        assert_eq!(second.current, 1);
    }

    #[test]
    fn finishing_a_quiz_clears_resumable_state() {
        let db = Database::open_in_memory().unwrap();
        let tracker = ProgressTracker::new(&db);

        tracker.save_progress("t1", 4, 3, 10).unwrap();
        assert!(tracker.resume("t1").unwrap().is_some());

        let record = tracker.record_quiz("t1", 7, 10).unwrap();
        assert_eq!(record.score_percent, 70);
        assert!(tracker.resume("t1").unwrap().is_none());
    }

    #[test]
    fn bookmark_flow_via_tracker() {
        let db = Database::open_in_memory().unwrap();
        let tracker = ProgressTracker::new(&db);

        assert!(tracker.toggle_bookmark("q9", "t1").unwrap());
        assert_eq!(tracker.bookmarks().unwrap().len(), 1);
        assert!(!tracker.toggle_bookmark("q9", "t1").unwrap());
        assert!(tracker.bookmarks().unwrap().is_empty());
    }
}
