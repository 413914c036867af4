use std::path::Path;

use chrono::{DateTime, NaiveDate, Utc};
use log::info;
use rusqlite::{params, Connection, OptionalExtension};

use super::models::{Bookmark, IncompleteTest, InterviewResponse, QuizRecord, UserStreak};
use super::{Result, StoreError};

/// Local SQLite store for bookmarks, progress and interview history.
///
/// All timestamps are stored as RFC 3339 text, streak days as `YYYY-MM-DD`.
pub struct Database {
    conn: Connection,
}

impl Database {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path.as_ref())
            .map_err(|e| StoreError::OpenFailed(e.to_string()))?;
        let db = Self { conn };
        db.init()?;
        info!("Local store ready at {}", path.as_ref().display());
        Ok(db)
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| StoreError::OpenFailed(e.to_string()))?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    fn init(&self) -> Result<()> {
        self.conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS bookmarks (
                question_id TEXT PRIMARY KEY,
                topic_id TEXT NOT NULL,
                created_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS quiz_history (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                topic_id TEXT NOT NULL,
                correct INTEGER NOT NULL,
                total INTEGER NOT NULL,
                score_percent INTEGER NOT NULL,
                taken_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS user_streak (
                id INTEGER PRIMARY KEY CHECK (id = 1),
                current INTEGER NOT NULL,
                longest INTEGER NOT NULL,
                last_active_day TEXT
            );

            CREATE TABLE IF NOT EXISTS incomplete_tests (
                topic_id TEXT PRIMARY KEY,
                answered INTEGER NOT NULL,
                correct INTEGER NOT NULL,
                total INTEGER NOT NULL,
                updated_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS interview_responses (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                session_id TEXT NOT NULL,
                question_number INTEGER NOT NULL,
                question TEXT NOT NULL,
                transcript TEXT NOT NULL,
                score INTEGER NOT NULL,
                feedback TEXT NOT NULL,
                answered_at TEXT NOT NULL
            );
            "#,
        )?;
        Ok(())
    }

    // --- bookmarks ---

    /// Flips the bookmark for a question. Returns true when the question is
    /// bookmarked after the call.
    pub fn toggle_bookmark(&self, question_id: &str, topic_id: &str) -> Result<bool> {
        let removed = self
            .conn
            .execute("DELETE FROM bookmarks WHERE question_id = ?1", params![question_id])?;
        if removed > 0 {
            return Ok(false);
        }
        self.conn.execute(
            "INSERT INTO bookmarks (question_id, topic_id, created_at) VALUES (?1, ?2, ?3)",
            params![question_id, topic_id, Utc::now().to_rfc3339()],
        )?;
        Ok(true)
    }

    pub fn is_bookmarked(&self, question_id: &str) -> Result<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM bookmarks WHERE question_id = ?1",
            params![question_id],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    pub fn list_bookmarks(&self) -> Result<Vec<Bookmark>> {
        let mut stmt = self.conn.prepare(
            "SELECT question_id, topic_id, created_at FROM bookmarks ORDER BY created_at DESC",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(Bookmark {
                question_id: row.get(0)?,
                topic_id: row.get(1)?,
                created_at: parse_timestamp(row.get::<_, String>(2)?),
            })
        })?;
        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(StoreError::from)
    }

    // --- quiz history ---

    pub fn insert_quiz_record(&self, topic_id: &str, correct: u32, total: u32) -> Result<QuizRecord> {
        let taken_at = Utc::now();
        let score_percent = QuizRecord::score_percent(correct, total);
        self.conn.execute(
            "INSERT INTO quiz_history (topic_id, correct, total, score_percent, taken_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![topic_id, correct, total, score_percent, taken_at.to_rfc3339()],
        )?;
        Ok(QuizRecord {
            id: self.conn.last_insert_rowid(),
            topic_id: topic_id.to_string(),
            correct,
            total,
            score_percent,
            taken_at,
        })
    }

    /// Quiz history, most recent first.
    pub fn quiz_history(&self, limit: u32) -> Result<Vec<QuizRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, topic_id, correct, total, score_percent, taken_at
             FROM quiz_history ORDER BY taken_at DESC, id DESC LIMIT ?1",
        )?;
        let rows = stmt.query_map(params![limit], |row| {
            Ok(QuizRecord {
                id: row.get(0)?,
                topic_id: row.get(1)?,
                correct: row.get(2)?,
                total: row.get(3)?,
                score_percent: row.get(4)?,
                taken_at: parse_timestamp(row.get::<_, String>(5)?),
            })
        })?;
        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(StoreError::from)
    }

    // --- streak ---

    pub fn load_streak(&self) -> Result<UserStreak> {
        let streak = self
            .conn
            .query_row(
                "SELECT current, longest, last_active_day FROM user_streak WHERE id = 1",
                [],
                |row| {
                    Ok(UserStreak {
                        current: row.get(0)?,
                        longest: row.get(1)?,
                        last_active_day: row
                            .get::<_, Option<String>>(2)?
                            .and_then(|s| NaiveDate::parse_from_str(&s, "%Y-%m-%d").ok()),
                    })
                },
            )
            .optional()?;
        Ok(streak.unwrap_or_default())
    }

    pub fn save_streak(&self, streak: &UserStreak) -> Result<()> {
        self.conn.execute(
            "INSERT INTO user_streak (id, current, longest, last_active_day)
             VALUES (1, ?1, ?2, ?3)
             ON CONFLICT(id) DO UPDATE SET
                 current = excluded.current,
                 longest = excluded.longest,
                 last_active_day = excluded.last_active_day",
            params![
                streak.current,
                streak.longest,
                streak.last_active_day.map(|d| d.format("%Y-%m-%d").to_string()),
            ],
        )?;
        Ok(())
    }

    // --- incomplete tests ---

    pub fn upsert_incomplete_test(&self, test: &IncompleteTest) -> Result<()> {
        self.conn.execute(
            "INSERT INTO incomplete_tests (topic_id, answered, correct, total, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(topic_id) DO UPDATE SET
                 answered = excluded.answered,
                 correct = excluded.correct,
                 total = excluded.total,
                 updated_at = excluded.updated_at",
            params![
                test.topic_id,
                test.answered,
                test.correct,
                test.total,
                test.updated_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    pub fn incomplete_test(&self, topic_id: &str) -> Result<Option<IncompleteTest>> {
        self.conn
            .query_row(
                "SELECT topic_id, answered, correct, total, updated_at
                 FROM incomplete_tests WHERE topic_id = ?1",
                params![topic_id],
                |row| {
                    Ok(IncompleteTest {
                        topic_id: row.get(0)?,
                        answered: row.get(1)?,
                        correct: row.get(2)?,
                        total: row.get(3)?,
                        updated_at: parse_timestamp(row.get::<_, String>(4)?),
                    })
                },
            )
            .optional()
            .map_err(StoreError::from)
    }

    pub fn delete_incomplete_test(&self, topic_id: &str) -> Result<()> {
        self.conn.execute(
            "DELETE FROM incomplete_tests WHERE topic_id = ?1",
            params![topic_id],
        )?;
        Ok(())
    }

    // --- interview responses ---

    pub fn insert_interview_response(
        &self,
        session_id: &str,
        question_number: u32,
        question: &str,
        transcript: &str,
        score: u8,
        feedback: &str,
    ) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO interview_responses
                 (session_id, question_number, question, transcript, score, feedback, answered_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                session_id,
                question_number,
                question,
                transcript,
                score,
                feedback,
                Utc::now().to_rfc3339(),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// All turns of one session, in the order they were asked.
    pub fn interview_responses(&self, session_id: &str) -> Result<Vec<InterviewResponse>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, session_id, question_number, question, transcript, score, feedback, answered_at
             FROM interview_responses WHERE session_id = ?1 ORDER BY question_number ASC",
        )?;
        let rows = stmt.query_map(params![session_id], |row| {
            Ok(InterviewResponse {
                id: row.get(0)?,
                session_id: row.get(1)?,
                question_number: row.get(2)?,
                question: row.get(3)?,
                transcript: row.get(4)?,
                score: row.get(5)?,
                feedback: row.get(6)?,
                answered_at: parse_timestamp(row.get::<_, String>(7)?),
            })
        })?;
        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(StoreError::from)
    }
}

fn parse_timestamp(raw: String) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(&raw)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn db() -> Database {
        Database::open_in_memory().unwrap()
    }

    #[test]
    fn toggle_bookmark_twice_restores_original_state() {
        let db = db();
        assert!(!db.is_bookmarked("q1").unwrap());
        assert!(db.toggle_bookmark("q1", "t1").unwrap());
        assert!(db.is_bookmarked("q1").unwrap());
        assert!(!db.toggle_bookmark("q1", "t1").unwrap());
        assert!(!db.is_bookmarked("q1").unwrap());
    }

    #[test]
    fn quiz_history_is_most_recent_first() {
        let db = db();
        db.insert_quiz_record("t1", 3, 5).unwrap();
        db.insert_quiz_record("t2", 4, 4).unwrap();
        let history = db.quiz_history(10).unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].topic_id, "t2");
        assert_eq!(history[0].score_percent, 100);
        assert_eq!(history[1].score_percent, 60);
    }

    #[test]
    fn streak_round_trips() {
        let db = db();
        assert_eq!(db.load_streak().unwrap().current, 0);

        let mut streak = UserStreak::default();
        streak.tick(NaiveDate::from_ymd_opt(2026, 8, 25).unwrap());
        db.save_streak(&streak).unwrap();

        let loaded = db.load_streak().unwrap();
        assert_eq!(loaded.current, 1);
        assert_eq!(
            loaded.last_active_day,
            NaiveDate::from_ymd_opt(2026, 8, 25)
        );
    }

    #[test]
    fn incomplete_test_upsert_and_discard() {
        let db = db();
        let mut test = IncompleteTest {
            topic_id: "t1".into(),
            answered: 2,
            correct: 1,
            total: 10,
            updated_at: Utc::now(),
        };
        db.upsert_incomplete_test(&test).unwrap();

        test.answered = 5;
        test.correct = 4;
        db.upsert_incomplete_test(&test).unwrap();

        let resumed = db.incomplete_test("t1").unwrap().unwrap();
        assert_eq!(resumed.answered, 5);
        assert_eq!(resumed.correct, 4);

        db.delete_incomplete_test("t1").unwrap();
        assert!(db.incomplete_test("t1").unwrap().is_none());
    }

    #[test]
    fn interview_responses_ordered_by_question_number() {
        let db = db();
        db.insert_interview_response("s1", 2, "Q2", "A2", 7, "ok").unwrap();
        db.insert_interview_response("s1", 1, "Q1", "A1", 8, "good").unwrap();
        db.insert_interview_response("other", 1, "Qx", "Ax", 5, "meh").unwrap();

        let turns = db.interview_responses("s1").unwrap();
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].question_number, 1);
        assert_eq!(turns[1].question_number, 2);
    }
}
