pub mod models;
pub mod sqlite;

pub use models::{Bookmark, IncompleteTest, InterviewResponse, QuizRecord, UserStreak};
pub use sqlite::Database;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database open failed: {0}")]
    OpenFailed(String),
    #[error("Query failed: {0}")]
    QueryFailed(#[from] rusqlite::Error),
    #[error("Record not found: {0}")]
    NotFound(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;
