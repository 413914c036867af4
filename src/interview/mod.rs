pub mod controller;
pub mod timer;

pub use controller::{InterviewController, InterviewReport, TurnRecord};
pub use timer::SessionClock;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::speech::SpeechError;

#[derive(Error, Debug)]
pub enum InterviewError {
    #[error("Invalid phase transition: {from:?} -> {to:?}")]
    InvalidTransition {
        from: InterviewPhase,
        to: InterviewPhase,
    },
    #[error("Session already finished")]
    AlreadyFinished,
    #[error(transparent)]
    Speech(#[from] SpeechError),
}

pub type Result<T> = std::result::Result<T, InterviewError>;

/// The turn-taking protocol. A session walks
/// `Initializing -> (PresentingQuestion -> Listening -> Processing ->
/// Feedback)* -> Summarizing -> Completed`; `Failed` is terminal for setup
/// errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InterviewPhase {
    Initializing,
    PresentingQuestion,
    Listening,
    Processing,
    Feedback,
    Summarizing,
    Completed,
    Failed,
}

impl InterviewPhase {
    pub fn can_advance_to(self, next: InterviewPhase) -> bool {
        use InterviewPhase::*;
        matches!(
            (self, next),
            (Initializing, PresentingQuestion)
                | (Initializing, Failed)
                | (PresentingQuestion, Listening)
                | (Listening, Processing)
                | (Processing, Feedback)
                | (Feedback, PresentingQuestion)
                | (Feedback, Summarizing)
                | (Summarizing, Completed)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, InterviewPhase::Completed | InterviewPhase::Failed)
    }
}

#[cfg(test)]
mod tests {
    use super::InterviewPhase::*;

    #[test]
    fn happy_path_is_legal() {
        let path = [
            Initializing,
            PresentingQuestion,
            Listening,
            Processing,
            Feedback,
            PresentingQuestion,
            Listening,
            Processing,
            Feedback,
            Summarizing,
            Completed,
        ];
        for pair in path.windows(2) {
            assert!(pair[0].can_advance_to(pair[1]), "{pair:?} should be legal");
        }
    }

    #[test]
    fn phases_cannot_be_skipped() {
        assert!(!Initializing.can_advance_to(Listening));
        assert!(!PresentingQuestion.can_advance_to(Feedback));
        assert!(!Listening.can_advance_to(Feedback));
    }

    #[test]
    fn terminal_phases_are_dead_ends() {
        for phase in [
            Initializing,
            PresentingQuestion,
            Listening,
            Processing,
            Feedback,
            Summarizing,
            Completed,
            Failed,
        ] {
            assert!(!Completed.can_advance_to(phase));
            assert!(!Failed.can_advance_to(phase));
        }
        assert!(Completed.is_terminal());
        assert!(Failed.is_terminal());
    }
}
