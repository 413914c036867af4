use std::time::Instant;

/// Wall-clock accounting for one session: total elapsed time plus the
/// response time of the answer currently being captured.
#[derive(Debug)]
pub struct SessionClock {
    started: Instant,
    question_started: Option<Instant>,
}

impl SessionClock {
    pub fn start() -> Self {
        Self {
            started: Instant::now(),
            question_started: None,
        }
    }

    /// Marks the moment the candidate starts answering.
    pub fn begin_answer(&mut self) {
        self.question_started = Some(Instant::now());
    }

    /// Closes the current answer window and returns its duration in whole
    /// seconds. Returns 0 when no answer window was open.
    pub fn end_answer(&mut self) -> u64 {
        match self.question_started.take() {
            Some(at) => at.elapsed().as_secs(),
            None => 0,
        }
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.started.elapsed().as_secs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn end_without_begin_is_zero() {
        let mut clock = SessionClock::start();
        assert_eq!(clock.end_answer(), 0);
    }

    #[test]
    fn answer_window_closes_once() {
        let mut clock = SessionClock::start();
        clock.begin_answer();
        let first = clock.end_answer();
        assert!(first < 2);
        // The window is consumed; a second end reads nothing.
        assert_eq!(clock.end_answer(), 0);
    }
}
