use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;

use super::{Result, SpeechEngine};

/// Engine fed from a prepared answer script. Every call is recorded, so tests
/// can assert that playback and capture never interleave.
pub struct ScriptedEngine {
    answers: VecDeque<String>,
    events: Arc<Mutex<Vec<String>>>,
}

impl ScriptedEngine {
    pub fn new(answers: Vec<String>) -> Self {
        Self {
            answers: answers.into(),
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Shared handle to the call log; survives the engine being boxed into a
    /// `SpeechManager`.
    pub fn event_log(&self) -> Arc<Mutex<Vec<String>>> {
        self.events.clone()
    }
}

impl SpeechEngine for ScriptedEngine {
    fn synthesize(&mut self, text: &str) -> Result<()> {
        self.events.lock().push(format!("synthesize:{text}"));
        Ok(())
    }

    fn capture(&mut self) -> Result<String> {
        self.events.lock().push("capture".to_string());
        // A depleted script behaves like a silent candidate.
        Ok(self.answers.pop_front().unwrap_or_default())
    }

    fn interrupt(&mut self) {
        self.events.lock().push("interrupt".to_string());
    }
}
