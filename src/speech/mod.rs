pub mod console;
pub mod scripted;

pub use console::ConsoleEngine;
pub use scripted::ScriptedEngine;

use log::{debug, warn};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SpeechError {
    #[error("Speech synthesis failed: {0}")]
    SynthesisFailed(String),
    #[error("Speech capture failed: {0}")]
    CaptureFailed(String),
}

pub type Result<T> = std::result::Result<T, SpeechError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeechState {
    Idle,
    Speaking,
    Listening,
}

/// Backend for one direction pair of the voice channel: text-to-speech
/// playback and speech-to-text capture. Engines are synchronous; a capture
/// call blocks until one utterance is available.
pub trait SpeechEngine: Send {
    fn synthesize(&mut self, text: &str) -> Result<()>;
    fn capture(&mut self) -> Result<String>;
    /// Interrupt whatever the engine is doing. Must be safe to call when
    /// nothing is in flight.
    fn interrupt(&mut self);
}

/// Coordinates playback and capture over one engine.
///
/// Speaking and listening are mutually exclusive: starting one interrupts the
/// other, so the microphone never records the app's own voice.
pub struct SpeechManager {
    engine: Box<dyn SpeechEngine>,
    state: SpeechState,
}

impl SpeechManager {
    pub fn new(engine: Box<dyn SpeechEngine>) -> Self {
        Self {
            engine,
            state: SpeechState::Idle,
        }
    }

    pub fn state(&self) -> SpeechState {
        self.state
    }

    /// Forces the manager into a mid-operation state, standing in for an
    /// engine whose playback or capture is still in flight.
    #[cfg(test)]
    fn force_state(&mut self, state: SpeechState) {
        self.state = state;
    }

    /// Reads the spoken question (or feedback) out to the user.
    pub fn speak(&mut self, text: &str) -> Result<()> {
        if self.state == SpeechState::Listening {
            debug!("Interrupting capture before playback");
            self.engine.interrupt();
        }
        self.state = SpeechState::Speaking;
        let outcome = self.engine.synthesize(text);
        self.state = SpeechState::Idle;
        outcome
    }

    /// Captures one spoken answer and returns the trimmed transcript. An
    /// empty transcript is returned as-is; the caller decides what a silent
    /// answer means.
    pub fn listen(&mut self) -> Result<String> {
        if self.state == SpeechState::Speaking {
            debug!("Interrupting playback before capture");
            self.engine.interrupt();
        }
        self.state = SpeechState::Listening;
        let outcome = self.engine.capture();
        self.state = SpeechState::Idle;

        match outcome {
            Ok(raw) => {
                let transcript = raw.trim().to_string();
                if transcript.is_empty() {
                    warn!("Capture produced an empty transcript");
                }
                Ok(transcript)
            }
            Err(e) => Err(e),
        }
    }
}
