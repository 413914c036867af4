use std::io::{self, BufRead, Write};

use super::{Result, SpeechEngine, SpeechError};

/// Terminal stand-in for platform TTS/ASR: questions are printed, answers are
/// typed. Used by the demo binary.
pub struct ConsoleEngine;

impl ConsoleEngine {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ConsoleEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SpeechEngine for ConsoleEngine {
    fn synthesize(&mut self, text: &str) -> Result<()> {
        let mut stdout = io::stdout();
        writeln!(stdout, "\n🎙  {text}")
            .and_then(|_| stdout.flush())
            .map_err(|e| SpeechError::SynthesisFailed(e.to_string()))
    }

    fn capture(&mut self) -> Result<String> {
        print!("> ");
        io::stdout()
            .flush()
            .map_err(|e| SpeechError::CaptureFailed(e.to_string()))?;

        let mut line = String::new();
        io::stdin()
            .lock()
            .read_line(&mut line)
            .map_err(|e| SpeechError::CaptureFailed(e.to_string()))?;
        Ok(line)
    }

    fn interrupt(&mut self) {
        // Console I/O is strictly sequential, nothing to interrupt.
    }
}
