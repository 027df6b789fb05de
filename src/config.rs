//! Playback timing and interpreter settings.

use crate::prompt::PromptSpec;
use anyhow::{Result, ensure};
use std::time::Duration;

/// Interpreter launched when neither the script nor the CLI names one.
pub const DEFAULT_PYTHON: &str = "python3";

/// Flags passed to the interpreter: interactive, unbuffered.
pub const INTERPRETER_ARGS: &[&str] = &["-i", "-u"];

/// Keys that toggle pause and resume.
pub const PAUSE_KEYS: &[u8] = b" p\r\n";

/// How the driver decides the interpreter is ready for the next line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SyncMode {
    /// Block until a known prompt shows up in the interpreter output.
    Prompt,

    /// Sleep a fixed delay after each line, then echo whatever output is pending.
    Fixed(Duration),
}

#[derive(Debug, Clone)]
pub struct PlaybackConfig {
    /// Base delay between typed characters
    pub char_delay: Duration,
    /// Relative spread of the per-character delay, in `0.0..=1.0`
    pub jitter: f64,
    /// Pause inserted between separated top-level chunks
    pub separation_pause: Duration,
    /// Idle time after the last line before returning
    pub end_delay: Duration,
    pub prompts: Vec<PromptSpec>,
    pub sync: SyncMode,
    pub pause_keys: Vec<u8>,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        PlaybackConfig {
            char_delay: Duration::from_millis(100),
            jitter: 0.5,
            separation_pause: Duration::from_secs(2),
            end_delay: Duration::from_secs(3),
            prompts: PromptSpec::python_defaults(),
            sync: SyncMode::Prompt,
            pause_keys: PAUSE_KEYS.to_vec(),
        }
    }
}

impl PlaybackConfig {
    /// Replace the settle delay of the "ready for a new statement" prompt.
    pub fn with_prompt_delay(mut self, delay: Duration) -> Self {
        self.prompts = vec![PromptSpec::ready(delay), PromptSpec::continuation()];
        self
    }

    /// Check values that the type system cannot.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            (0.0..=1.0).contains(&self.jitter),
            "jitter must be between 0.0 and 1.0, got {}",
            self.jitter
        );
        ensure!(!self.prompts.is_empty(), "at least one prompt is required");
        ensure!(
            self.prompts.iter().all(|p| !p.pattern.is_empty()),
            "prompt patterns must not be empty"
        );
        Ok(())
    }
}
