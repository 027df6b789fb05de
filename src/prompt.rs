//! Prompt detection on the interpreter's merged output stream.
//!
//! The interpreter does not end its prompts with a newline, so the stream is
//! scanned byte by byte against a small sliding window.

use crate::error::PlaybackError;
use crate::output::OutputHandler;
use anyhow::Result;
use std::collections::VecDeque;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::sleep;

/// A prompt the interpreter prints when it wants more input, and how long to
/// idle after seeing it.
#[derive(Debug, Clone, PartialEq)]
pub struct PromptSpec {
    pub pattern: Vec<u8>,
    pub settle: Duration,
}

impl PromptSpec {
    pub fn new(pattern: impl Into<Vec<u8>>, settle: Duration) -> Self {
        PromptSpec {
            pattern: pattern.into(),
            settle,
        }
    }

    /// `>>> `: the previous statement finished; a presenter would pause here.
    pub fn ready(settle: Duration) -> Self {
        Self::new(b">>> ".to_vec(), settle)
    }

    /// `... `: the statement continues, so typing resumes immediately.
    pub fn continuation() -> Self {
        Self::new(b"... ".to_vec(), Duration::ZERO)
    }

    /// The prompts of the standard Python interactive interpreter.
    pub fn python_defaults() -> Vec<Self> {
        vec![
            Self::ready(Duration::from_millis(500)),
            Self::continuation(),
        ]
    }
}

/// Reads interpreter output, echoes it, and blocks until a prompt shows up.
pub struct PromptSynchronizer {
    output_rx: UnboundedReceiver<Vec<u8>>,
    pending: VecDeque<u8>,
    window: VecDeque<u8>,
    window_len: usize,
    prompts: Vec<PromptSpec>,
    output_handler: OutputHandler,
}

impl PromptSynchronizer {
    pub fn new(
        output_rx: UnboundedReceiver<Vec<u8>>,
        prompts: Vec<PromptSpec>,
        output_handler: OutputHandler,
    ) -> Self {
        let window_len = prompts.iter().map(|p| p.pattern.len()).max().unwrap_or(0);
        PromptSynchronizer {
            output_rx,
            pending: VecDeque::new(),
            window: VecDeque::with_capacity(window_len),
            window_len,
            prompts,
            output_handler,
        }
    }

    /// Block until the output ends with one of the known prompts, echoing
    /// every byte as it is read, then sleep that prompt's settle delay.
    ///
    /// Bytes that arrived after the prompt stay queued for the next call.
    ///
    /// # Errors
    ///
    /// Returns [`PlaybackError::PromptLost`] if the output stream closes first.
    pub async fn wait_for_prompt(&mut self) -> Result<()> {
        self.window.clear();
        loop {
            let byte = self.next_byte().await.ok_or(PlaybackError::PromptLost)?;
            (self.output_handler)(&[byte]);

            if self.window.len() == self.window_len {
                self.window.pop_front();
            }
            self.window.push_back(byte);

            if let Some(prompt) = self.matching_prompt() {
                let settle = prompt.settle;
                tracing::trace!(
                    prompt = %String::from_utf8_lossy(&prompt.pattern),
                    ?settle,
                    "prompt matched"
                );
                sleep(settle).await;
                return Ok(());
            }
        }
    }

    /// Echo whatever output is already available, without waiting.
    pub fn drain_available(&mut self) {
        if !self.pending.is_empty() {
            let data: Vec<u8> = self.pending.drain(..).collect();
            (self.output_handler)(&data);
        }
        while let Ok(data) = self.output_rx.try_recv() {
            (self.output_handler)(&data);
        }
    }

    fn matching_prompt(&self) -> Option<&PromptSpec> {
        let (front, back) = self.window.as_slices();
        self.prompts.iter().find(|prompt| {
            let pattern = prompt.pattern.as_slice();
            let len = front.len() + back.len();
            len >= pattern.len()
                && front
                    .iter()
                    .chain(back)
                    .skip(len - pattern.len())
                    .eq(pattern.iter())
        })
    }

    async fn next_byte(&mut self) -> Option<u8> {
        loop {
            if let Some(byte) = self.pending.pop_front() {
                return Some(byte);
            }
            let chunk = self.output_rx.recv().await?;
            self.pending.extend(chunk);
        }
    }
}
