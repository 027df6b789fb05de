use crate::child::ChildSession;
use crate::config::{INTERPRETER_ARGS, PlaybackConfig, SyncMode};
use crate::output::{OutputHandler, stdout_handler};
use crate::pause::PauseController;
use crate::prompt::PromptSynchronizer;
use crate::reader::spawn_reader;
use crate::unit::Unit;
use anyhow::Result;
use rand::Rng;
use std::borrow::Cow;
use std::io;
use std::time::Duration;
use tokio::io::AsyncWrite;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::sleep;

/// The playback engine: types each line on the terminal, feeds it to the
/// interpreter and waits for the interpreter to be ready again.
pub struct Engine {
    child: ChildSession,
    sync: PromptSynchronizer,
    pause: PauseController,
    output_handler: OutputHandler,
    config: PlaybackConfig,
}

impl Engine {
    /// Spawn `python` in interactive mode, echoing everything to stdout and
    /// reading pause keys from stdin.
    pub fn spawn(python: &str, config: PlaybackConfig) -> Result<Self> {
        Self::spawn_with_handler(python, config, stdout_handler())
    }

    /// Like [`Engine::spawn`], but with a custom sink for everything the
    /// viewer would see.
    pub fn spawn_with_handler(
        python: &str,
        config: PlaybackConfig,
        output_handler: OutputHandler,
    ) -> Result<Self> {
        let (child, output_rx) = ChildSession::spawn(python, INTERPRETER_ARGS)?;
        let keys_rx = spawn_reader("terminal", io::stdin());
        Ok(Self::from_parts(
            child,
            output_rx,
            keys_rx,
            output_handler,
            config,
        ))
    }

    /// Build an engine on top of arbitrary input/output channels instead of a
    /// spawned interpreter and the real terminal.
    pub fn with_io(
        input: impl AsyncWrite + Send + Unpin + 'static,
        output_rx: UnboundedReceiver<Vec<u8>>,
        keys_rx: UnboundedReceiver<Vec<u8>>,
        output_handler: OutputHandler,
        config: PlaybackConfig,
    ) -> Self {
        Self::from_parts(
            ChildSession::from_writer(input),
            output_rx,
            keys_rx,
            output_handler,
            config,
        )
    }

    fn from_parts(
        child: ChildSession,
        output_rx: UnboundedReceiver<Vec<u8>>,
        keys_rx: UnboundedReceiver<Vec<u8>>,
        output_handler: OutputHandler,
        config: PlaybackConfig,
    ) -> Self {
        Engine {
            child,
            sync: PromptSynchronizer::new(
                output_rx,
                config.prompts.clone(),
                output_handler.clone(),
            ),
            pause: PauseController::new(keys_rx, config.pause_keys.clone()),
            output_handler,
            config,
        }
    }

    /// Play a sequence of units, starting from the interpreter's first prompt.
    pub async fn execute(&mut self, units: &[Unit]) -> Result<()> {
        tracing::info!(units = units.len(), pid = ?self.child.id(), "playback started");
        self.settle().await?;

        for unit in units {
            self.execute_unit(unit).await?;
        }

        // Leave the last prompt visibly idle before the program exits
        sleep(self.config.end_delay).await;
        self.sync.drain_available();
        (self.output_handler)(b"\n");

        tracing::info!("playback finished");
        Ok(())
    }

    async fn execute_unit(&mut self, unit: &Unit) -> Result<()> {
        match unit {
            Unit::TimedPause(duration) => {
                sleep(*duration).await;
            }

            Unit::Literal(text) => {
                // An unterminated last line would never be run by the interpreter
                let line: Cow<'_, str> = if text.ends_with('\n') {
                    Cow::Borrowed(text)
                } else {
                    Cow::Owned(format!("{text}\n"))
                };
                self.simulate_typing(&line).await;

                // The interpreter gets the whole line at once
                self.child.write(line.as_bytes()).await?;

                self.settle().await?;
                self.pause.maybe_pause().await;
            }
        }

        Ok(())
    }

    /// Show the line one character at a time with a jittered cadence
    async fn simulate_typing(&mut self, text: &str) {
        let mut buf = [0u8; 4];
        for ch in text.chars() {
            (self.output_handler)(ch.encode_utf8(&mut buf).as_bytes());
            sleep(self.char_delay()).await;
            self.pause.maybe_pause().await;
        }
    }

    /// Wait until the interpreter can take the next line.
    async fn settle(&mut self) -> Result<()> {
        match self.config.sync {
            SyncMode::Prompt => self.sync.wait_for_prompt().await,
            SyncMode::Fixed(delay) => {
                sleep(delay).await;
                self.sync.drain_available();
                Ok(())
            }
        }
    }

    fn char_delay(&self) -> Duration {
        let jitter = self.config.jitter;
        let factor = rand::thread_rng().gen_range(1.0 - jitter..=1.0 + jitter);
        self.config.char_delay.mul_f64(factor)
    }
}
