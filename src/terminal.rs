//! Single-keystroke terminal input for the duration of a playback.
//!
//! The terminal is put in cbreak mode: no line buffering and no local echo,
//! but output processing and signal keys stay as they were, so newlines still
//! return the carriage and Ctrl-C still interrupts.

use anyhow::{Context, Result};
use nix::sys::termios::{self, LocalFlags, SetArg, SpecialCharacterIndices, Termios};
use std::io::{self, IsTerminal};

/// Restores the original terminal settings when dropped.
///
/// When stdin is not a terminal (pipes, CI) the guard does nothing.
pub struct TerminalGuard {
    original: Option<Termios>,
}

impl TerminalGuard {
    /// Switch stdin to cbreak mode, remembering the current settings.
    pub fn engage() -> Result<Self> {
        let stdin = io::stdin();
        if !stdin.is_terminal() {
            tracing::debug!("stdin is not a terminal, leaving it untouched");
            return Ok(TerminalGuard { original: None });
        }

        let original =
            termios::tcgetattr(&stdin).context("Failed to read terminal settings")?;
        let mut cbreak = original.clone();
        cbreak.local_flags.remove(LocalFlags::ICANON | LocalFlags::ECHO);
        cbreak.control_chars[SpecialCharacterIndices::VMIN as usize] = 1;
        cbreak.control_chars[SpecialCharacterIndices::VTIME as usize] = 0;
        termios::tcsetattr(&stdin, SetArg::TCSAFLUSH, &cbreak)
            .context("Failed to switch terminal to cbreak mode")?;
        tracing::debug!("terminal switched to cbreak mode");

        Ok(TerminalGuard {
            original: Some(original),
        })
    }

    /// Whether the terminal settings were changed and will be restored.
    pub fn is_active(&self) -> bool {
        self.original.is_some()
    }

    /// Put the original settings back. Safe to call more than once.
    pub fn restore(&mut self) {
        if let Some(original) = self.original.take() {
            if let Err(e) = termios::tcsetattr(io::stdin(), SetArg::TCSADRAIN, &original) {
                tracing::warn!("Failed to restore terminal settings: {}", e);
            } else {
                tracing::debug!("terminal settings restored");
            }
        }
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        self.restore();
    }
}
