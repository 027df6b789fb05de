//! Error taxonomy for script loading and playback.
//!
//! Public functions return [`anyhow::Result`]; the concrete failure can be
//! recovered with `err.downcast_ref::<PlaybackError>()`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlaybackError {
    /// A directive line is malformed, unknown, or in the wrong place.
    #[error("line {line}: {reason}: {text:?}")]
    Config {
        line: usize,
        text: String,
        reason: String,
    },

    /// An indented line follows a blank run that already ended a block.
    ///
    /// `position` counts literal lines only, so it is not a file line number.
    #[error(
        "indented line {text:?} (literal #{position}) cannot follow a blank line in {state} state"
    )]
    Structure {
        position: usize,
        text: String,
        state: &'static str,
    },

    /// The interpreter output closed before any known prompt appeared.
    #[error("interpreter output ended before a prompt was seen")]
    PromptLost,
}
