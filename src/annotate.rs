//! Pacing pass that inserts a pause between independent top-level chunks.
//!
//! A blank line right after an indented block only closes that block. A blank
//! run seen at top level, or a second blank after a closing one, separates two
//! chunks; the pause goes right before the top-level line that ends the run.

use crate::error::PlaybackError;
use crate::unit::Unit;
use anyhow::Result;
use std::fmt;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnnotationState {
    #[default]
    None,
    Block,
    Closing,
    Separation,
}

impl fmt::Display for AnnotationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineKind {
    Empty,
    Indented,
    TopLevel,
}

impl LineKind {
    fn classify(line: &str) -> Self {
        if line.trim().is_empty() {
            LineKind::Empty
        } else if line.starts_with(' ') {
            LineKind::Indented
        } else {
            LineKind::TopLevel
        }
    }
}

/// Outcome of feeding one literal line to the state machine.
enum Step {
    Next(AnnotationState),
    PauseThen(AnnotationState),
    Invalid,
}

impl AnnotationState {
    /// Lowercase name used in error messages and logs.
    pub fn name(self) -> &'static str {
        match self {
            AnnotationState::None => "none",
            AnnotationState::Block => "block",
            AnnotationState::Closing => "closing",
            AnnotationState::Separation => "separation",
        }
    }

    fn step(self, kind: LineKind) -> Step {
        match (self, kind) {
            (Self::None, LineKind::Empty) => Step::Next(Self::Separation),
            (Self::None, LineKind::Indented) => Step::Next(Self::Block),
            (Self::None, LineKind::TopLevel) => Step::Next(Self::None),
            (Self::Block, LineKind::Empty) => Step::Next(Self::Closing),
            (Self::Block, LineKind::Indented | LineKind::TopLevel) => Step::Next(Self::Block),
            (Self::Closing, LineKind::Empty) => Step::Next(Self::Separation),
            (Self::Closing, LineKind::TopLevel) => Step::Next(Self::None),
            (Self::Separation, LineKind::Empty) => Step::Next(Self::Separation),
            (Self::Separation, LineKind::TopLevel) => Step::PauseThen(Self::None),
            (Self::Closing | Self::Separation, LineKind::Indented) => Step::Invalid,
        }
    }
}

/// Return `units` with a `TimedPause(separation_pause)` inserted before every
/// top-level line that ends a separating blank run.
///
/// The relative order of the input units is never changed and pause units do
/// not affect the state machine.
///
/// # Errors
///
/// Returns [`PlaybackError::Structure`] when an indented line directly follows
/// a blank line that was already classified as closing or separating.
pub fn annotate(units: Vec<Unit>, separation_pause: Duration) -> Result<Vec<Unit>> {
    let mut annotated = Vec::with_capacity(units.len());
    let mut state = AnnotationState::default();
    let mut position = 0;

    for unit in units {
        let Unit::Literal(text) = &unit else {
            annotated.push(unit);
            continue;
        };
        position += 1;
        state = match state.step(LineKind::classify(text)) {
            Step::Next(next) => next,
            Step::PauseThen(next) => {
                debug!(position, line = %text.trim_end(), "separation pause");
                annotated.push(Unit::pause(separation_pause));
                next
            }
            Step::Invalid => {
                return Err(PlaybackError::Structure {
                    position,
                    text: text.trim_end().to_string(),
                    state: state.name(),
                }
                .into());
            }
        };
        annotated.push(unit);
    }

    Ok(annotated)
}
