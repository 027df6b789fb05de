use std::time::Duration;

/// One step of a playback sequence.
#[derive(Debug, Clone, PartialEq)]
pub enum Unit {
    /// A script line to type and submit, newline included when the source had one
    Literal(String),

    /// Sleep without touching the terminal or the interpreter
    TimedPause(Duration),
}

impl Unit {
    /// Create a Literal unit from a string
    pub fn literal(text: impl Into<String>) -> Self {
        Unit::Literal(text.into())
    }

    /// Create a TimedPause unit
    pub fn pause(duration: Duration) -> Self {
        Unit::TimedPause(duration)
    }

    /// Create a TimedPause unit from fractional seconds
    pub fn pause_secs(secs: f64) -> Self {
        Unit::TimedPause(Duration::from_secs_f64(secs))
    }

    /// The line text, if this is a Literal
    pub fn as_literal(&self) -> Option<&str> {
        match self {
            Unit::Literal(text) => Some(text),
            Unit::TimedPause(_) => None,
        }
    }
}
