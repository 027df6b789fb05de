//! [`Pause`] directive — inserts a timed pause into the playback.
//!
//! Script syntax: `# <pyscript>: pause 1.5` (seconds), or with an explicit
//! unit: `pause 1.5s`, `pause 300ms`.

use crate::directive::{Directive, LexerState};
use crate::parser::parse_duration;
use crate::unit::Unit;
use anyhow::{Result, anyhow};
use std::time::Duration;

pub struct Pause {
    pub duration: Duration,
}

impl Pause {
    pub const NAME: &'static str = "pause";
}

impl Directive for Pause {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn parse(options: &[&str]) -> Result<Self> {
        match options {
            [value] => Ok(Self {
                duration: parse_duration(value)?,
            }),
            _ => Err(anyhow!(
                "'pause' takes exactly one duration, got {}",
                options.len()
            )),
        }
    }

    fn apply(&self, _line: usize, state: &mut LexerState) -> Result<()> {
        state.units.push(Unit::pause(self.duration));
        Ok(())
    }
}
