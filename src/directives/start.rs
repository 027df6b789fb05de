//! [`Start`] directive — discards everything accumulated so far.
//!
//! Script syntax: `# <pyscript>: start`

use crate::directive::{Directive, LexerState};
use anyhow::{Result, bail};

/// Marks where the played content begins; earlier lines are a preamble that is
/// kept in the file (e.g. for editors or linters) but never played.
pub struct Start;

impl Start {
    pub const NAME: &'static str = "start";
}

impl Directive for Start {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn parse(options: &[&str]) -> Result<Self> {
        if !options.is_empty() {
            bail!("'start' takes no options");
        }
        Ok(Self)
    }

    fn apply(&self, _line: usize, state: &mut LexerState) -> Result<()> {
        state.units.clear();
        Ok(())
    }
}
