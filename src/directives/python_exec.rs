//! [`PythonExec`] directive — chooses the interpreter executable.
//!
//! Script syntax: `# <pyscript>: python_exec /usr/bin/python3.11`, first line only.

use crate::directive::{Directive, LexerState};
use anyhow::{Result, anyhow, bail};

pub struct PythonExec {
    pub path: String,
}

impl PythonExec {
    pub const NAME: &'static str = "python_exec";
}

impl Directive for PythonExec {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn parse(options: &[&str]) -> Result<Self> {
        match options {
            [path] => Ok(Self {
                path: (*path).to_string(),
            }),
            _ => Err(anyhow!(
                "'python_exec' takes exactly one path, got {}",
                options.len()
            )),
        }
    }

    fn apply(&self, line: usize, state: &mut LexerState) -> Result<()> {
        if line != 1 {
            bail!("'python_exec' must be on the first line of the script");
        }
        state.python_exec = Some(self.path.clone());
        Ok(())
    }
}
