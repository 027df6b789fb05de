//! Script lexer: turns an annotated Python script into playback [`Unit`]s.
//!
//! The top-level entry points are [`parse_str`] and [`parse_file`].

use crate::directive::{Directive, LexerState};
use crate::directives::{Pause, PythonExec, Start};
use crate::error::PlaybackError;
use crate::unit::Unit;
use anyhow::{Context as _, Result, anyhow};
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// Every directive line starts with this prefix.
pub const DIRECTIVE_PREFIX: &str = "# <pyscript>:";

/// Lines starting with this marker are dropped entirely.
pub const IGNORE_PREFIX: &str = "##";

/// A lexed script: the interpreter it asks for and its units in reading order.
#[derive(Debug, Clone, PartialEq)]
pub struct Script {
    pub python_exec: Option<String>,
    pub units: Vec<Unit>,
}

impl From<LexerState> for Script {
    fn from(state: LexerState) -> Self {
        Script {
            python_exec: state.python_exec,
            units: state.units,
        }
    }
}

/// Lex a script from a string slice.
///
/// Each physical line becomes one [`Unit::Literal`] with trailing spaces
/// removed and its newline kept, except lines starting with `##` (dropped) and
/// lines starting with `# <pyscript>:` (directives).
///
/// # Errors
///
/// Returns [`PlaybackError::Config`] for an unknown or malformed directive, or
/// a `python_exec` directive anywhere but the first line.
///
/// # Example
///
/// ```
/// use pyscriptty::parse_str;
///
/// let script = parse_str("x = 1\n# <pyscript>: pause 1\nprint(x)\n").unwrap();
/// assert_eq!(script.units.len(), 3);
/// ```
pub fn parse_str(content: &str) -> Result<Script> {
    let mut state = LexerState::default();
    for (idx, line) in content.split_inclusive('\n').enumerate() {
        let line_num = idx + 1;
        if line.starts_with(IGNORE_PREFIX) {
            continue;
        }
        if let Some(directive) = line.strip_prefix(DIRECTIVE_PREFIX) {
            apply_directive(directive, line_num, &mut state).map_err(|e| {
                PlaybackError::Config {
                    line: line_num,
                    text: line.trim_end().to_string(),
                    reason: format!("{e:#}"),
                }
            })?;
            continue;
        }
        state.units.push(Unit::Literal(strip_trailing_spaces(line)));
    }
    debug!(
        units = state.units.len(),
        python_exec = ?state.python_exec,
        "lexed script"
    );
    Ok(state.into())
}

/// Lex a script from a file.
///
/// Reads the entire file into memory and delegates to [`parse_str`].
pub fn parse_file(path: impl AsRef<Path>) -> Result<Script> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read script file: {}", path.display()))?;
    parse_str(&content)
}

type ParseFn = fn(&[&str]) -> Result<Box<dyn Directive>>;

static REGISTRY: &[(&str, ParseFn)] = &[
    (Pause::NAME, Pause::parse_boxed),
    (PythonExec::NAME, PythonExec::parse_boxed),
    (Start::NAME, Start::parse_boxed),
];

/// Dispatch the text after the directive prefix to the matching directive.
///
/// To add a new directive, add one entry to [`REGISTRY`] using the directive's
/// `NAME` constant and `parse_boxed` function pointer.
fn apply_directive(text: &str, line: usize, state: &mut LexerState) -> Result<()> {
    let mut tokens = text.split_whitespace();
    let name = tokens
        .next()
        .ok_or_else(|| anyhow!("Missing directive name"))?;
    let options: Vec<&str> = tokens.collect();
    let directive = REGISTRY
        .iter()
        .find(|(directive_name, _)| *directive_name == name)
        .map(|(_, parse)| parse(&options))
        .unwrap_or_else(|| Err(anyhow!("Unknown directive '{}'", name)))?;
    debug!(line, directive = directive.name(), "applying directive");
    directive.apply(line, state)
}

/// Remove trailing spaces in front of the line terminator, keeping the terminator.
fn strip_trailing_spaces(line: &str) -> String {
    match line.strip_suffix('\n') {
        Some(body) => format!("{}\n", body.trim_end_matches(' ')),
        None => line.trim_end_matches(' ').to_string(),
    }
}

/// Parse a duration: bare seconds (`2`, `0.5`) or with a unit (`1.5s`, `300ms`).
pub(crate) fn parse_duration(s: &str) -> Result<Duration> {
    let s = s.trim();
    let secs = if let Some(ms_str) = s.strip_suffix("ms") {
        let ms: f64 = ms_str
            .trim()
            .parse()
            .context("Invalid milliseconds value")?;
        ms / 1000.0
    } else {
        let secs_str = s.strip_suffix('s').unwrap_or(s);
        secs_str.trim().parse().context("Invalid seconds value")?
    };
    Duration::try_from_secs_f64(secs).map_err(|_| anyhow!("Invalid duration: {}", s))
}
