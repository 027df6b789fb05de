//! The [`Directive`] trait and the [`LexerState`] directives act on.

use crate::unit::Unit;
use anyhow::Result;

/// State accumulated while reading a script file.
///
/// Directives mutate it; literal lines are appended by the parser itself.
#[derive(Debug, Default)]
pub struct LexerState {
    pub python_exec: Option<String>,
    pub units: Vec<Unit>,
}

/// A single `# <pyscript>:` directive.
///
/// Implement this trait to add a new directive. Then:
///
/// 1. Define `pub const NAME: &'static str` on your struct, the keyword that
///    follows the directive prefix (e.g. `"pause"`).
/// 2. Re-export the struct from `src/directives/mod.rs`.
/// 3. Add one entry to the `REGISTRY` in [`crate::parser`]:
///    `(MyDirective::NAME, MyDirective::parse_boxed)`.
pub trait Directive: 'static {
    /// The directive keyword, accessible at runtime through a trait object.
    fn name(&self) -> &'static str;

    /// Parse this directive from its whitespace-separated options.
    fn parse(options: &[&str]) -> Result<Self>
    where
        Self: Sized;

    /// Parse and box this directive. Used as the function-pointer type stored
    /// in the directive registry.
    fn parse_boxed(options: &[&str]) -> Result<Box<dyn Directive>>
    where
        Self: Sized,
    {
        Ok(Box::new(Self::parse(options)?))
    }

    /// Apply the directive found on physical line `line` (1-indexed).
    fn apply(&self, line: usize, state: &mut LexerState) -> Result<()>;
}
