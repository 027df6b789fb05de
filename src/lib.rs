//! # pyscriptty
//!
//! Replay an annotated Python script as if someone were typing it live into
//! the interactive interpreter, for recorded demos.
//!
//! The script is lexed into [`Unit`]s, a pacing pass adds pauses between
//! independent chunks, and the [`Engine`] types every line on the terminal
//! with a human-like cadence, sends it to `python -i` and waits for the next
//! `>>> ` or `... ` prompt before moving on.
//!
//! ## Quick start
//!
//! ```no_run
//! use pyscriptty::{Engine, PlaybackConfig, annotate, parse_str};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let config = PlaybackConfig::default();
//!     let script = parse_str("import math\n\nmath.pi\n")?;
//!     let units = annotate(script.units, config.separation_pause)?;
//!
//!     let python = script.python_exec.as_deref().unwrap_or("python3");
//!     let mut engine = Engine::spawn(python, config)?;
//!     engine.execute(&units).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Script syntax
//!
//! Every line is typed as-is, except:
//!
//! | Line | Effect |
//! |------|--------|
//! | `## anything` | Dropped, never typed |
//! | `# <pyscript>: pause 1.5` | Sleep 1.5 seconds (`300ms` and `2s` also work) |
//! | `# <pyscript>: python_exec /usr/bin/python3.11` | Interpreter to launch; first line only |
//! | `# <pyscript>: start` | Discard everything above; playback starts here |
//!
//! A blank line at top level (not one that merely closes an indented block)
//! gets an extra pause before the next statement, to ease cutting the video.
//!
//! ## Custom output handling
//!
//! [`Engine::spawn`] writes everything to stdout. Use
//! [`Engine::spawn_with_handler`] to send it anywhere else:
//!
//! ```no_run
//! use pyscriptty::{Engine, PlaybackConfig, parse_str};
//! use std::sync::{Arc, Mutex};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let script = parse_str("print('hello')\n")?;
//!
//!     let captured = Arc::new(Mutex::new(Vec::<u8>::new()));
//!     let sink = captured.clone();
//!     let mut engine = Engine::spawn_with_handler(
//!         "python3",
//!         PlaybackConfig::default(),
//!         Arc::new(move |data: &[u8]| sink.lock().unwrap().extend_from_slice(data)),
//!     )?;
//!
//!     engine.execute(&script.units).await?;
//!     println!("{}", String::from_utf8_lossy(&captured.lock().unwrap()));
//!     Ok(())
//! }
//! ```

pub mod annotate;
pub mod config;
pub mod directive;
pub mod directives;
pub mod engine;
pub mod error;
pub mod logging;
pub mod output;
pub mod parser;
pub mod pause;
pub mod prompt;
pub mod terminal;
pub mod unit;
pub(crate) mod child;
pub(crate) mod reader;

pub use annotate::{AnnotationState, annotate};
pub use config::{PlaybackConfig, SyncMode};
pub use directive::{Directive, LexerState};
pub use engine::Engine;
pub use error::PlaybackError;
pub use output::OutputHandler;
pub use parser::{Script, parse_file, parse_str};
pub use prompt::{PromptSpec, PromptSynchronizer};
pub use terminal::TerminalGuard;
pub use unit::Unit;
