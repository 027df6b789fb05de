//! Tracing subscriber setup.
//!
//! The recorded demo lives on stdout, so diagnostics go either to a log file
//! or to stderr at `warn` level. `PYSCRIPTTY_LOG` overrides the filter using
//! the usual `EnvFilter` syntax.

use anyhow::{Context, Result};
use std::fs::File;
use std::io;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

pub const LOG_ENV: &str = "PYSCRIPTTY_LOG";

/// Install the global subscriber, logging to `log_file` when given.
pub fn init(log_file: Option<&Path>) -> Result<()> {
    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file: {}", path.display()))?;
            tracing_subscriber::registry()
                .with(fmt::layer().with_writer(Arc::new(file)).with_ansi(false))
                .with(filter("debug"))
                .try_init()?;
        }
        None => {
            tracing_subscriber::registry()
                .with(fmt::layer().with_writer(io::stderr).with_target(false))
                .with(filter("warn"))
                .try_init()?;
        }
    }
    Ok(())
}

fn filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default))
}
