use anyhow::{Context, Result};
use clap::Parser;
use pyscriptty::config::DEFAULT_PYTHON;
use pyscriptty::{
    Engine, PlaybackConfig, SyncMode, TerminalGuard, annotate, logging, parse_file,
};
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(
    name = "pyscriptty",
    about = "Replay a Python script as if it were typed live into the interactive interpreter",
    version
)]
struct Args {
    /// Path to the annotated script file
    script: PathBuf,

    /// Interpreter to launch when the script has no python_exec directive
    #[arg(long, env = "PYSCRIPTTY_PYTHON")]
    python: Option<String>,

    /// Base delay between typed characters, in seconds
    #[arg(long, default_value_t = 0.1)]
    char_delay: f64,

    /// Random spread of the per-character delay (0.5 means +/- 50%)
    #[arg(long, default_value_t = 0.5)]
    jitter: f64,

    /// Idle time after each `>>> ` prompt, in seconds
    #[arg(long, default_value_t = 0.5)]
    prompt_delay: f64,

    /// Pause inserted between separated top-level chunks, in seconds
    #[arg(long, default_value_t = 2.0)]
    separation_pause: f64,

    /// Idle time after the last line before exiting, in seconds
    #[arg(long, default_value_t = 3.0)]
    end_delay: f64,

    /// Do not wait for prompts; sleep this many seconds after each line instead
    #[arg(long, value_name = "SECONDS")]
    fixed_settle: Option<f64>,

    /// Write diagnostics to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Args {
    fn playback_config(&self) -> Result<PlaybackConfig> {
        let sync = match self.fixed_settle {
            Some(secs) => SyncMode::Fixed(seconds("fixed-settle", secs)?),
            None => SyncMode::Prompt,
        };
        let config = PlaybackConfig {
            char_delay: seconds("char-delay", self.char_delay)?,
            jitter: self.jitter,
            separation_pause: seconds("separation-pause", self.separation_pause)?,
            end_delay: seconds("end-delay", self.end_delay)?,
            sync,
            ..PlaybackConfig::default()
        }
        .with_prompt_delay(seconds("prompt-delay", self.prompt_delay)?);
        config.validate()?;
        Ok(config)
    }
}

fn seconds(name: &str, value: f64) -> Result<Duration> {
    Duration::try_from_secs_f64(value).with_context(|| {
        format!(
            "--{} must be a non-negative number of seconds, got {}",
            name, value
        )
    })
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.log_file.as_deref())?;
    let config = args.playback_config()?;

    let script = parse_file(&args.script)
        .with_context(|| format!("Failed to parse script file: {}", args.script.display()))?;
    let units = annotate(script.units, config.separation_pause)
        .with_context(|| format!("Failed to pace script file: {}", args.script.display()))?;
    let python = script
        .python_exec
        .or(args.python)
        .unwrap_or_else(|| DEFAULT_PYTHON.to_string());

    let outcome = {
        let terminal = TerminalGuard::engage()?;
        tracing::debug!(cbreak = terminal.is_active(), python = %python, "starting playback");
        clear_screen()?;

        let mut engine = Engine::spawn(&python, config).context("Failed to spawn engine")?;
        tokio::select! {
            result = engine.execute(&units) => Some(result),
            _ = tokio::signal::ctrl_c() => None,
        }
    };

    match outcome {
        Some(result) => result.context("Failed to play script"),
        None => {
            tracing::info!("interrupted by user");
            println!("\nInterrupted by user");
            std::process::exit(1);
        }
    }
}

fn clear_screen() -> Result<()> {
    print!("\x1B[2J\x1B[1;1H");
    std::io::stdout().flush()?;
    Ok(())
}
