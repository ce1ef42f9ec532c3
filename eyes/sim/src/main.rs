//! Robot Eyes Simulator - Terminal Driver for the Animation Engine
//!
//! Runs the eyes engine against a terminal display, printing every eye
//! update and text scroll window to stdout. Useful for checking sequences
//! and timing without the LED hardware.
//!
//! # Usage
//!
//! ```bash
//! # Play every emotion once, then idle-blink for 10 seconds
//! robot-eyes-sim
//!
//! # A short script with a message at the end
//! robot-eyes-sim --emotions blink,look-left,angry --auto-reverse --text "Hello"
//!
//! # With config file
//! robot-eyes-sim --config ~/.config/robot-eyes/eyes.toml
//!
//! # Verbose logging
//! RUST_LOG=debug robot-eyes-sim
//! ```

mod terminal;

use std::collections::VecDeque;
use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};

use robot_eyes_core::{
    load_config_from_path, AnimationEngine, ConfigSource, Emotion, EyeLayout, EyesConfig,
    PlaybackRequest, SystemClock,
};

use terminal::TerminalDisplay;

/// Polling period of the simulated host loop (tick_rate)
const TICK_RATE: Duration = Duration::from_millis(5);

/// Robot Eyes Simulator - plays the eye animations in a terminal
#[derive(Parser, Debug)]
#[command(name = "robot-eyes-sim")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Configuration file path
    #[arg(short = 'c', long, env = "ROBOT_EYES_CONFIG", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Emotions to play in order, comma separated (default: all of them)
    #[arg(short = 'e', long, value_delimiter = ',', value_name = "NAMES")]
    emotions: Vec<String>,

    /// Play each emotion back to its first frame
    #[arg(short = 'a', long)]
    auto_reverse: bool,

    /// Start each emotion from its last frame
    #[arg(short = 'r', long)]
    reverse: bool,

    /// Message to scroll after the emotions
    #[arg(short = 't', long)]
    text: Option<String>,

    /// Override idle auto-blink
    #[arg(long, value_name = "BOOL")]
    auto_blink: Option<bool>,

    /// Keep running at least this long
    #[arg(short = 'd', long, default_value_t = 10)]
    duration_secs: u64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short = 'l', long, env = "ROBOT_EYES_LOG_LEVEL", default_value = "info")]
    log_level: String,
}

/// Initialize logging with the specified level
///
/// Logs go to stderr so they do not interleave with the display output.
fn init_logging(level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(format!(
            "robot_eyes_sim={level},robot_eyes_core={level}"
        ))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();
}

/// Resolve the emotion names given on the command line
fn parse_emotions(names: &[String]) -> Result<Vec<Emotion>> {
    if names.is_empty() {
        return Ok(Emotion::SELECTABLE.to_vec());
    }
    names
        .iter()
        .map(|name| {
            name.parse::<Emotion>()
                .with_context(|| format!("Invalid --emotions entry: {name:?}"))
        })
        .collect()
}

/// Apply command-line overrides on top of file and environment settings
fn apply_cli_overrides(config: &mut EyesConfig, args: &Args) {
    if let Some(auto_blink) = args.auto_blink {
        config.auto_blink = auto_blink;
        config.set_source(ConfigSource::Cli);
    }
}

/// What the simulated host still has to play
#[derive(Debug)]
struct Script {
    requests: VecDeque<PlaybackRequest>,
    text: Option<String>,
}

impl Script {
    fn new(emotions: &[Emotion], auto_reverse: bool, reverse: bool, text: Option<String>) -> Self {
        Self {
            requests: emotions
                .iter()
                .map(|&e| PlaybackRequest::new(e, auto_reverse, reverse))
                .collect(),
            text,
        }
    }

    /// Hand the next step to an idle engine; `false` once nothing is left
    fn feed<D, C>(&mut self, engine: &mut AnimationEngine<D, C>) -> bool
    where
        D: robot_eyes_core::EyeDisplay,
        C: robot_eyes_core::Clock,
    {
        if let Some(request) = self.requests.pop_front() {
            engine.request(request);
            return true;
        }
        if let Some(text) = self.text.take() {
            return engine.request_text(&text);
        }
        false
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args.log_level);

    let mut config =
        load_config_from_path(args.config.clone()).context("Failed to load configuration")?;
    apply_cli_overrides(&mut config, &args);

    info!(
        source = %config.source(),
        base_module = config.base_module,
        auto_blink = config.auto_blink,
        "Starting robot eyes simulator"
    );

    let emotions = parse_emotions(&args.emotions)?;
    let mut script = Script::new(&emotions, args.auto_reverse, args.reverse, args.text.clone());

    let layout = EyeLayout::new(config.base_module);
    let display = TerminalDisplay::new(io::stdout().lock(), layout);
    let mut engine = AnimationEngine::with_config(display, SystemClock::new(), &config);

    let duration = Duration::from_secs(args.duration_secs);
    let started = Instant::now();
    let mut script_done = false;

    loop {
        let frame_start = Instant::now();
        let idle = engine.advance();

        if let Some(e) = engine.display_mut().take_error() {
            return Err(e).context("Failed to write to the terminal");
        }

        if idle && !script_done {
            script_done = !script.feed(&mut engine);
            if script_done {
                debug!("Script finished");
            }
        }

        if script_done && idle && started.elapsed() >= duration {
            break;
        }

        // Frame rate limiting for the polling loop
        let frame_elapsed = frame_start.elapsed();
        if frame_elapsed < TICK_RATE {
            std::thread::sleep(TICK_RATE - frame_elapsed);
        }
    }

    info!(
        updates = engine.display().updates(),
        elapsed_ms = started.elapsed().as_millis(),
        "Simulation complete"
    );
    Ok(())
}
