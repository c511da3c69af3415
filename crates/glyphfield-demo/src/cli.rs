#![forbid(unsafe_code)]

//! Command-line argument parsing for the terminal host.
//!
//! Parses args manually (no external dependencies) to keep the binary lean.
//! Supports environment variable overrides via `GLYPHFIELD_*` prefix.

use std::env;
use std::path::PathBuf;
use std::process;
use std::time::Duration;

use glyphfield_engine::config::EngineConfig;
use glyphfield_render::color::Rgb;

const VERSION: &str = env!("CARGO_PKG_VERSION");

const HELP_TEXT: &str = "\
glyphfield - pointer-driven glyph field in your terminal

USAGE:
    glyphfield-demo [OPTIONS]

OPTIONS:
    --fps=N              Frame rate (default: 60)
    --radius=N           Neighborhood half-width around the pointer (default: 1)
    --scramble-ms=N      Scramble cadence in milliseconds (default: 50)
    --settle-ms=N        Settle fade length in milliseconds (default: 600)
    --base=#RRGGBB       Resting color (default: #1f2a36)
    --hover=#RRGGBB      Active color (default: #00ffa3)
    --seed=N             RNG seed for reproducible runs
    --log-file=PATH      Write logs to PATH (default: glyphfield.log)
    --exit-after-ms=N    Quit after N milliseconds (0 = never)
    --no-mouse           Disable mouse capture
    --help, -h           Show this help message
    --version, -V        Show version

KEYBINDINGS:
    q / Esc / Ctrl+C     Quit

ENVIRONMENT VARIABLES:
    GLYPHFIELD_FPS            Override --fps
    GLYPHFIELD_RADIUS         Override --radius
    GLYPHFIELD_SCRAMBLE_MS    Override --scramble-ms
    GLYPHFIELD_SETTLE_MS      Override --settle-ms
    GLYPHFIELD_BASE           Override --base
    GLYPHFIELD_HOVER          Override --hover
    GLYPHFIELD_SEED           Override --seed
    GLYPHFIELD_LOG_FILE       Override --log-file
    GLYPHFIELD_EXIT_AFTER_MS  Override --exit-after-ms
    GLYPHFIELD_LOG            Log filter, e.g. 'glyphfield_engine=debug'";

/// Parsed command-line options.
#[derive(Debug, Clone, PartialEq)]
pub struct Opts {
    /// Frames per second.
    pub fps: u32,
    /// Neighborhood half-width.
    pub radius: u16,
    /// Scramble cadence in milliseconds.
    pub scramble_ms: u64,
    /// Settle fade length in milliseconds.
    pub settle_ms: u64,
    /// Resting color.
    pub base: Rgb,
    /// Active color.
    pub hover: Rgb,
    /// RNG seed; `None` uses the engine default.
    pub seed: Option<u64>,
    /// Log destination.
    pub log_file: PathBuf,
    /// Whether mouse events are enabled.
    pub mouse: bool,
    /// Auto-exit after this many milliseconds (0 = disabled).
    pub exit_after_ms: u64,
}

impl Default for Opts {
    fn default() -> Self {
        let engine = EngineConfig::default();
        Self {
            fps: 60,
            radius: engine.hover_radius,
            scramble_ms: engine.scramble_interval.as_millis() as u64,
            settle_ms: engine.settle_duration.as_millis() as u64,
            base: engine.base_color,
            hover: engine.hover_color,
            seed: None,
            log_file: PathBuf::from("glyphfield.log"),
            mouse: true,
            exit_after_ms: 0,
        }
    }
}

/// What the command line asked for.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Run the field.
    Run(Opts),
    /// Print usage.
    Help,
    /// Print the version.
    Version,
}

impl Opts {
    /// Parse command-line arguments and environment variables, exiting on
    /// `--help`, `--version`, or invalid input.
    pub fn parse() -> Self {
        match parse_from(env::args().skip(1), |key| env::var(key).ok()) {
            Ok(Command::Run(opts)) => opts,
            Ok(Command::Help) => {
                println!("{HELP_TEXT}");
                process::exit(0);
            }
            Ok(Command::Version) => {
                println!("glyphfield-demo {VERSION}");
                process::exit(0);
            }
            Err(msg) => {
                eprintln!("{msg}");
                eprintln!("Run with --help for usage information.");
                process::exit(1);
            }
        }
    }

    /// Frame period derived from `fps` (at least 1 fps).
    pub fn frame_interval(&self) -> Duration {
        Duration::from_nanos(1_000_000_000 / u64::from(self.fps.max(1)))
    }

    /// Engine configuration: one terminal cell per grid cell.
    pub fn engine_config(&self) -> EngineConfig {
        let mut config = EngineConfig::default()
            .cell_size(1)
            .hover_radius(self.radius)
            .scramble_interval(Duration::from_millis(self.scramble_ms))
            .settle_duration(Duration::from_millis(self.settle_ms))
            .colors(self.base, self.hover);
        if let Some(seed) = self.seed {
            config = config.seed(seed);
        }
        config
    }
}

/// Parse `args` with `env` as the environment lookup.
///
/// Environment variables take precedence over defaults but are overridden
/// by explicit command-line flags.
pub fn parse_from<I, F>(args: I, env: F) -> Result<Command, String>
where
    I: IntoIterator<Item = String>,
    F: Fn(&str) -> Option<String>,
{
    let mut opts = Opts::default();

    // Apply environment variable defaults first
    if let Some(val) = env("GLYPHFIELD_FPS") {
        opts.fps = number("GLYPHFIELD_FPS", &val)?;
    }
    if let Some(val) = env("GLYPHFIELD_RADIUS") {
        opts.radius = number("GLYPHFIELD_RADIUS", &val)?;
    }
    if let Some(val) = env("GLYPHFIELD_SCRAMBLE_MS") {
        opts.scramble_ms = number("GLYPHFIELD_SCRAMBLE_MS", &val)?;
    }
    if let Some(val) = env("GLYPHFIELD_SETTLE_MS") {
        opts.settle_ms = number("GLYPHFIELD_SETTLE_MS", &val)?;
    }
    if let Some(val) = env("GLYPHFIELD_BASE") {
        opts.base = color("GLYPHFIELD_BASE", &val)?;
    }
    if let Some(val) = env("GLYPHFIELD_HOVER") {
        opts.hover = color("GLYPHFIELD_HOVER", &val)?;
    }
    if let Some(val) = env("GLYPHFIELD_SEED") {
        opts.seed = Some(number("GLYPHFIELD_SEED", &val)?);
    }
    if let Some(val) = env("GLYPHFIELD_LOG_FILE") {
        opts.log_file = PathBuf::from(val);
    }
    if let Some(val) = env("GLYPHFIELD_EXIT_AFTER_MS") {
        opts.exit_after_ms = number("GLYPHFIELD_EXIT_AFTER_MS", &val)?;
    }

    // Parse command-line args (override env vars)
    for arg in args {
        match arg.as_str() {
            "--help" | "-h" => return Ok(Command::Help),
            "--version" | "-V" => return Ok(Command::Version),
            "--no-mouse" => opts.mouse = false,
            other => {
                let (flag, val) = other
                    .split_once('=')
                    .ok_or_else(|| format!("Unknown argument: {other}"))?;
                match flag {
                    "--fps" => opts.fps = number(flag, val)?,
                    "--radius" => opts.radius = number(flag, val)?,
                    "--scramble-ms" => opts.scramble_ms = number(flag, val)?,
                    "--settle-ms" => opts.settle_ms = number(flag, val)?,
                    "--base" => opts.base = color(flag, val)?,
                    "--hover" => opts.hover = color(flag, val)?,
                    "--seed" => opts.seed = Some(number(flag, val)?),
                    "--log-file" => opts.log_file = PathBuf::from(val),
                    "--exit-after-ms" => opts.exit_after_ms = number(flag, val)?,
                    _ => return Err(format!("Unknown argument: {other}")),
                }
            }
        }
    }

    if opts.fps == 0 {
        return Err("Invalid --fps value: 0".to_string());
    }
    Ok(Command::Run(opts))
}

fn number<T: std::str::FromStr>(name: &str, val: &str) -> Result<T, String> {
    val.trim()
        .parse()
        .map_err(|_| format!("Invalid {name} value: {val}"))
}

fn color(name: &str, val: &str) -> Result<Rgb, String> {
    Rgb::from_hex(val.trim()).map_err(|_| format!("Invalid {name} value: {val}"))
}
