#![forbid(unsafe_code)]

//! Command-line argument parsing for the terminal visualizer.
//!
//! Parses args manually to keep the binary lean. Environment variables with
//! the `SORTVIZ_` prefix provide defaults; explicit flags override them.

use std::env;
use std::process;
use std::str::FromStr;
use std::time::Duration;

use sortviz_core::config::{SIZE_RANGE, SPEED_RANGE};
use sortviz_core::{Algorithm, ParseError, Theme, VisualizerConfig};

const VERSION: &str = env!("CARGO_PKG_VERSION");

const HELP_TEXT: &str = "\
sortviz: watch sorting algorithms run one step at a time

USAGE:
    sortviz [OPTIONS]

OPTIONS:
    --algorithm=NAME     bubble (default), quick, merge, heap, selection, insertion
    --theme=NAME         default (bars), space (circles), tree (forest)
    --size=N             Number of values, 10-100 (default: 50)
    --speed=N            Frames per step, 1-30; lower is faster (default: 10)
    --seed=N             Seed for the generated values
    --fps=N              Render frames per second (default: 60)
    --bell               Ring the terminal bell for every tone
    --autostart          Start sorting immediately
    --exit-after-ms=N    Quit after N milliseconds (0 = never)
    --help, -h           Show this help message
    --version, -V        Show version

KEYBINDINGS:
    Space           Start / stop
    r               Reset with fresh values
    a / 1-6         Next algorithm / pick algorithm by number
    t               Next theme
    + / -           Faster / slower
    ] / [           More / fewer values
    q / Esc / Ctrl+C  Quit

ENVIRONMENT VARIABLES:
    SORTVIZ_ALGORITHM       Default for --algorithm
    SORTVIZ_THEME           Default for --theme
    SORTVIZ_SIZE            Default for --size
    SORTVIZ_SPEED           Default for --speed
    SORTVIZ_SEED            Default for --seed
    SORTVIZ_FPS             Default for --fps
    SORTVIZ_EXIT_AFTER_MS   Default for --exit-after-ms
    SORTVIZ_LOG             Write logs to this file
    SORTVIZ_LOG_LEVEL       Log filter directives (default: debug)";

/// Default render rate.
pub const DEFAULT_FPS: u32 = 60;

/// Parsed command-line options.
#[derive(Debug, Clone, PartialEq)]
pub struct Opts {
    pub algorithm: Algorithm,
    pub theme: Theme,
    pub size: usize,
    pub speed: u32,
    /// Seed override; `None` keeps the configuration default.
    pub seed: Option<u64>,
    pub fps: u32,
    /// Ring the terminal bell for each tone.
    pub bell: bool,
    /// Start running without waiting for Space.
    pub autostart: bool,
    /// Auto-exit after this many milliseconds (0 = disabled).
    pub exit_after_ms: u64,
}

impl Default for Opts {
    fn default() -> Self {
        let config = VisualizerConfig::default();
        Self {
            algorithm: config.algorithm,
            theme: config.theme,
            size: config.size,
            speed: config.speed,
            seed: None,
            fps: DEFAULT_FPS,
            bell: false,
            autostart: false,
            exit_after_ms: 0,
        }
    }
}

/// What the command line asked for.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Run(Opts),
    Help,
    Version,
}

/// Rejected command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliError {
    UnknownArgument(String),
    Invalid(ParseError),
}

impl core::fmt::Display for CliError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::UnknownArgument(arg) => write!(f, "unknown argument: {arg}"),
            Self::Invalid(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Invalid(err) => Some(err),
            Self::UnknownArgument(_) => None,
        }
    }
}

impl From<ParseError> for CliError {
    fn from(err: ParseError) -> Self {
        Self::Invalid(err)
    }
}

fn number<T: FromStr>(field: &'static str, value: &str) -> Result<T, ParseError> {
    value.trim().parse().map_err(|_| ParseError::InvalidNumber {
        field,
        value: value.to_string(),
    })
}

impl Opts {
    /// Parse the process arguments and `SORTVIZ_*` environment.
    ///
    /// Prints help or version and exits when asked to; prints the error and
    /// exits with status 1 on invalid input.
    pub fn parse() -> Self {
        let args = env::args().skip(1);
        match Self::parse_from(|key| env::var(key).ok(), args) {
            Ok(Command::Run(opts)) => opts,
            Ok(Command::Help) => {
                println!("{HELP_TEXT}");
                process::exit(0);
            }
            Ok(Command::Version) => {
                println!("sortviz {VERSION}");
                process::exit(0);
            }
            Err(err) => {
                eprintln!("{err}");
                eprintln!("Run with --help for usage information.");
                process::exit(1);
            }
        }
    }

    /// Parse from an explicit environment lookup and argument list.
    ///
    /// Malformed environment values are ignored; malformed flags are errors.
    pub fn parse_from<F, I>(lookup: F, args: I) -> Result<Command, CliError>
    where
        F: Fn(&str) -> Option<String>,
        I: IntoIterator<Item = String>,
    {
        let mut opts = Self::default();

        // Environment defaults first
        if let Some(val) = lookup("SORTVIZ_ALGORITHM")
            && let Ok(algorithm) = val.parse()
        {
            opts.algorithm = algorithm;
        }
        if let Some(val) = lookup("SORTVIZ_THEME")
            && let Ok(theme) = val.parse()
        {
            opts.theme = theme;
        }
        if let Some(val) = lookup("SORTVIZ_SIZE")
            && let Ok(n) = val.parse()
        {
            opts.size = n;
        }
        if let Some(val) = lookup("SORTVIZ_SPEED")
            && let Ok(n) = val.parse()
        {
            opts.speed = n;
        }
        if let Some(val) = lookup("SORTVIZ_SEED")
            && let Ok(n) = val.parse()
        {
            opts.seed = Some(n);
        }
        if let Some(val) = lookup("SORTVIZ_FPS")
            && let Ok(n) = val.parse()
        {
            opts.fps = n;
        }
        if let Some(val) = lookup("SORTVIZ_EXIT_AFTER_MS")
            && let Ok(n) = val.parse()
        {
            opts.exit_after_ms = n;
        }

        // Command-line args override env vars
        for arg in args {
            match arg.as_str() {
                "--help" | "-h" => return Ok(Command::Help),
                "--version" | "-V" => return Ok(Command::Version),
                "--bell" => opts.bell = true,
                "--autostart" => opts.autostart = true,
                other => {
                    if let Some(val) = other.strip_prefix("--algorithm=") {
                        opts.algorithm = val.parse()?;
                    } else if let Some(val) = other.strip_prefix("--theme=") {
                        opts.theme = val.parse()?;
                    } else if let Some(val) = other.strip_prefix("--size=") {
                        opts.size = number("size", val)?;
                    } else if let Some(val) = other.strip_prefix("--speed=") {
                        opts.speed = number("speed", val)?;
                    } else if let Some(val) = other.strip_prefix("--seed=") {
                        opts.seed = Some(number("seed", val)?);
                    } else if let Some(val) = other.strip_prefix("--fps=") {
                        opts.fps = number("fps", val)?;
                    } else if let Some(val) = other.strip_prefix("--exit-after-ms=") {
                        opts.exit_after_ms = number("exit-after-ms", val)?;
                    } else {
                        return Err(CliError::UnknownArgument(other.to_string()));
                    }
                }
            }
        }

        Ok(Command::Run(opts))
    }

    /// Engine configuration for these options, clamped into range.
    #[must_use]
    pub fn visualizer_config(&self) -> VisualizerConfig {
        let defaults = VisualizerConfig::default();
        VisualizerConfig {
            algorithm: self.algorithm,
            theme: self.theme,
            size: self.size,
            speed: self.speed,
            seed: self.seed.unwrap_or(defaults.seed),
            ..defaults
        }
        .clamped()
    }

    /// Time between rendered frames.
    #[must_use]
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs(1) / self.fps.clamp(1, 240)
    }

    /// Whether `size` and `speed` were given inside their allowed ranges.
    #[must_use]
    pub fn in_range(&self) -> bool {
        SIZE_RANGE.contains(&self.size) && SPEED_RANGE.contains(&self.speed)
    }
}
