//! scriptlog CLI - format, inspect and log values from the command line.
//!
//! Commands:
//! - `format` - Printf-style formatting of the arguments
//! - `inspect` - Structured rendering of one value
//! - `log` - Emit a categorized, timestamped line on stderr
//!
//! Every value argument is parsed as JSON when it parses, and taken as a
//! plain string otherwise.

#![forbid(unsafe_code)]

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use scriptlog_console::{ConfigError, Logger, LoggerConfig};
use scriptlog_core::logging::targets;
use scriptlog_core::{Depth, InspectOptions, Value, format, inspect};

/// scriptlog - format, inspect and log script values.
#[derive(Parser)]
#[command(name = "scriptlog")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Print scriptlog's own diagnostics to stderr.
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Format values with `%s`, `%d`, `%j` and `%%` substitution.
    ///
    /// The first argument is the template when it is a string; remaining
    /// arguments are appended separated by spaces.
    Format {
        /// Template and values.
        #[arg(allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Render a single value the way `dir` shows it.
    Inspect {
        /// The value to render.
        #[arg(allow_hyphen_values = true)]
        value: String,

        /// Levels of nesting to show before eliding.
        #[arg(long, short = 'd', conflicts_with = "unlimited")]
        depth: Option<usize>,

        /// Show every level of nesting.
        #[arg(long)]
        unlimited: bool,

        /// Wrap tokens in ANSI colour codes.
        #[arg(long)]
        colors: bool,

        /// Include hidden properties.
        #[arg(long)]
        show_hidden: bool,

        /// Options as a JSON object (`showHidden`, `depth`, `colors`,
        /// `customInspect`); replaces the flags above.
        #[arg(long, short = 'o')]
        options: Option<String>,
    },

    /// Log values under a category (log, info, warn, error, dir, trace, debug).
    ///
    /// Unknown categories are logged with the `????` label. For `dir`, the
    /// first value is dumped after the header line.
    Log {
        /// Category name.
        category: String,

        /// Template and values. Flags may follow them; pass values that
        /// start with `-` after `--`.
        #[arg(allow_negative_numbers = true)]
        args: Vec<String>,

        /// Omit the `[MM/DD HH:MM]` segment.
        #[arg(long)]
        no_date: bool,

        /// Emit `debug` entries.
        #[arg(long)]
        debug: bool,

        /// Line prefix.
        #[arg(long, short = 'p')]
        prefix: Option<String>,

        /// Read settings from this TOML file instead of the user config.
        #[arg(long, short = 'c', env = "SCRIPTLOG_CONFIG")]
        config: Option<PathBuf>,
    },
}

/// Errors surfaced to the user.
#[derive(Debug)]
enum CliError {
    Io(io::Error),
    Config(ConfigError),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Io(e) => write!(f, "{e}"),
            CliError::Config(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(err: io::Error) -> Self {
        CliError::Io(err)
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        CliError::Config(err)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.verbose {
        Logger::from_config(&LoggerConfig::from_env().debug(true)).try_init();
    }

    let result = match cli.command {
        Commands::Format { args } => cmd_format(&args),
        Commands::Inspect {
            value,
            depth,
            unlimited,
            colors,
            show_hidden,
            options,
        } => {
            let options = match options {
                Some(json) => InspectOptions::from_value(&parse_arg(&json)),
                None => InspectOptions::new()
                    .depth(resolve_depth(depth, unlimited))
                    .colors(colors)
                    .show_hidden(show_hidden),
            };
            cmd_inspect(&value, options)
        }
        Commands::Log {
            category,
            args,
            no_date,
            debug,
            prefix,
            config,
        } => load_config(config)
            .map(|config| apply_flags(config, no_date, debug, prefix))
            .map(|config| cmd_log(&category, &args, &config)),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Parse a command-line value: JSON when it parses, otherwise the raw text.
fn parse_arg(arg: &str) -> Value {
    match serde_json::from_str::<serde_json::Value>(arg) {
        Ok(json) => Value::from(json),
        Err(_) => Value::from(arg),
    }
}

fn parse_args(args: &[String]) -> Vec<Value> {
    args.iter().map(|arg| parse_arg(arg)).collect()
}

fn resolve_depth(depth: Option<usize>, unlimited: bool) -> Depth {
    if unlimited {
        Depth::Unlimited
    } else {
        Depth::Limited(depth.map_or(2, |d| isize::try_from(d).unwrap_or(isize::MAX)))
    }
}

fn load_config(path: Option<PathBuf>) -> Result<LoggerConfig, CliError> {
    match path {
        Some(path) => {
            log::debug!(target: targets::CONSOLE, "Reading config from {}", path.display());
            Ok(LoggerConfig::from_file(&path)?.with_env())
        }
        None => Ok(LoggerConfig::load()),
    }
}

fn apply_flags(
    mut config: LoggerConfig,
    no_date: bool,
    debug: bool,
    prefix: Option<String>,
) -> LoggerConfig {
    if no_date {
        config = config.show_date_time(false);
    }
    if debug {
        config = config.debug(true);
    }
    if let Some(prefix) = prefix {
        config = config.with_prefix(prefix);
    }
    config
}

/// Format command: print `format(args)` on stdout.
fn cmd_format(args: &[String]) -> Result<(), CliError> {
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", format(&parse_args(args)))?;
    Ok(())
}

/// Inspect command: print the rendered value on stdout.
fn cmd_inspect(value: &str, options: InspectOptions) -> Result<(), CliError> {
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", inspect(&parse_arg(value), options))?;
    Ok(())
}

/// Log command: emit through a stderr `Logger`.
fn cmd_log(category: &str, args: &[String], config: &LoggerConfig) {
    let logger = Logger::from_config(config);
    let values = parse_args(args);

    match category {
        "log" => {
            logger.log(&values);
        }
        "info" => {
            logger.info(&values);
        }
        "warn" => {
            logger.warn(&values);
        }
        "error" => {
            logger.error(&values);
        }
        "dir" => {
            let (obj, message) = values
                .split_first()
                .map_or((Value::Undefined, &[][..]), |(first, rest)| (first.clone(), rest));
            logger.dir(&obj, message);
        }
        "trace" => {
            logger.trace(&values);
        }
        "debug" => {
            logger.debug(&values);
        }
        other => {
            logger.log_named(other, &values);
        }
    }
}
