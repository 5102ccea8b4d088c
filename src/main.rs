//! eda-artifact-gen: generators for PCB design artifacts
//!
//! Footprints, schematic symbols and distributor BOMs, each written in one
//! pass to a file or stdout. Logs go to stderr.

use std::error::Error as _;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use thiserror::Error;
use tracing::{debug, error, info, Level};
use tracing_subscriber::EnvFilter;

use eda_artifact_gen::config::{self, StyleConfig};
use eda_artifact_gen::error::{ConfigError, TableError};
use eda_artifact_gen::footprint::{self, FootprintError};
use eda_artifact_gen::{bom, symbol};

/// Generators for PCB design artifacts.
///
/// Builds KiCad footprints for BGA, QFN, LGA and dual-row packages,
/// multi-unit schematic symbols from pin-out tables, and distributor order
/// lists from KiCad BOM exports.
#[derive(Parser, Debug)]
#[command(name = "eda-artifact-gen")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to settings file
    #[arg(short, long, value_name = "CONFIG_FILE", global = true)]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Decrease logging verbosity (only show errors)
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a KiCad footprint
    Footprint {
        /// Package description (JSON)
        #[arg(value_name = "SPEC_JSON", required_unless_present = "preset")]
        spec: Option<PathBuf>,

        /// Built-in package preset
        #[arg(long, conflicts_with = "spec")]
        preset: Option<String>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Pin-out table to check pad numbers against
        #[arg(long, value_name = "CSV", requires = "package")]
        pinout: Option<PathBuf>,

        /// Package column of the pin-out table
        #[arg(long, requires = "pinout")]
        package: Option<String>,
    },

    /// Generate a KiCad schematic symbol from a pin-out table
    Symbol {
        /// Pin-out table (CSV)
        #[arg(value_name = "PINOUT_CSV")]
        pinout: PathBuf,

        /// Symbol description (JSON)
        #[arg(value_name = "SPEC_JSON", required_unless_present = "preset")]
        spec: Option<PathBuf>,

        /// Built-in symbol preset
        #[arg(long, conflicts_with = "spec")]
        preset: Option<String>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Translate a KiCad BOM export into a distributor order list
    Bom {
        /// KiCad BOM export (CSV)
        input: PathBuf,

        /// Order list to write (CSV)
        output: PathBuf,

        /// Number of boards to order parts for
        #[arg(short, long, default_value_t = 1)]
        multiplier: u64,
    },

    /// List built-in presets
    List,
}

/// Errors reported by the command-line front end.
#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Footprint(#[from] FootprintError),

    #[error(transparent)]
    Table(#[from] TableError),

    #[error("failed to write output: {path}")]
    Output {
        path: String,
        #[source]
        source: io::Error,
    },
}

/// Determines the log level from CLI arguments.
#[allow(clippy::match_same_arms)]
fn get_log_level(verbose: u8, quiet: bool, config_level: &str) -> Level {
    if quiet {
        return Level::ERROR;
    }

    match verbose {
        0 => match config_level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::WARN,
        },
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Initialises the tracing subscriber for logging.
fn init_tracing(level: Level) {
    let filter = EnvFilter::from_default_env().add_directive(level.into());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Writes a generated document to `output`, or to stdout when `None`.
///
/// The document is rendered into memory first so a failing run leaves no
/// partial file behind.
fn emit<F>(output: Option<&Path>, render: F) -> Result<(), CliError>
where
    F: FnOnce(&mut Vec<u8>) -> io::Result<()>,
{
    let mut buf = Vec::new();
    let describe = || output.map_or_else(|| "<stdout>".to_string(), |p| p.display().to_string());
    render(&mut buf).map_err(|source| CliError::Output {
        path: describe(),
        source,
    })?;

    let result = match output {
        Some(path) => std::fs::write(path, &buf),
        None => io::stdout().lock().write_all(&buf),
    };
    result.map_err(|source| CliError::Output {
        path: describe(),
        source,
    })?;
    debug!(bytes = buf.len(), output = %describe(), "Wrote document");
    Ok(())
}

/// Edit timestamp for generated footprints (seconds since the epoch).
fn edit_timestamp() -> u64 {
    u64::try_from(chrono::Utc::now().timestamp()).unwrap_or_default()
}

fn run_footprint(
    spec: Option<&Path>,
    preset: Option<&str>,
    output: Option<&Path>,
    pinout: Option<(&Path, &str)>,
    style: &StyleConfig,
) -> Result<(), CliError> {
    let spec = match (spec, preset) {
        (Some(path), _) => config::load_package_spec(path)?,
        (None, Some(name)) => footprint::presets::by_name(name)?,
        (None, None) => return Err(FootprintError::unknown_preset("<none>").into()),
    };
    info!(part = %spec.part_name, family = %spec.family, "Generating footprint");

    let built = match pinout {
        Some((path, package)) => {
            let table = symbol::read_pinout_file(path, package)?;
            footprint::generate_checked(&spec, &table)?
        }
        None => footprint::generate(&spec)?,
    };

    let tedit = edit_timestamp();
    emit(output, |buf| {
        footprint::write_footprint(buf, &built, style, tedit)
    })
}

fn run_symbol(
    pinout: &Path,
    spec: Option<&Path>,
    preset: Option<&str>,
    output: Option<&Path>,
) -> Result<(), CliError> {
    let spec = match (spec, preset) {
        (Some(path), _) => config::load_symbol_spec(path)?,
        (None, Some(name)) => symbol::presets::by_name(name)?,
        (None, None) => {
            return Err(TableError::invalid_symbol("no symbol description given").into())
        }
    };
    info!(symbol = %spec.name, package = %spec.package, "Generating symbol");

    let table = symbol::read_pinout_file(pinout, &spec.package)?;
    let built = symbol::generate(&spec, &table)?;
    emit(output, |buf| symbol::write_symbol(buf, &built))
}

fn run_list() -> Result<(), CliError> {
    emit(None, |buf| {
        writeln!(buf, "Footprint presets:")?;
        for name in footprint::presets::names() {
            writeln!(buf, "  {name}")?;
        }
        writeln!(buf, "Symbol presets:")?;
        for name in symbol::presets::names() {
            writeln!(buf, "  {name}")?;
        }
        Ok(())
    })
}

fn run(command: &Command, cfg: &config::Config) -> Result<(), CliError> {
    match command {
        Command::Footprint {
            spec,
            preset,
            output,
            pinout,
            package,
        } => run_footprint(
            spec.as_deref(),
            preset.as_deref(),
            output.as_deref(),
            pinout.as_deref().zip(package.as_deref()),
            &cfg.style,
        ),
        Command::Symbol {
            pinout,
            spec,
            preset,
            output,
        } => run_symbol(pinout, spec.as_deref(), preset.as_deref(), output.as_deref()),
        Command::Bom {
            input,
            output,
            multiplier,
        } => {
            bom::translate_file(input, output, *multiplier)?;
            Ok(())
        }
        Command::List => run_list(),
    }
}

/// Entry point for eda-artifact-gen.
fn main() -> ExitCode {
    let args = Args::parse();

    // Load configuration
    let config_path = args.config.as_deref();
    let cfg = match config::load_config(config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            return ExitCode::FAILURE;
        }
    };

    // Initialise logging
    let log_level = get_log_level(args.verbose, args.quiet, &cfg.logging.level);
    init_tracing(log_level);

    debug!(version = env!("CARGO_PKG_VERSION"), "Starting eda-artifact-gen");

    match run(&args.command, &cfg) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let mut message = e.to_string();
            let mut source = e.source();
            while let Some(cause) = source {
                message.push_str(": ");
                message.push_str(&cause.to_string());
                source = cause.source();
            }
            error!(error = %message, "Generation failed");
            ExitCode::FAILURE
        }
    }
}
