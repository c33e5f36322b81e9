//! # DV Supervisor
//!
//! Autonomous System state supervisor binary. Loads the TOML
//! configuration, sets up tracing, wires the stop flag to SIGINT, and
//! runs the paced guard-check loop until shutdown.
//!
//! External flags are sampled from a TOML snapshot file when
//! `inputs_path` is configured (bench-testing mode); otherwise the
//! loop runs on the power-on defaults and an embedding host is
//! expected to drive [`dv_supervisor::supervisor::Supervisor`]
//! directly.

use clap::Parser;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{Level, error, info, warn};
use tracing_subscriber::EnvFilter;

use dv_common::config::{ConfigError, SupervisorConfig, load_config};
use dv_supervisor::runner::{FileInputSource, InputSource, StaticInputs, SupervisorRunner};

const DEFAULT_CONFIG_PATH: &str = "config/supervisor.toml";

/// DV Supervisor — Autonomous System state machine loop
#[derive(Parser, Debug)]
#[command(name = "dv_supervisor")]
#[command(author = "RTS007")]
#[command(version)]
#[command(about = "Guard-check loop for the AS state machine (FS-Rules 2020, Figure 21)")]
struct Args {
    /// Path to the supervisor configuration TOML.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Override the guard-check cycle period [ms].
    #[arg(long, value_name = "MS")]
    cycle_ms: Option<u64>,

    /// Override the external inputs snapshot file.
    #[arg(long, value_name = "FILE")]
    inputs: Option<PathBuf>,

    /// Enable verbose logging (DEBUG level).
    #[arg(short, long)]
    verbose: bool,

    /// Output logs in JSON format.
    #[arg(long)]
    json: bool,
}

fn main() {
    let args = Args::parse();
    setup_tracing(&args);

    info!("DV Supervisor v{} starting...", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(&args) {
        error!("FATAL: {e}");
        process::exit(1);
    }

    info!("DV Supervisor shutdown complete");
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = resolve_config(args)?;
    if let Some(cycle_ms) = args.cycle_ms {
        config.cycle_time_ms = cycle_ms;
    }
    if let Some(ref inputs) = args.inputs {
        config.inputs_path = Some(inputs.clone());
    }
    config.validate()?;

    info!(
        "Config OK: cycle_time={}ms, ready_delay={}s",
        config.cycle_time_ms, config.ready_delay_s
    );

    let mut runner = SupervisorRunner::new(&config);

    // SIGINT clears the process-wide stop flag; the loop finishes the
    // cycle in progress and exits.
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || {
        info!("Received shutdown signal");
        r.store(false, Ordering::SeqCst);
    })?;

    let mut source: Box<dyn InputSource> = match config.inputs_path {
        Some(ref path) => {
            info!("Sampling external inputs from {}", path.display());
            Box::new(FileInputSource::new(path.clone()))
        }
        None => {
            warn!("No inputs_path configured — running on power-on defaults");
            Box::new(StaticInputs::default())
        }
    };

    runner.run(source.as_mut(), &running);
    Ok(())
}

/// Load configuration from `--config`, or from the default path when
/// present. A missing file at the default path is not an error; the
/// built-in defaults apply.
fn resolve_config(args: &Args) -> Result<SupervisorConfig, ConfigError> {
    match args.config {
        Some(ref path) => load_config(path),
        None => {
            let default = Path::new(DEFAULT_CONFIG_PATH);
            match load_config(default) {
                Ok(config) => Ok(config),
                Err(ConfigError::FileNotFound(_)) => {
                    warn!(
                        "No configuration at {}. Using built-in defaults.",
                        default.display()
                    );
                    Ok(SupervisorConfig::default())
                }
                Err(e) => Err(e),
            }
        }
    }
}

/// Setup tracing subscriber based on CLI arguments.
fn setup_tracing(args: &Args) {
    let level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    if args.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .compact()
            .init();
    }
}
