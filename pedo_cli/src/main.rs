//! `pedo`: replay recordings or simulated walks through a step session.

mod cli;
mod error_fmt;
mod replay;

use std::path::Path;

use clap::Parser;
use eyre::{Result, WrapErr};
use pedo_core::{Capabilities, PedoError};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt};

use crate::cli::{Cli, Commands, JSON_MODE};
use crate::error_fmt::{exit_code_for_error, format_error_json, humanize};

fn main() {
    let cli = Cli::parse();
    let _ = JSON_MODE.set(cli.json);

    if let Err(e) = run(cli) {
        if JSON_MODE.get().copied().unwrap_or(false) {
            eprintln!("{}", format_error_json(&e));
        } else {
            eprintln!("{}", humanize(&e));
        }
        tracing::error!(error = ?e, "pedo failed");
        std::process::exit(exit_code_for_error(&e));
    }
}

fn run(cli: Cli) -> Result<()> {
    let _ = color_eyre::install();

    let cfg = load_config(cli.config.as_deref())?;
    // Flushes the file layer when run() returns
    let _file_guard = init_tracing(cli.json, &cli.log_level, &cfg.logging)?;
    tracing::debug!(config = ?cli.config, "config loaded");

    match cli.cmd {
        Commands::Replay { accel, counter } => {
            let outcome = replay::run_replay(&cfg, accel.as_deref(), counter.as_deref())?;
            replay::print_outcome(&outcome, cli.json)
        }
        Commands::Simulate {
            steps,
            hz,
            cadence,
            hardware,
        } => {
            let outcome = replay::run_simulate(&cfg, steps, hz, cadence, hardware)?;
            replay::print_outcome(&outcome, cli.json)
        }
        Commands::Capabilities { hardware } => {
            let present = hardware || cfg.source.hardware_counter_present;
            let source = pedo_core::select_source(
                present,
                (&cfg.detector).into(),
                std::sync::Arc::new(pedo_traits::SystemClock::new()),
            )?;
            replay::print_capabilities(&Capabilities::for_source(source.kind()), cli.json)
        }
    }
}

/// Read, parse and validate the config; built-in defaults when no path is given.
fn load_config(path: Option<&Path>) -> Result<pedo_config::Config> {
    let Some(path) = path else {
        return Ok(pedo_config::Config::default());
    };
    let text = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("read config {}", path.display()))?;
    let cfg = pedo_config::load_toml(&text).map_err(|e| {
        eyre::Report::new(PedoError::Config(format!("parse {}: {e}", path.display())))
    })?;
    cfg.validate()
        .map_err(|e| eyre::Report::new(PedoError::Config(e.to_string())))?;
    Ok(cfg)
}

/// Console layer on stderr (pretty or JSON) plus an optional JSON file layer.
///
/// `RUST_LOG` overrides `--log-level` for the console; `[logging].level`
/// filters the file layer.
fn init_tracing(
    json: bool,
    level: &str,
    logging: &pedo_config::Logging,
) -> Result<Option<WorkerGuard>> {
    let console_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .wrap_err_with(|| format!("invalid --log-level '{level}'"))?;

    let mut layers: Vec<Box<dyn Layer<Registry> + Send + Sync>> = Vec::new();
    let mut file_guard = None;
    if json {
        layers.push(
            fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .with_filter(console_filter)
                .boxed(),
        );
    } else {
        layers.push(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_filter(console_filter)
                .boxed(),
        );
    }

    if let Some(file) = logging.file.as_deref() {
        let path = Path::new(file);
        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let Some(name) = path.file_name() else {
            eyre::bail!("logging.file has no file name: {file}");
        };
        let appender = match logging.rotation.as_deref() {
            Some("daily") => tracing_appender::rolling::daily(dir, name),
            Some("hourly") => tracing_appender::rolling::hourly(dir, name),
            _ => tracing_appender::rolling::never(dir, name),
        };
        let (writer, guard) = tracing_appender::non_blocking(appender);
        file_guard = Some(guard);
        let file_filter = EnvFilter::try_new(logging.level.as_deref().unwrap_or("info"))
            .wrap_err("invalid logging.level")?;
        layers.push(
            fmt::layer()
                .json()
                .with_ansi(false)
                .with_writer(writer)
                .with_filter(file_filter)
                .boxed(),
        );
    }

    tracing_subscriber::registry()
        .with(layers)
        .try_init()
        .wrap_err("install tracing subscriber")?;
    Ok(file_guard)
}
