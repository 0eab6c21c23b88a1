//! CLI argument definitions and shared statics.

use clap::{ArgAction, ArgGroup, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::OnceLock;

/// Whether the user asked for JSON output (controls structured error output).
pub static JSON_MODE: OnceLock<bool> = OnceLock::new();

#[derive(Parser, Debug)]
#[command(name = "pedo", version, about = "Pedometer CLI")]
pub struct Cli {
    /// Path to config TOML (typed); built-in defaults when omitted
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print reports and errors as JSON lines
    #[arg(long, action = ArgAction::SetTrue)]
    pub json: bool,

    /// Console log level (error|warn|info|debug|trace)
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "info")]
    pub log_level: String,

    /// Command to execute
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a recorded sensor stream through a step session
    #[command(group(
        ArgGroup::new("recording")
            .required(true)
            .args(["accel", "counter"])
    ))]
    Replay {
        /// Accelerometer CSV (timestamp_ms,ax,ay,az); uses the detector fallback
        #[arg(long, value_name = "FILE")]
        accel: Option<PathBuf>,
        /// Hardware step counter CSV (timestamp_ms,steps)
        #[arg(long, value_name = "FILE")]
        counter: Option<PathBuf>,
    },
    /// Walk a synthetic trace through a step session
    Simulate {
        /// Number of steps to walk
        #[arg(long)]
        steps: usize,
        /// Accelerometer sampling rate
        #[arg(long, value_name = "HZ", default_value_t = 50)]
        hz: u32,
        /// Steps per second
        #[arg(long, value_name = "HZ", default_value_t = 2.0)]
        cadence: f32,
        /// Simulate a hardware step counter instead of raw acceleration
        #[arg(long, action = ArgAction::SetTrue)]
        hardware: bool,
    },
    /// Print what the active step source can report
    Capabilities {
        /// Assume a hardware step counter is present
        #[arg(long, action = ArgAction::SetTrue)]
        hardware: bool,
    },
}
