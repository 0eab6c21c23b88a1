//! Session assembly from config, recording/simulation inputs, and report output.

use std::path::Path;
use std::sync::Arc;

use eyre::WrapErr;
use pedo_core::mocks::{counter_walk, walking_samples};
use pedo_core::runner::{ReplayStats, replay_with_stats};
use pedo_core::{Capabilities, PedometerSession, StepReport};
use pedo_traits::{ManualClock, SensorEvent, SourceKind};

/// Start time of simulated traces (2023-11-14T22:13:20Z).
pub const SIM_START_MS: u64 = 1_700_000_000_000;
/// Arbitrary device-lifetime total a simulated hardware counter starts from.
pub const SIM_COUNTER_BASE: f64 = 48_213.0;
/// Upper bound for `simulate --steps` (a full day of brisk walking).
pub const MAX_SIM_STEPS: usize = 100_000;

pub fn source_name(kind: SourceKind) -> &'static str {
    match kind {
        SourceKind::HardwareCounter => "hardware-counter",
        SourceKind::DetectorFallback => "detector-fallback",
    }
}

/// Outcome of one replay, ready for printing.
#[derive(Debug)]
pub struct RunOutcome {
    pub kind: SourceKind,
    pub reports: Vec<StepReport>,
    pub stats: ReplayStats,
}

/// Build a session for `hardware` from the typed config and replay `events`
/// on a manual clock that follows the event timestamps.
pub fn run_events(
    cfg: &pedo_config::Config,
    hardware: bool,
    events: Vec<SensorEvent>,
) -> eyre::Result<RunOutcome> {
    let start_ms = events.first().map_or(0, SensorEvent::timestamp_ms);
    let clock = ManualClock::new(start_ms);
    let mut session = PedometerSession::for_device(
        hardware,
        (&cfg.detector).into(),
        (&cfg.session).into(),
        Arc::new(clock.clone()),
    )?;
    let kind = session.kind();
    let (reports, stats) = replay_with_stats(&mut session, events, Some(&clock))?;
    session.stop();
    Ok(RunOutcome {
        kind,
        reports,
        stats,
    })
}

/// `replay --accel FILE | --counter FILE`
pub fn run_replay(
    cfg: &pedo_config::Config,
    accel: Option<&Path>,
    counter: Option<&Path>,
) -> eyre::Result<RunOutcome> {
    match (accel, counter) {
        (Some(path), None) => {
            let samples = pedo_config::load_accel_csv(path)?;
            tracing::info!(path = %path.display(), samples = samples.len(), "loaded accelerometer recording");
            let events = samples.into_iter().map(SensorEvent::Acceleration).collect();
            run_events(cfg, false, events).wrap_err("replay accelerometer recording")
        }
        (None, Some(path)) => {
            let events = pedo_config::load_counter_csv(path)?;
            tracing::info!(path = %path.display(), readings = events.len(), "loaded step counter recording");
            run_events(cfg, true, events).wrap_err("replay step counter recording")
        }
        _ => eyre::bail!("exactly one of --accel or --counter is required"),
    }
}

/// `simulate --steps N`
pub fn run_simulate(
    cfg: &pedo_config::Config,
    steps: usize,
    hz: u32,
    cadence_hz: f32,
    hardware: bool,
) -> eyre::Result<RunOutcome> {
    if !cadence_hz.is_finite() || cadence_hz <= 0.0 {
        eyre::bail!("--cadence must be a finite value > 0, got {cadence_hz}");
    }
    if hz == 0 {
        eyre::bail!("--hz must be > 0");
    }
    if steps > MAX_SIM_STEPS {
        eyre::bail!("--steps must be <= {MAX_SIM_STEPS}, got {steps}");
    }
    let events = if hardware {
        counter_walk(steps, SIM_COUNTER_BASE, SIM_START_MS, cadence_hz)
    } else {
        walking_samples(steps, SIM_START_MS, hz, cadence_hz)
            .into_iter()
            .map(SensorEvent::Acceleration)
            .collect()
    };
    tracing::debug!(steps, hz, cadence_hz, hardware, events = events.len(), "simulated trace");
    run_events(cfg, hardware, events)
}

pub fn print_outcome(outcome: &RunOutcome, json: bool) -> eyre::Result<()> {
    for r in &outcome.reports {
        if json {
            println!("{}", serde_json::to_string(r)?);
        } else {
            println!(
                "steps={} start={} end={}",
                r.number_of_steps, r.start_date, r.end_date
            );
        }
    }
    if !json {
        let total = outcome.reports.last().map_or(0, |r| r.number_of_steps);
        println!(
            "total steps={} source={} events={} rejected={}",
            total,
            source_name(outcome.kind),
            outcome.stats.events,
            outcome.stats.rejected
        );
    }
    Ok(())
}

pub fn print_capabilities(caps: &Capabilities, json: bool) -> eyre::Result<()> {
    if json {
        println!("{}", serde_json::to_string(caps)?);
    } else {
        println!(
            "step_counting={} hardware_counter={} distance={} floor_counting={}",
            caps.step_counting, caps.hardware_counter, caps.distance, caps.floor_counting
        );
    }
    Ok(())
}
