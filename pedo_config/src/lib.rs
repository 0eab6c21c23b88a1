#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
//! Config schema and recording parsers for the pedometer workspace.
//!
//! - `Config` and sub-structs are deserialized from TOML and validated.
//! - Recording CSV loaders enforce headers and non-decreasing timestamps
//!   before anything reaches the detector.
use pedo_traits::{Sample, SensorEvent};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

/// Accelerometer recording schema.
///
/// Expected headers:
/// timestamp_ms,ax,ay,az
///
/// Example:
/// timestamp_ms,ax,ay,az
/// 1700000000000,0.12,0.05,9.79
#[derive(Debug, Deserialize, Clone, Copy)]
pub struct AccelRow {
    pub timestamp_ms: u64,
    pub ax: f32,
    pub ay: f32,
    pub az: f32,
}

impl From<AccelRow> for Sample {
    fn from(r: AccelRow) -> Self {
        Sample::new(r.timestamp_ms, r.ax, r.ay, r.az)
    }
}

/// Hardware step counter recording schema.
///
/// Expected headers:
/// timestamp_ms,steps
#[derive(Debug, Deserialize, Clone, Copy)]
pub struct CounterRow {
    pub timestamp_ms: u64,
    pub steps: f64,
}

impl From<CounterRow> for SensorEvent {
    fn from(r: CounterRow) -> Self {
        SensorEvent::StepCounter {
            timestamp_ms: r.timestamp_ms,
            cumulative: r.steps,
        }
    }
}

/// Which clock drives the detector debounce window.
#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TimeBase {
    /// Wall clock read at call time.
    #[default]
    Clock,
    /// The timestamp carried by each sample.
    Sample,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DetectorCfg {
    /// Smoothing weight of the newest magnitude, (0.0, 1.0].
    pub alpha: f32,
    /// Multiple of standard gravity the smoothed magnitude must cross.
    pub threshold_factor: f32,
    /// Minimum spacing between two accepted steps.
    pub debounce_ms: u64,
    pub time_base: TimeBase,
}

impl Default for DetectorCfg {
    fn default() -> Self {
        Self {
            alpha: 0.7,
            threshold_factor: 1.15,
            debounce_ms: 300,
            time_base: TimeBase::Clock,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SessionCfg {
    /// Emit a zero-step report when the first reading latches the baseline.
    pub emit_baseline: bool,
    /// Only emit when the reported count changed since the previous report.
    pub suppress_duplicates: bool,
}

impl Default for SessionCfg {
    fn default() -> Self {
        Self {
            emit_baseline: true,
            suppress_duplicates: true,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct SourceCfg {
    /// Whether the device exposes a hardware step counter.
    pub hardware_counter_present: bool,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Logging {
    pub file: Option<String>,  // path to .log (JSON lines)
    pub level: Option<String>, // "info","debug"
    /// Log rotation policy: "never" | "daily" | "hourly" (default: never)
    pub rotation: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub detector: DetectorCfg,
    pub session: SessionCfg,
    pub source: SourceCfg,
    pub logging: Logging,
}

pub fn load_toml(s: &str) -> Result<Config, toml::de::Error> {
    toml::from_str::<Config>(s)
}

impl Config {
    pub fn validate(&self) -> eyre::Result<()> {
        // Detector
        let alpha = self.detector.alpha;
        if !(alpha > 0.0 && alpha <= 1.0) {
            eyre::bail!("detector.alpha must be in (0.0, 1.0]");
        }
        let factor = self.detector.threshold_factor;
        if !factor.is_finite() || factor <= 0.0 {
            eyre::bail!("detector.threshold_factor must be a finite value > 0");
        }
        if factor > 10.0 {
            eyre::bail!("detector.threshold_factor is unreasonably large (>10 g)");
        }
        if self.detector.debounce_ms > 10_000 {
            eyre::bail!("detector.debounce_ms is unreasonably large (>10s)");
        }

        // Logging
        if let Some(rot) = self.logging.rotation.as_deref()
            && !matches!(rot, "never" | "daily" | "hourly")
        {
            eyre::bail!("logging.rotation must be one of never|daily|hourly, got {rot:?}");
        }

        Ok(())
    }
}

fn check_headers<R: Read>(rdr: &mut csv::Reader<R>, expected: &[&str]) -> eyre::Result<()> {
    let headers = rdr
        .headers()
        .map_err(|e| eyre::eyre!("read CSV headers: {}", e))?
        .clone();
    let actual: Vec<String> = headers.iter().map(|s| s.trim().to_string()).collect();
    if actual != expected {
        eyre::bail!(
            "recording CSV must have headers '{}', got: {}",
            expected.join(","),
            actual.join(",")
        );
    }
    Ok(())
}

fn check_monotonic(prev: Option<u64>, ts: u64, row: usize) -> eyre::Result<()> {
    if let Some(p) = prev
        && ts < p
    {
        eyre::bail!("timestamps must be non-decreasing (row {row}: {ts} < {p})");
    }
    Ok(())
}

/// Parse an accelerometer recording from any reader.
pub fn parse_accel_csv<R: Read>(reader: R) -> eyre::Result<Vec<Sample>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);
    check_headers(&mut rdr, &["timestamp_ms", "ax", "ay", "az"])?;

    let mut out = Vec::new();
    let mut prev = None;
    for (idx, rec) in rdr.deserialize::<AccelRow>().enumerate() {
        let row = rec.map_err(|e| eyre::eyre!("invalid CSV row {}: {}", idx + 2, e))?;
        check_monotonic(prev, row.timestamp_ms, idx + 2)?;
        prev = Some(row.timestamp_ms);
        out.push(Sample::from(row));
    }
    Ok(out)
}

/// Parse a hardware step counter recording from any reader.
pub fn parse_counter_csv<R: Read>(reader: R) -> eyre::Result<Vec<SensorEvent>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);
    check_headers(&mut rdr, &["timestamp_ms", "steps"])?;

    let mut out = Vec::new();
    let mut prev = None;
    for (idx, rec) in rdr.deserialize::<CounterRow>().enumerate() {
        let row = rec.map_err(|e| eyre::eyre!("invalid CSV row {}: {}", idx + 2, e))?;
        check_monotonic(prev, row.timestamp_ms, idx + 2)?;
        prev = Some(row.timestamp_ms);
        out.push(SensorEvent::from(row));
    }
    Ok(out)
}

pub fn load_accel_csv(path: &Path) -> eyre::Result<Vec<Sample>> {
    let f = std::fs::File::open(path)
        .map_err(|e| eyre::eyre!("open accelerometer CSV {:?}: {}", path, e))?;
    parse_accel_csv(f)
}

pub fn load_counter_csv(path: &Path) -> eyre::Result<Vec<SensorEvent>> {
    let f = std::fs::File::open(path)
        .map_err(|e| eyre::eyre!("open step counter CSV {:?}: {}", path, e))?;
    parse_counter_csv(f)
}
