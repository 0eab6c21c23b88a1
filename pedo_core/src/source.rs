//! The two step sources and the session that consumes them.
//!
//! - `HardwareCounterSource` forwards a platform step counter's cumulative total.
//! - `DetectorFallbackSource` runs accelerometer samples through a `StepDetector`
//!   and exposes its running count as the cumulative value.
//!
//! `PedometerSession` pairs either one with a `StepSessionTracker`, so the
//! layer above never branches on which source is active.

use std::sync::Arc;

use pedo_traits::{Clock, SensorEvent, SourceKind, StepSource};

use crate::config::{DetectorCfg, SessionCfg};
use crate::detector::StepDetector;
use crate::error::{PedoError, Result};
use crate::session::{StepReport, StepSessionTracker};
use crate::source_error::map_source_error_dyn;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Pass-through for a hardware cumulative step counter.
#[derive(Debug, Default, Clone, Copy)]
pub struct HardwareCounterSource {
    last: Option<f64>,
}

impl HardwareCounterSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recent raw counter value.
    pub fn last(&self) -> Option<f64> {
        self.last
    }
}

impl StepSource for HardwareCounterSource {
    fn kind(&self) -> SourceKind {
        SourceKind::HardwareCounter
    }

    fn ingest(&mut self, event: &SensorEvent) -> std::result::Result<Option<f64>, BoxError> {
        match *event {
            SensorEvent::StepCounter { cumulative, .. } => {
                if !cumulative.is_finite() {
                    return Err(Box::new(PedoError::InvalidReading(cumulative)));
                }
                self.last = Some(cumulative);
                Ok(Some(cumulative))
            }
            SensorEvent::Acceleration(_) => Ok(None),
        }
    }

    fn reset(&mut self) {
        self.last = None;
    }
}

/// Software fallback for devices without a step counter.
#[derive(Debug)]
pub struct DetectorFallbackSource {
    detector: StepDetector,
}

impl DetectorFallbackSource {
    pub fn new(detector: StepDetector) -> Self {
        Self { detector }
    }

    pub fn detector(&self) -> &StepDetector {
        &self.detector
    }
}

impl StepSource for DetectorFallbackSource {
    fn kind(&self) -> SourceKind {
        SourceKind::DetectorFallback
    }

    fn ingest(&mut self, event: &SensorEvent) -> std::result::Result<Option<f64>, BoxError> {
        match event {
            SensorEvent::Acceleration(sample) => {
                let count = self.detector.process_sample(sample)?;
                Ok(Some(count as f64))
            }
            SensorEvent::StepCounter { .. } => Ok(None),
        }
    }

    fn current(&self) -> Option<f64> {
        Some(self.detector.step_count() as f64)
    }

    fn reset(&mut self) {
        self.detector.reset();
    }
}

/// Pick the source a device supports: the hardware counter when present,
/// otherwise the accelerometer fallback.
pub fn select_source(
    hardware_counter_present: bool,
    detector_cfg: DetectorCfg,
    clock: Arc<dyn Clock + Send + Sync>,
) -> Result<Box<dyn StepSource + Send>> {
    if hardware_counter_present {
        tracing::info!("using hardware step counter");
        return Ok(Box::new(HardwareCounterSource::new()));
    }
    tracing::info!("no hardware step counter; using accelerometer fallback");
    let detector = StepDetector::builder()
        .with_cfg(detector_cfg)
        .with_shared_clock(clock)
        .build()?;
    Ok(Box::new(DetectorFallbackSource::new(detector)))
}

/// A source plus the tracker that turns its output into session reports.
pub struct PedometerSession {
    source: Box<dyn StepSource + Send>,
    tracker: StepSessionTracker,
}

impl core::fmt::Debug for PedometerSession {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PedometerSession")
            .field("kind", &self.source.kind())
            .field("tracker", &self.tracker)
            .finish()
    }
}

impl PedometerSession {
    pub fn new(source: Box<dyn StepSource + Send>, tracker: StepSessionTracker) -> Self {
        Self { source, tracker }
    }

    /// Convenience constructor sharing one clock between source and tracker.
    pub fn for_device(
        hardware_counter_present: bool,
        detector_cfg: DetectorCfg,
        session_cfg: SessionCfg,
        clock: Arc<dyn Clock + Send + Sync>,
    ) -> Result<Self> {
        let source = select_source(hardware_counter_present, detector_cfg, clock.clone())?;
        let tracker = StepSessionTracker::with_cfg(session_cfg, clock);
        Ok(Self::new(source, tracker))
    }

    pub fn kind(&self) -> SourceKind {
        self.source.kind()
    }

    /// Start observing. No-op when already running.
    ///
    /// A source that knows its count up front seeds the baseline here, so a
    /// step accepted on the very first event still counts.
    pub fn start(&mut self) -> bool {
        let started = self.tracker.start();
        if started && let Some(cumulative) = self.source.current() {
            self.tracker.seed_baseline(cumulative);
        }
        started
    }

    /// Stop observing and reset the source so a restart counts from scratch.
    pub fn stop(&mut self) {
        self.tracker.stop();
        self.source.reset();
    }

    pub fn is_running(&self) -> bool {
        self.tracker.is_running()
    }

    /// Route one sensor event through the source and the tracker.
    ///
    /// Events arriving while stopped are not fed to the source.
    pub fn handle(&mut self, event: &SensorEvent) -> std::result::Result<Option<StepReport>, PedoError> {
        if !self.tracker.is_running() {
            return Err(PedoError::SessionNotRunning);
        }
        match self.source.ingest(event) {
            Ok(Some(cumulative)) => self.tracker.observe(cumulative),
            Ok(None) => Ok(None),
            Err(e) => Err(map_source_error_dyn(&*e)),
        }
    }

    pub fn tracker(&self) -> &StepSessionTracker {
        &self.tracker
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pedo_traits::{ManualClock, Sample};

    #[test]
    fn hardware_source_ignores_accelerometer() {
        let mut s = HardwareCounterSource::new();
        let ev = SensorEvent::Acceleration(Sample::new(0, 0.0, 0.0, 9.8));
        assert_eq!(s.ingest(&ev).unwrap(), None);
        assert_eq!(s.last(), None);
    }

    #[test]
    fn hardware_source_rejects_nan() {
        let mut s = HardwareCounterSource::new();
        let ev = SensorEvent::StepCounter {
            timestamp_ms: 0,
            cumulative: f64::NAN,
        };
        let err = s.ingest(&ev).unwrap_err();
        assert!(matches!(
            map_source_error_dyn(&*err),
            PedoError::InvalidReading(_)
        ));
    }

    #[test]
    fn fallback_source_ignores_counter_events() {
        let mut s = DetectorFallbackSource::new(StepDetector::default());
        let ev = SensorEvent::StepCounter {
            timestamp_ms: 0,
            cumulative: 12.0,
        };
        assert_eq!(s.ingest(&ev).unwrap(), None);
    }

    #[test]
    fn fallback_reports_current_count_and_resets() {
        let clock = ManualClock::new(10_000);
        let detector = StepDetector::builder()
            .with_clock(clock)
            .build()
            .unwrap();
        let mut s = DetectorFallbackSource::new(detector);
        assert_eq!(s.current(), Some(0.0));
        let ev = SensorEvent::Acceleration(Sample::new(0, 0.0, 0.0, 20.0));
        assert_eq!(s.ingest(&ev).unwrap(), Some(1.0));
        assert_eq!(s.current(), Some(1.0));
        s.reset();
        assert_eq!(s.detector().step_count(), 0);
        assert_eq!(s.detector().state(), crate::DetectorState::default());
    }

    #[test]
    fn hardware_source_has_no_current_value() {
        let mut s = HardwareCounterSource::new();
        let ev = SensorEvent::StepCounter {
            timestamp_ms: 0,
            cumulative: 7.0,
        };
        s.ingest(&ev).unwrap();
        assert_eq!(s.current(), None);
    }

    #[test]
    fn select_source_prefers_hardware() {
        let clock: Arc<dyn Clock + Send + Sync> = Arc::new(ManualClock::new(0));
        let hw = select_source(true, DetectorCfg::default(), clock.clone()).unwrap();
        assert_eq!(hw.kind(), SourceKind::HardwareCounter);
        let sw = select_source(false, DetectorCfg::default(), clock).unwrap();
        assert_eq!(sw.kind(), SourceKind::DetectorFallback);
    }

    #[test]
    fn select_source_validates_detector_cfg() {
        let clock: Arc<dyn Clock + Send + Sync> = Arc::new(ManualClock::new(0));
        let bad = DetectorCfg {
            alpha: 0.0,
            ..DetectorCfg::default()
        };
        assert!(select_source(false, bad, clock).is_err());
    }
}
