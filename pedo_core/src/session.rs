//! Steps-since-start tracking on top of a cumulative step signal.
//!
//! A hardware step counter reports a device-lifetime total with an arbitrary
//! origin. The tracker latches the first reading after `start()` as the
//! baseline and reports `cumulative - baseline` from then on.
//!
//! Lifecycle: `Stopped --start()--> Running --stop()--> Stopped`.

use std::sync::Arc;

use pedo_traits::Clock;
use serde::{Deserialize, Serialize};

use crate::config::SessionCfg;
use crate::error::PedoError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Stopped,
    Running,
}

/// One outward step report.
///
/// Serializes as `{"startDate":…,"endDate":…,"numberOfSteps":…}` with both
/// dates in milliseconds since the Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepReport {
    pub start_date: u64,
    pub end_date: u64,
    pub number_of_steps: u64,
}

pub struct StepSessionTracker {
    cfg: SessionCfg,
    clock: Arc<dyn Clock + Send + Sync>,
    state: SessionState,
    // None until the first reading after start()
    baseline: Option<f64>,
    session_start_ms: u64,
    last_reported: Option<u64>,
}

impl core::fmt::Debug for StepSessionTracker {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("StepSessionTracker")
            .field("state", &self.state)
            .field("baseline", &self.baseline)
            .field("session_start_ms", &self.session_start_ms)
            .field("last_reported", &self.last_reported)
            .finish()
    }
}

impl StepSessionTracker {
    pub fn new<C: Clock + Send + Sync + 'static>(clock: C) -> Self {
        Self::with_cfg(SessionCfg::default(), Arc::new(clock))
    }

    pub fn with_cfg(cfg: SessionCfg, clock: Arc<dyn Clock + Send + Sync>) -> Self {
        Self {
            cfg,
            clock,
            state: SessionState::Stopped,
            baseline: None,
            session_start_ms: 0,
            last_reported: None,
        }
    }

    /// Start a session at the clock's current time.
    pub fn start(&mut self) -> bool {
        let now = self.clock.now_ms();
        self.start_at(now)
    }

    /// Start a session at `now_ms`. Returns false (and changes nothing) when a
    /// session is already running, so the existing baseline is preserved.
    pub fn start_at(&mut self, now_ms: u64) -> bool {
        if self.state == SessionState::Running {
            tracing::debug!(
                session_start_ms = self.session_start_ms,
                "start ignored; session already running"
            );
            return false;
        }
        self.state = SessionState::Running;
        self.session_start_ms = now_ms;
        self.baseline = None;
        self.last_reported = None;
        tracing::info!(session_start_ms = now_ms, "step session started");
        true
    }

    /// Latch `cumulative` as the baseline before any reading arrives.
    ///
    /// Ignored when stopped, when a baseline is already set, or for
    /// non-finite values.
    pub fn seed_baseline(&mut self, cumulative: f64) {
        if self.state != SessionState::Running
            || self.baseline.is_some()
            || !cumulative.is_finite()
        {
            return;
        }
        self.baseline = Some(cumulative);
        tracing::debug!(baseline = cumulative, "baseline seeded at start");
    }

    /// Stop the session and forget the baseline. Idempotent.
    pub fn stop(&mut self) {
        if self.state == SessionState::Running {
            tracing::info!(
                last_reported = ?self.last_reported,
                "step session stopped"
            );
        }
        self.state = SessionState::Stopped;
        self.baseline = None;
        self.last_reported = None;
    }

    /// Feed one cumulative reading.
    ///
    /// - `Err(SessionNotRunning)` before `start()`; nothing changes.
    /// - `Err(InvalidReading)` for NaN/∞; nothing changes.
    /// - `Ok(None)` when the report is suppressed (baseline absorbed, or an
    ///   unchanged count with duplicate suppression on).
    pub fn observe(&mut self, cumulative: f64) -> Result<Option<StepReport>, PedoError> {
        if self.state != SessionState::Running {
            return Err(PedoError::SessionNotRunning);
        }
        if !cumulative.is_finite() {
            return Err(PedoError::InvalidReading(cumulative));
        }

        let Some(baseline) = self.baseline else {
            self.baseline = Some(cumulative);
            self.last_reported = Some(0);
            tracing::debug!(baseline = cumulative, "baseline latched");
            return Ok(self.cfg.emit_baseline.then(|| self.report(0)));
        };

        let steps = steps_since(baseline, cumulative);
        // First reading against a seeded baseline: zero is the baseline report.
        if self.last_reported.is_none() && steps == 0 {
            self.last_reported = Some(0);
            return Ok(self.cfg.emit_baseline.then(|| self.report(0)));
        }
        if self.cfg.suppress_duplicates && self.last_reported == Some(steps) {
            return Ok(None);
        }
        self.last_reported = Some(steps);
        Ok(Some(self.report(steps)))
    }

    fn report(&self, steps: u64) -> StepReport {
        StepReport {
            start_date: self.session_start_ms,
            end_date: self.clock.now_ms(),
            number_of_steps: steps,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == SessionState::Running
    }

    pub fn baseline(&self) -> Option<f64> {
        self.baseline
    }

    pub fn session_start_ms(&self) -> u64 {
        self.session_start_ms
    }

    /// Step count of the most recent report (including an absorbed baseline).
    pub fn last_reported(&self) -> Option<u64> {
        self.last_reported
    }

    pub fn cfg(&self) -> &SessionCfg {
        &self.cfg
    }
}

/// `cumulative - baseline`, rounded, clamped at zero for counters that went backwards.
#[inline]
fn steps_since(baseline: f64, cumulative: f64) -> u64 {
    let delta = (cumulative - baseline).round();
    if delta <= 0.0 {
        0
    } else if delta >= u64::MAX as f64 {
        u64::MAX
    } else {
        delta as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pedo_traits::ManualClock;

    #[test]
    fn steps_since_clamps_and_rounds() {
        assert_eq!(steps_since(1000.0, 1012.0), 12);
        assert_eq!(steps_since(1000.0, 990.0), 0);
        assert_eq!(steps_since(0.0, 2.6), 3);
        assert_eq!(steps_since(0.0, f64::MAX), u64::MAX);
    }

    #[test]
    fn zero_reading_latches_as_baseline() {
        let mut t = StepSessionTracker::new(ManualClock::new(0));
        t.start();
        t.observe(0.0).unwrap();
        assert_eq!(t.baseline(), Some(0.0));
        let r = t.observe(4.0).unwrap().unwrap();
        assert_eq!(r.number_of_steps, 4);
    }

    #[test]
    fn seeded_baseline_counts_the_first_reading() {
        let mut t = StepSessionTracker::new(ManualClock::new(0));
        t.seed_baseline(3.0);
        assert_eq!(t.baseline(), None, "ignored while stopped");
        t.start();
        t.seed_baseline(3.0);
        t.seed_baseline(9.0);
        assert_eq!(t.baseline(), Some(3.0));
        let r = t.observe(4.0).unwrap().unwrap();
        assert_eq!(r.number_of_steps, 1);
    }

    #[test]
    fn seeded_baseline_respects_emit_baseline() {
        let cfg = SessionCfg {
            emit_baseline: false,
            ..SessionCfg::default()
        };
        let mut t = StepSessionTracker::with_cfg(cfg, Arc::new(ManualClock::new(0)));
        t.start();
        t.seed_baseline(0.0);
        assert_eq!(t.observe(0.0).unwrap(), None);
        assert_eq!(t.last_reported(), Some(0));
        assert_eq!(t.observe(1.0).unwrap().map(|r| r.number_of_steps), Some(1));
    }

    #[test]
    fn report_dates_follow_clock() {
        let clock = ManualClock::new(5_000);
        let mut t = StepSessionTracker::new(clock.clone());
        t.start();
        t.observe(10.0).unwrap();
        clock.advance(1_500);
        let r = t.observe(13.0).unwrap().unwrap();
        assert_eq!(
            r,
            StepReport {
                start_date: 5_000,
                end_date: 6_500,
                number_of_steps: 3,
            }
        );
    }

    #[test]
    fn report_serializes_with_camel_case_keys() {
        let r = StepReport {
            start_date: 1,
            end_date: 2,
            number_of_steps: 3,
        };
        let v = serde_json::to_value(r).unwrap();
        assert_eq!(v["startDate"], 1);
        assert_eq!(v["endDate"], 2);
        assert_eq!(v["numberOfSteps"], 3);
    }
}
