//! Threshold-crossing step detector over smoothed acceleration magnitude.
//!
//! Each sample goes through three stages:
//!
//! 1. magnitude `m = sqrt(ax² + ay² + az²)`
//! 2. single-pole low-pass `f' = (1 - α)·f + α·m`
//! 3. edge trigger: a step is counted when `f'` rises above
//!    `STANDARD_GRAVITY · threshold_factor` from at or below it, and the
//!    previous accepted step is more than `debounce_ms` in the past.
//!
//! The smoothed value is stored whether or not a step was accepted.

use std::sync::Arc;

use pedo_traits::{Clock, Sample, SystemClock};

use crate::builder::StepDetectorBuilder;
use crate::config::{DetectorCfg, TimeBase};
use crate::error::PedoError;

/// Standard gravity in m/s².
pub const STANDARD_GRAVITY: f32 = 9.80665;

/// Mutable detector state. A fresh detector and a reset one compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DetectorState {
    /// Output of the smoothing recurrence after the last accepted sample.
    pub filtered_magnitude: f32,
    /// Time of the last accepted step; 0 means no step yet.
    pub last_step_ms: u64,
    pub step_count: u64,
}

pub struct StepDetector {
    cfg: DetectorCfg,
    // Cached trigger level (m/s²)
    threshold: f32,
    pub(crate) clock: Arc<dyn Clock + Send + Sync>,
    state: DetectorState,
}

impl core::fmt::Debug for StepDetector {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("StepDetector")
            .field("threshold", &self.threshold)
            .field("state", &self.state)
            .finish()
    }
}

impl Default for StepDetector {
    fn default() -> Self {
        Self::from_parts(DetectorCfg::default(), Arc::new(SystemClock::new()))
    }
}

impl StepDetector {
    /// Start building a detector.
    pub fn builder() -> StepDetectorBuilder {
        StepDetectorBuilder::default()
    }

    /// Construct without validation; callers go through the builder.
    pub(crate) fn from_parts(cfg: DetectorCfg, clock: Arc<dyn Clock + Send + Sync>) -> Self {
        let threshold = STANDARD_GRAVITY * cfg.threshold_factor;
        Self {
            cfg,
            threshold,
            clock,
            state: DetectorState::default(),
        }
    }

    /// Feed one sample and return the running step count.
    ///
    /// Non-finite input is rejected with `PedoError::InvalidSample` and leaves
    /// the state untouched, so the caller can drop the sample and continue.
    pub fn process_sample(&mut self, sample: &Sample) -> Result<u64, PedoError> {
        let m = sample.magnitude();
        if !sample.is_finite() || !m.is_finite() {
            tracing::debug!(
                timestamp_ms = sample.timestamp_ms,
                "rejecting non-finite sample"
            );
            return Err(PedoError::InvalidSample {
                timestamp_ms: sample.timestamp_ms,
            });
        }

        let prev = self.state.filtered_magnitude;
        let alpha = self.cfg.alpha;
        let filtered = (1.0 - alpha) * prev + alpha * m;

        if filtered > self.threshold && prev <= self.threshold {
            let now = match self.cfg.time_base {
                TimeBase::Clock => self.clock.now_ms(),
                TimeBase::Sample => sample.timestamp_ms,
            };
            let since_last = now.saturating_sub(self.state.last_step_ms);
            if since_last > self.cfg.debounce_ms {
                self.state.step_count = self.state.step_count.saturating_add(1);
                self.state.last_step_ms = now;
                tracing::trace!(
                    step_count = self.state.step_count,
                    filtered,
                    at_ms = now,
                    "step accepted"
                );
            } else {
                tracing::trace!(since_last, filtered, "crossing inside debounce window");
            }
        }

        self.state.filtered_magnitude = filtered;
        Ok(self.state.step_count)
    }

    /// Positional form of [`process_sample`](Self::process_sample).
    pub fn process(
        &mut self,
        timestamp_ms: u64,
        ax: f32,
        ay: f32,
        az: f32,
    ) -> Result<u64, PedoError> {
        self.process_sample(&Sample::new(timestamp_ms, ax, ay, az))
    }

    /// Forget everything; the detector behaves as freshly constructed.
    pub fn reset(&mut self) {
        tracing::debug!(step_count = self.state.step_count, "detector reset");
        self.state = DetectorState::default();
    }

    pub fn step_count(&self) -> u64 {
        self.state.step_count
    }

    pub fn filtered_magnitude(&self) -> f32 {
        self.state.filtered_magnitude
    }

    pub fn last_step_ms(&self) -> u64 {
        self.state.last_step_ms
    }

    pub fn state(&self) -> DetectorState {
        self.state
    }

    /// Trigger level in m/s².
    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    pub fn cfg(&self) -> &DetectorCfg {
        &self.cfg
    }
}
