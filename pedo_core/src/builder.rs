//! Builder for `StepDetector`.
//!
//! All configuration is validated on `build()`; a missing clock falls back
//! to the system wall clock.

use std::sync::Arc;

use pedo_traits::{Clock, SystemClock};

use crate::config::DetectorCfg;
use crate::detector::StepDetector;
use crate::error::{BuildError, Result};

/// Upper bound for the debounce window.
pub const MAX_DEBOUNCE_MS: u64 = 10_000;

#[derive(Default)]
pub struct StepDetectorBuilder {
    cfg: Option<DetectorCfg>,
    clock: Option<Arc<dyn Clock + Send + Sync>>,
}

impl StepDetectorBuilder {
    pub fn with_cfg(mut self, cfg: DetectorCfg) -> Self {
        self.cfg = Some(cfg);
        self
    }

    pub fn with_clock<C: Clock + Send + Sync + 'static>(mut self, clock: C) -> Self {
        self.clock = Some(Arc::new(clock));
        self
    }

    /// Share an already type-erased clock with other components.
    pub fn with_shared_clock(mut self, clock: Arc<dyn Clock + Send + Sync>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn build(self) -> Result<StepDetector> {
        let cfg = self.cfg.unwrap_or_default();
        validate(&cfg)?;
        let clock = self
            .clock
            .unwrap_or_else(|| Arc::new(SystemClock::new()));
        tracing::debug!(
            alpha = cfg.alpha,
            threshold_factor = cfg.threshold_factor,
            debounce_ms = cfg.debounce_ms,
            time_base = ?cfg.time_base,
            "step detector built"
        );
        Ok(StepDetector::from_parts(cfg, clock))
    }
}

fn validate(cfg: &DetectorCfg) -> Result<()> {
    if !(cfg.alpha > 0.0 && cfg.alpha <= 1.0) {
        return Err(eyre::Report::new(BuildError::InvalidConfig(
            "alpha must be in (0.0, 1.0]",
        )));
    }
    if !cfg.threshold_factor.is_finite() || cfg.threshold_factor <= 0.0 {
        return Err(eyre::Report::new(BuildError::InvalidConfig(
            "threshold_factor must be finite and > 0",
        )));
    }
    if cfg.debounce_ms > MAX_DEBOUNCE_MS {
        return Err(eyre::Report::new(BuildError::InvalidConfig(
            "debounce_ms must be <= 10000",
        )));
    }
    Ok(())
}
