//! Runtime configuration types for the step detector and session tracker.
//!
//! These are separate from the TOML-deserialized config in `pedo_config`.

/// Which clock drives the debounce window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TimeBase {
    /// Read the injected `Clock` at call time.
    #[default]
    Clock,
    /// Use each sample's own `timestamp_ms`.
    Sample,
}

/// Detector tuning.
#[derive(Debug, Clone)]
pub struct DetectorCfg {
    /// Weight of the newest magnitude in the exponential smoother. Range: (0.0, 1.0].
    pub alpha: f32,
    /// Trigger level as a multiple of standard gravity.
    pub threshold_factor: f32,
    /// Two accepted steps must be strictly more than this many ms apart.
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

/// Session reporting policy.
#[derive(Debug, Clone, Copy)]
pub struct SessionCfg {
    /// Emit a zero-step report on the reading that latches the baseline.
    pub emit_baseline: bool,
    /// Skip reports whose step count equals the previous report.
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
