//! `From` implementations bridging `pedo_config` types to `pedo_core` types.

use crate::config::{DetectorCfg, SessionCfg, TimeBase};

// ── TimeBase ─────────────────────────────────────────────────────────────────

impl From<pedo_config::TimeBase> for TimeBase {
    fn from(t: pedo_config::TimeBase) -> Self {
        match t {
            pedo_config::TimeBase::Clock => TimeBase::Clock,
            pedo_config::TimeBase::Sample => TimeBase::Sample,
        }
    }
}

// ── DetectorCfg ──────────────────────────────────────────────────────────────

impl From<&pedo_config::DetectorCfg> for DetectorCfg {
    fn from(c: &pedo_config::DetectorCfg) -> Self {
        Self {
            alpha: c.alpha,
            threshold_factor: c.threshold_factor,
            debounce_ms: c.debounce_ms,
            time_base: c.time_base.into(),
        }
    }
}

// ── SessionCfg ───────────────────────────────────────────────────────────────

impl From<&pedo_config::SessionCfg> for SessionCfg {
    fn from(c: &pedo_config::SessionCfg) -> Self {
        Self {
            emit_baseline: c.emit_baseline,
            suppress_duplicates: c.suppress_duplicates,
        }
    }
}
