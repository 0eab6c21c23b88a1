//! Synthetic sensor signals for tests, benches and the CLI `simulate` command.

use pedo_traits::{Sample, SensorEvent};

use crate::detector::STANDARD_GRAVITY;
use crate::util::{period_ms, step_interval_ms};

/// Peak height of a synthetic footfall above gravity (m/s²).
pub const PULSE_AMPLITUDE: f32 = 6.0;
/// Fraction of each step interval occupied by the footfall pulse.
const PULSE_FRACTION: f32 = 0.4;
/// Idle time before the first and after the last footfall.
pub const LEAD_MS: u64 = 500;

/// Tiny xorshift PRNG so synthetic noise is reproducible.
#[derive(Debug, Clone)]
struct XorShift(u32);

impl XorShift {
    fn new(seed: u32) -> Self {
        Self(seed.max(1))
    }

    /// Uniform in [-1, 1).
    fn next_signed(&mut self) -> f32 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.0 = x;
        (x as f32) / (u32::MAX as f32 + 1.0) * 2.0 - 1.0
    }
}

/// A phone lying still: magnitude within ±0.15 m/s² of standard gravity.
pub fn idle_samples(n: usize, start_ms: u64, hz: u32, seed: u32) -> Vec<Sample> {
    let period = period_ms(hz);
    let mut rng = XorShift::new(seed);
    (0..n)
        .map(|i| {
            let t = start_ms + i as u64 * period;
            Sample::new(
                t,
                0.05 * rng.next_signed(),
                0.05 * rng.next_signed(),
                STANDARD_GRAVITY + 0.1 * rng.next_signed(),
            )
        })
        .collect()
}

/// `steps` footfalls at `cadence_hz`, sampled at `hz`, framed by `LEAD_MS` of
/// idle signal on both sides. Each footfall is one half-sine pulse of
/// `PULSE_AMPLITUDE` on the z axis.
pub fn walking_samples(steps: usize, start_ms: u64, hz: u32, cadence_hz: f32) -> Vec<Sample> {
    let period = period_ms(hz);
    let interval = step_interval_ms(cadence_hz);
    let pulse_ms = ((interval as f32 * PULSE_FRACTION) as u64).max(1);
    let walk_ms = (steps as u64).saturating_mul(interval);
    let total_ms = walk_ms.saturating_add(2 * LEAD_MS);

    let mut out = Vec::with_capacity((total_ms / period + 1) as usize);
    let mut t = 0;
    while t <= total_ms {
        let mut mag = STANDARD_GRAVITY;
        if (LEAD_MS..LEAD_MS.saturating_add(walk_ms)).contains(&t) {
            let phase = (t - LEAD_MS) % interval;
            if phase < pulse_ms {
                let x = std::f32::consts::PI * phase as f32 / pulse_ms as f32;
                mag += PULSE_AMPLITUDE * x.sin();
            }
        }
        out.push(Sample::new(start_ms + t, 0.0, 0.0, mag));
        t += period;
    }
    out
}

/// Wrap accelerometer samples as sensor events.
pub fn acceleration_events(samples: &[Sample]) -> Vec<SensorEvent> {
    samples.iter().copied().map(SensorEvent::Acceleration).collect()
}

/// Step counter events carrying `values`, `period_ms` apart.
pub fn counter_events(values: &[f64], start_ms: u64, period_ms: u64) -> Vec<SensorEvent> {
    values
        .iter()
        .enumerate()
        .map(|(i, &cumulative)| SensorEvent::StepCounter {
            timestamp_ms: start_ms + i as u64 * period_ms,
            cumulative,
        })
        .collect()
}

/// A hardware counter already at `base` that ticks once per footfall.
/// The first event carries `base` itself, as a freshly registered sensor would.
pub fn counter_walk(steps: usize, base: f64, start_ms: u64, cadence_hz: f32) -> Vec<SensorEvent> {
    let values: Vec<f64> = (0..=steps).map(|i| base + i as f64).collect();
    counter_events(&values, start_ms, step_interval_ms(cadence_hz))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_stays_well_below_threshold() {
        let threshold = STANDARD_GRAVITY * 1.15;
        for s in idle_samples(500, 0, 50, 7) {
            assert!(s.magnitude() < threshold - 1.0);
        }
    }

    #[test]
    fn walking_trace_has_lead_in_and_tail() {
        let s = walking_samples(4, 1_000, 50, 2.0);
        // 500 + 4*500 + 500 = 3000 ms at 20 ms → 151 samples
        assert_eq!(s.len(), 151);
        assert_eq!(s[0].timestamp_ms, 1_000);
        assert_eq!(s.last().map(|x| x.timestamp_ms), Some(4_000));
        assert!(s.iter().any(|x| x.magnitude() > STANDARD_GRAVITY + 5.0));
    }

    #[test]
    fn counter_walk_starts_at_base() {
        let ev = counter_walk(3, 1000.0, 0, 2.0);
        assert_eq!(ev.len(), 4);
        assert_eq!(
            ev[3],
            SensorEvent::StepCounter {
                timestamp_ms: 1_500,
                cumulative: 1003.0
            }
        );
    }
}
