pub mod clock;

pub use clock::{Clock, ManualClock, SystemClock};

/// One tri-axial accelerometer reading (m/s², device frame, gravity included).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Sample {
    pub timestamp_ms: u64,
    pub ax: f32,
    pub ay: f32,
    pub az: f32,
}

impl Sample {
    pub fn new(timestamp_ms: u64, ax: f32, ay: f32, az: f32) -> Self {
        Self {
            timestamp_ms,
            ax,
            ay,
            az,
        }
    }

    /// Euclidean norm of the acceleration vector.
    #[inline]
    pub fn magnitude(&self) -> f32 {
        (self.ax * self.ax + self.ay * self.ay + self.az * self.az).sqrt()
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.ax.is_finite() && self.ay.is_finite() && self.az.is_finite()
    }
}

/// A sensor callback as delivered by the platform layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SensorEvent {
    /// Raw accelerometer sample.
    Acceleration(Sample),
    /// Hardware step counter reading (device-lifetime cumulative total).
    StepCounter { timestamp_ms: u64, cumulative: f64 },
}

impl SensorEvent {
    pub fn timestamp_ms(&self) -> u64 {
        match self {
            SensorEvent::Acceleration(s) => s.timestamp_ms,
            SensorEvent::StepCounter { timestamp_ms, .. } => *timestamp_ms,
        }
    }
}

/// Which kind of step source is backing a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    HardwareCounter,
    DetectorFallback,
}

/// Anything that turns sensor events into a cumulative step signal.
pub trait StepSource {
    fn kind(&self) -> SourceKind;

    /// Feed one event. Returns `Ok(Some(cumulative))` when the event belongs to
    /// this source and `Ok(None)` when it is of another kind and was ignored.
    fn ingest(
        &mut self,
        event: &SensorEvent,
    ) -> Result<Option<f64>, Box<dyn std::error::Error + Send + Sync>>;

    /// Cumulative value as of now, before the next event arrives. `None` when
    /// the source only learns its value from events (hardware counters).
    fn current(&self) -> Option<f64> {
        None
    }

    /// Drop any internal state so the next event starts from scratch.
    fn reset(&mut self);
}
