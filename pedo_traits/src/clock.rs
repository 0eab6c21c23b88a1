use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Wall-clock abstraction shared by the detector and the session tracker.
///
/// - now_ms(): milliseconds since the Unix epoch
/// - ms_since(): helper to compute elapsed milliseconds from an earlier reading
pub trait Clock {
    fn now_ms(&self) -> u64;

    /// Milliseconds elapsed since `earlier`, saturating at 0 when time regresses.
    fn ms_since(&self, earlier: u64) -> u64 {
        self.now_ms().saturating_sub(earlier)
    }
}

/// Default, real-time clock backed by `std::time::SystemTime`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl SystemClock {
    #[inline]
    pub fn new() -> Self {
        Self
    }
}

impl Clock for SystemClock {
    #[inline]
    fn now_ms(&self) -> u64 {
        // A system time before the epoch reads as 0.
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis().min(u128::from(u64::MAX)) as u64)
            .unwrap_or(0)
    }
}

/// Deterministic clock whose time is moved by hand.
///
/// Clones share the same underlying time, so a test can keep one handle
/// while the detector or tracker owns another.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new(start_ms: u64) -> Self {
        Self {
            now: Arc::new(AtomicU64::new(start_ms)),
        }
    }

    /// Advance the clock by `ms` milliseconds.
    pub fn advance(&self, ms: u64) {
        let _ = self
            .now
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |t| {
                Some(t.saturating_add(ms))
            });
    }

    /// Set the absolute time in milliseconds since the epoch.
    pub fn set(&self, ms: u64) {
        self.now.store(ms, Ordering::Relaxed);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.load(Ordering::Relaxed)
    }
}
