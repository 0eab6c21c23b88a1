//! Drive a `PedometerSession` over a finite stream of sensor events.
//!
//! Recordings are replayed far faster than real time, so a wall-clock
//! debounce would see every footfall inside the same millisecond. Passing a
//! `ManualClock` that the session also reads lets the runner move time to each
//! event's timestamp before the event is handled.

use eyre::WrapErr;
use pedo_traits::{ManualClock, SensorEvent};

use crate::error::Result;
use crate::session::StepReport;
use crate::source::PedometerSession;

/// Counters gathered during a replay.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReplayStats {
    pub events: usize,
    /// Events dropped as invalid (non-finite samples or readings).
    pub rejected: usize,
    pub reports: usize,
}

/// Replay `events`, returning every emitted report.
pub fn replay<I>(
    session: &mut PedometerSession,
    events: I,
    clock: Option<&ManualClock>,
) -> Result<Vec<StepReport>>
where
    I: IntoIterator<Item = SensorEvent>,
{
    replay_with_stats(session, events, clock).map(|(reports, _)| reports)
}

/// Like [`replay`], also returning [`ReplayStats`].
///
/// Starts the session at the first event's time if it is not running yet.
/// Invalid inputs are logged and skipped; any other error aborts the replay.
pub fn replay_with_stats<I>(
    session: &mut PedometerSession,
    events: I,
    clock: Option<&ManualClock>,
) -> Result<(Vec<StepReport>, ReplayStats)>
where
    I: IntoIterator<Item = SensorEvent>,
{
    let mut reports = Vec::new();
    let mut stats = ReplayStats::default();

    for event in events {
        if let Some(c) = clock {
            c.set(event.timestamp_ms());
        }
        if !session.is_running() {
            session.start();
        }
        stats.events += 1;
        match session.handle(&event) {
            Ok(Some(report)) => {
                tracing::debug!(steps = report.number_of_steps, "step report");
                stats.reports += 1;
                reports.push(report);
            }
            Ok(None) => {}
            Err(e) if e.is_skippable() => {
                tracing::warn!(error = %e, "skipping invalid input");
                stats.rejected += 1;
            }
            Err(e) => {
                return Err(eyre::Report::new(e))
                    .wrap_err_with(|| format!("replay event {}", stats.events));
            }
        }
    }

    tracing::info!(
        events = stats.events,
        rejected = stats.rejected,
        reports = stats.reports,
        kind = ?session.kind(),
        "replay finished"
    );
    Ok((reports, stats))
}
