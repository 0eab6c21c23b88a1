#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
//! Step counting core (platform-agnostic).
//!
//! This crate turns sensor readings into "steps since the session started".
//! All platform interaction stays behind `pedo_traits::StepSource`; nothing
//! here registers sensors, sleeps, or spawns threads.
//!
//! ## Architecture
//!
//! - **Detection**: smoothed-magnitude threshold crossing with debounce (`detector`)
//! - **Construction**: validated builder with an injectable clock (`builder`)
//! - **Sessions**: baseline latch and steps-since-start reports (`session`)
//! - **Sources**: hardware counter vs. accelerometer fallback behind one trait (`source`)
//! - **Replay**: drive a session over a recorded event stream (`runner`)
//!
//! Every instance owns its state exclusively. Callers feeding several streams
//! create one detector/tracker per stream and serialize calls into each.

// Module declarations
pub mod builder;
pub mod capabilities;
pub mod config;
pub mod conversions;
pub mod detector;
pub mod error;
pub mod mocks;
pub mod runner;
pub mod session;
pub mod source;
pub mod source_error;
pub mod util;

pub use builder::StepDetectorBuilder;
pub use capabilities::Capabilities;
pub use config::{DetectorCfg, SessionCfg, TimeBase};
pub use detector::{DetectorState, STANDARD_GRAVITY, StepDetector};
pub use error::{BuildError, PedoError};
pub use session::{SessionState, StepReport, StepSessionTracker};
pub use source::{DetectorFallbackSource, HardwareCounterSource, PedometerSession, select_source};
