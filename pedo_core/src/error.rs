use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PedoError {
    #[error("invalid sample at {timestamp_ms} ms: non-finite acceleration")]
    InvalidSample { timestamp_ms: u64 },
    #[error("invalid step counter reading: {0}")]
    InvalidReading(f64),
    #[error("session not running")]
    SessionNotRunning,
    #[error("step source error: {0}")]
    Source(String),
    #[error("configuration error: {0}")]
    Config(String),
}

impl PedoError {
    /// Whether the caller may drop the offending input and keep going.
    pub fn is_skippable(&self) -> bool {
        matches!(
            self,
            PedoError::InvalidSample { .. } | PedoError::InvalidReading(_)
        )
    }
}

#[derive(Debug, Error, Clone)]
pub enum BuildError {
    #[error("invalid config: {0}")]
    InvalidConfig(&'static str),
}

pub type Result<T> = eyre::Result<T>;
