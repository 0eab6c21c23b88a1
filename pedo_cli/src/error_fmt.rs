//! Human-readable error descriptions and structured JSON error formatting.

use pedo_core::error::{BuildError, PedoError};

/// Full context chain of a report, outermost first.
fn chain_text(err: &eyre::Report) -> String {
    err.chain()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(": ")
}

/// Map an eyre::Report to a human-readable explanation with likely causes and fix hints.
pub fn humanize(err: &eyre::Report) -> String {
    // Typed matches first
    if let Some(be) = err.downcast_ref::<BuildError>() {
        return match be {
            BuildError::InvalidConfig(msg) => format!(
                "What happened: Invalid detector configuration ({msg}).\nLikely causes: Out-of-range values in the [detector] table.\nHow to fix: Edit the config file, then rerun."
            ),
        };
    }

    if let Some(pe) = err.downcast_ref::<PedoError>() {
        return match pe {
            PedoError::Config(msg) => format!(
                "What happened: Configuration is invalid ({msg}).\nLikely causes: Missing or out-of-range values in the TOML.\nHow to fix: Edit the config file, then rerun."
            ),
            PedoError::Source(msg) => format!(
                "What happened: The step source failed ({msg}).\nLikely causes: A sensor backend returned an unexpected error.\nHow to fix: Re-run with --log-level=debug for details."
            ),
            PedoError::SessionNotRunning => "What happened: A reading arrived while no session was running.\nLikely causes: The session was stopped before the stream ended.\nHow to fix: Start the session before feeding readings.".to_string(),
            other => format!(
                "What happened: {other}.\nLikely causes: See logs.\nHow to fix: Re-run with --log-level=debug or set RUST_LOG for more detail."
            ),
        };
    }

    // String-based heuristics for errors coming from file loading
    let msg = chain_text(err);
    let lower = msg.to_ascii_lowercase();

    if lower.contains("recording csv must have headers") {
        return format!(
            "Invalid headers in recording CSV. Expected 'timestamp_ms,ax,ay,az' (accelerometer) or 'timestamp_ms,steps' (step counter).\nOriginal: {msg}"
        );
    }

    if lower.contains("timestamps must be non-decreasing") {
        return format!(
            "What happened: Recording timestamps go backwards.\nLikely causes: Rows out of order or concatenated recordings.\nHow to fix: Sort the CSV by timestamp_ms. Original: {msg}"
        );
    }

    if lower.contains("open accelerometer csv")
        || lower.contains("open step counter csv")
        || lower.contains("read config")
    {
        return format!(
            "What happened: Failed to open an input file.\nLikely causes: Wrong path or missing read permission.\nHow to fix: Check the path and rerun. Original: {msg}"
        );
    }

    // Generic fallback
    format!(
        "Something went wrong.\nHow to fix: Re-run with --log-level=debug for details. Original: {msg}"
    )
}

/// Stable exit codes: 3 for configuration errors, 4 for step source
/// failures, 1 for everything else. Argument errors exit 2 via clap.
pub fn exit_code_for_error(err: &eyre::Report) -> i32 {
    if err.downcast_ref::<BuildError>().is_some() {
        return 3;
    }
    match err.downcast_ref::<PedoError>() {
        Some(PedoError::Config(_)) => 3,
        Some(PedoError::Source(_)) => 4,
        _ => 1,
    }
}

pub fn reason_name(err: &eyre::Report) -> &'static str {
    if err.downcast_ref::<BuildError>().is_some() {
        return "InvalidConfig";
    }
    match err.downcast_ref::<PedoError>() {
        Some(PedoError::Config(_)) => "InvalidConfig",
        Some(PedoError::Source(_)) => "Source",
        Some(PedoError::SessionNotRunning) => "SessionNotRunning",
        Some(PedoError::InvalidSample { .. } | PedoError::InvalidReading(_)) => "InvalidInput",
        None => "Error",
    }
}

/// Structured JSON for errors when --json is enabled.
pub fn format_error_json(err: &eyre::Report) -> String {
    use serde_json::json;
    json!({
        "reason": reason_name(err),
        "exit_code": exit_code_for_error(err),
        "message": humanize(err),
    })
    .to_string()
}
