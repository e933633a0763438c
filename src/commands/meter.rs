//! WAV metering command.
//!
//! Turns a recorded WAV file into a power trace file.

use std::io;
use std::path::Path;
use std::time::Duration;

use crate::config::PowertraceConfig;
use crate::recording::trace_from_wav;

/// Meters `wav_path` and writes the trace to `output`, or stdout when absent.
///
/// `interval_ms` overrides the polling interval from the config file.
///
/// # Errors
/// - If the configuration cannot be loaded
/// - If the WAV file cannot be read
/// - If the trace cannot be written
pub fn handle_meter(
    wav_path: &Path,
    output: Option<&Path>,
    interval_ms: Option<u64>,
) -> anyhow::Result<()> {
    let config = PowertraceConfig::load()?;
    let interval = interval_ms
        .map(|ms| Duration::from_millis(ms.max(1)))
        .unwrap_or_else(|| config.metering.interval());

    let trace = trace_from_wav(wav_path, interval).map_err(|e| {
        tracing::error!("Metering failed: {e:#}");
        e
    })?;

    match output {
        Some(path) => trace.save(path)?,
        None => trace.write(&mut io::stdout().lock())?,
    }

    Ok(())
}
