//! Bucket listing command.
//!
//! Prints the buckets a trace is fitted into, as a table or as JSON.

use std::io::{self, Write};
use std::path::Path;

use crate::config::PowertraceConfig;
use crate::recording::PowerTrace;
use crate::waveform::{bucketize, BucketSet};

/// Prints the bucket set for the trace at `trace_path`.
///
/// # Errors
/// - If the configuration or trace cannot be loaded
/// - If the width is zero
/// - If writing to stdout fails
pub fn handle_buckets(trace_path: &Path, width: Option<u16>, json: bool) -> anyhow::Result<()> {
    let config = PowertraceConfig::load()?;
    let width = width.unwrap_or(config.display.width);
    let trace = PowerTrace::load(trace_path, config.metering.interval())?;

    let buckets = bucketize(trace.levels(), i64::from(width)).map_err(|e| {
        tracing::error!("Cannot bucket trace: {e}");
        anyhow::anyhow!(e)
    })?;

    let mut stdout = io::stdout().lock();
    if json {
        serde_json::to_writer_pretty(&mut stdout, &buckets)?;
        writeln!(stdout)?;
    } else {
        write_table(&buckets, &mut stdout)?;
    }
    stdout.flush()?;
    Ok(())
}

/// Writes one row per bucket followed by the bounds.
pub fn write_table<W: Write>(buckets: &BucketSet, out: &mut W) -> io::Result<()> {
    writeln!(out, "{:>6}  {:>6}  {:>10}", "bucket", "levels", "average")?;
    for (index, bucket) in buckets.buckets().iter().enumerate() {
        writeln!(out, "{:>6}  {:>6}  {:>10.3}", index, bucket.len(), bucket.average())?;
    }
    writeln!(
        out,
        "minimum {:.3} / maximum {:.3} / offset {:.3}",
        buckets.minimum_power(),
        buckets.maximum_power(),
        buckets.offset()
    )
}
