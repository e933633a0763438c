//! Waveform rendering command.
//!
//! Loads a power trace, fits it to the configured width and draws it as
//! vertical bars on stdout, followed by a one-line summary.

use std::io::{self, Write};
use std::path::Path;

use crate::config::PowertraceConfig;
use crate::recording::{format_hhmmss, PowerTrace};
use crate::waveform::{render_lines, BucketSet, WaveformView};

/// Renders the trace at `trace_path` as a waveform.
///
/// `width` and `height` override the display settings from the config file.
///
/// # Errors
/// - If the configuration or trace cannot be loaded
/// - If the width is zero
/// - If writing to stdout fails
pub fn handle_render(
    trace_path: &Path,
    width: Option<u16>,
    height: Option<u16>,
) -> anyhow::Result<()> {
    let config = PowertraceConfig::load()?;
    let width = width.unwrap_or(config.display.width);
    let height = height.unwrap_or(config.display.height);

    let trace = PowerTrace::load(trace_path, config.metering.interval())?;
    tracing::info!(
        "Rendering {} levels at {}x{}",
        trace.len(),
        width,
        height
    );

    let mut stdout = io::stdout().lock();
    render_trace(&trace, width, height, &mut stdout)
}

/// Draws `trace` on a `width` x `height` canvas into `out`.
///
/// # Errors
/// - If the width is zero
/// - If writing fails
pub fn render_trace<W: Write>(
    trace: &PowerTrace,
    width: u16,
    height: u16,
    out: &mut W,
) -> anyhow::Result<()> {
    let mut view = WaveformView::new(i64::from(width)).map_err(|e| {
        tracing::error!("Cannot render waveform: {e}");
        anyhow::anyhow!(e)
    })?;
    view.set_levels(trace.levels());

    for line in render_lines(&view, width, height) {
        writeln!(out, "{}", line.trim_end())?;
    }
    writeln!(out, "{}", summary_line(trace, view.buckets()))?;
    out.flush()?;
    Ok(())
}

/// Footer with duration, bucket count and the normalization bounds.
pub fn summary_line(trace: &PowerTrace, buckets: &BucketSet) -> String {
    format!(
        "{} / {} levels in {} buckets / power {:.1}..{:.1} (offset {:.1})",
        format_hhmmss(trace.elapsed()),
        trace.len(),
        buckets.width(),
        buckets.minimum_power(),
        buckets.maximum_power(),
        buckets.offset()
    )
}
