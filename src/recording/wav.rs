//! Builds power traces from recorded WAV files.
//!
//! The file is metered the way the recorder polls its input: the first
//! channel is split into windows one polling interval long and each window
//! contributes its peak power to the trace.

use anyhow::Context;
use hound::{SampleFormat, WavReader};
use std::path::Path;
use std::time::Duration;

use super::meter::{normalize_pcm, peak_power_db};
use super::trace::PowerTrace;

/// Meters the first channel of a WAV file every `interval`.
///
/// # Errors
/// - If the file cannot be opened or is not a valid WAV file
/// - If the sample data is truncated or malformed
pub fn trace_from_wav(path: &Path, interval: Duration) -> anyhow::Result<PowerTrace> {
    let mut reader = WavReader::open(path)
        .with_context(|| format!("Failed to open WAV file {}", path.display()))?;
    let spec = reader.spec();
    let channels = usize::from(spec.channels.max(1));

    tracing::info!(
        "Metering {}: {} Hz, {} channel(s), {} bit {:?}",
        path.display(),
        spec.sample_rate,
        spec.channels,
        spec.bits_per_sample,
        spec.sample_format
    );

    let samples: Vec<f32> = match spec.sample_format {
        SampleFormat::Float => reader
            .samples::<f32>()
            .step_by(channels)
            .collect::<Result<_, _>>()?,
        SampleFormat::Int => reader
            .samples::<i32>()
            .step_by(channels)
            .map(|sample| sample.map(|value| normalize_pcm(value, spec.bits_per_sample)))
            .collect::<Result<_, _>>()?,
    };

    let trace = meter_frames(&samples, spec.sample_rate, interval);
    tracing::debug!("Metered {} frames into {} levels", samples.len(), trace.len());
    Ok(trace)
}

/// Meters mono frames at `sample_rate` into one level per `interval`.
///
/// A trailing window shorter than the interval is metered as well.
pub fn meter_frames(frames: &[f32], sample_rate: u32, interval: Duration) -> PowerTrace {
    let window = (f64::from(sample_rate) * interval.as_secs_f64()).round() as usize;
    let mut trace = PowerTrace::new(interval);
    for frame in frames.chunks(window.max(1)) {
        trace.push(peak_power_db(frame));
    }
    trace
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recording::meter::SILENCE_FLOOR_DB;
    use crate::recording::trace::DEFAULT_POLL_INTERVAL;
    use approx::assert_relative_eq;
    use hound::{WavSpec, WavWriter};

    fn write_wav(path: &Path, channels: u16, frames: &[Vec<i16>]) {
        let spec = WavSpec {
            channels,
            sample_rate: 16000,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        let mut writer = WavWriter::create(path, spec).unwrap();
        for frame in frames {
            for &sample in frame {
                writer.write_sample(sample).unwrap();
            }
        }
        writer.finalize().unwrap();
    }

    #[test]
    fn test_mono_file_is_metered_per_interval() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("take.wav");

        // One second: half silence, half at -6 dBFS
        let frames: Vec<Vec<i16>> = (0..16000)
            .map(|i| vec![if i < 8000 { 0 } else { 16384 }])
            .collect();
        write_wav(&path, 1, &frames);

        let trace = trace_from_wav(&path, DEFAULT_POLL_INTERVAL).unwrap();
        assert_eq!(trace.len(), 4);
        assert_eq!(trace.levels()[0], SILENCE_FLOOR_DB);
        assert_eq!(trace.levels()[1], SILENCE_FLOOR_DB);
        assert_relative_eq!(trace.levels()[2], -6.0206, epsilon = 1e-3);
        assert_relative_eq!(trace.levels()[3], -6.0206, epsilon = 1e-3);
        assert_eq!(trace.elapsed(), Duration::from_secs(1));
    }

    #[test]
    fn test_float_samples_are_read_as_is() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("float.wav");
        let spec = WavSpec {
            channels: 1,
            sample_rate: 16000,
            bits_per_sample: 32,
            sample_format: SampleFormat::Float,
        };
        let mut writer = WavWriter::create(&path, spec).unwrap();
        for _ in 0..8000 {
            writer.write_sample(0.5_f32).unwrap();
        }
        writer.finalize().unwrap();

        let trace = trace_from_wav(&path, DEFAULT_POLL_INTERVAL).unwrap();
        assert_eq!(trace.len(), 2);
        for &level in trace.levels() {
            assert_relative_eq!(level, -6.0206, epsilon = 1e-3);
        }
    }

    #[test]
    fn test_24_bit_samples_are_scaled_by_bit_depth() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deep.wav");
        let spec = WavSpec {
            channels: 1,
            sample_rate: 16000,
            bits_per_sample: 24,
            sample_format: SampleFormat::Int,
        };
        let mut writer = WavWriter::create(&path, spec).unwrap();
        for _ in 0..8000 {
            writer.write_sample(1_i32 << 22).unwrap();
        }
        writer.finalize().unwrap();

        let trace = trace_from_wav(&path, DEFAULT_POLL_INTERVAL).unwrap();
        assert_eq!(trace.len(), 2);
        for &level in trace.levels() {
            assert_relative_eq!(level, -6.0206, epsilon = 1e-3);
        }
    }

    #[test]
    fn test_only_first_channel_is_metered() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stereo.wav");

        let frames: Vec<Vec<i16>> = (0..8000).map(|_| vec![0, i16::MAX]).collect();
        write_wav(&path, 2, &frames);

        let trace = trace_from_wav(&path, DEFAULT_POLL_INTERVAL).unwrap();
        assert_eq!(trace.len(), 2);
        assert!(trace.levels().iter().all(|&level| level == SILENCE_FLOOR_DB));
    }

    #[test]
    fn test_trailing_partial_window_is_kept() {
        let frames = vec![0.5_f32; 4100];
        let trace = meter_frames(&frames, 16000, DEFAULT_POLL_INTERVAL);
        assert_eq!(trace.len(), 2);
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("not-a.wav");
        std::fs::write(&path, b"definitely not RIFF").unwrap();
        assert!(trace_from_wav(&path, DEFAULT_POLL_INTERVAL).is_err());
    }
}
