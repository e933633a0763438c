//! Power trace captured over a recording.
//!
//! A trace is the list of peak power levels polled at a fixed interval while
//! recording. Traces are stored as plain text: one level per line, with `#`
//! comments and blank lines ignored.

use anyhow::{anyhow, Context};
use std::fs;
use std::io::{BufRead, BufReader, Read, Write};
use std::path::Path;
use std::time::Duration;

/// Polling interval used by the recorder's level timer.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Ordered power levels, oldest first.
#[derive(Debug, Clone, PartialEq)]
pub struct PowerTrace {
    levels: Vec<f32>,
    interval: Duration,
}

impl PowerTrace {
    /// Creates an empty trace polled every `interval`.
    pub fn new(interval: Duration) -> Self {
        Self {
            levels: Vec::new(),
            interval,
        }
    }

    pub fn from_levels(levels: Vec<f32>, interval: Duration) -> Self {
        Self { levels, interval }
    }

    /// Appends the level read on the latest poll.
    pub fn push(&mut self, level: f32) {
        self.levels.push(level);
    }

    pub fn levels(&self) -> &[f32] {
        &self.levels
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Recording time covered by the trace.
    pub fn elapsed(&self) -> Duration {
        self.interval
            .saturating_mul(u32::try_from(self.levels.len()).unwrap_or(u32::MAX))
    }

    /// Hands the levels over and leaves the trace empty for the next take.
    pub fn take(&mut self) -> Vec<f32> {
        std::mem::take(&mut self.levels)
    }

    /// Loads a trace file. A path of `-` reads standard input.
    ///
    /// # Errors
    /// - If the file cannot be read
    /// - If a line is not a number
    pub fn load(path: &Path, interval: Duration) -> anyhow::Result<Self> {
        if path == Path::new("-") {
            tracing::debug!("Reading power trace from stdin");
            return Self::parse(std::io::stdin().lock(), interval);
        }

        let file = fs::File::open(path)
            .with_context(|| format!("Failed to open trace file {}", path.display()))?;
        let trace = Self::parse(file, interval)
            .with_context(|| format!("Failed to read trace file {}", path.display()))?;
        tracing::info!("Loaded {} levels from {}", trace.len(), path.display());
        Ok(trace)
    }

    /// Parses the text trace format.
    ///
    /// # Errors
    /// - If reading fails
    /// - If a non-comment line is not a finite number
    pub fn parse<R: Read>(reader: R, interval: Duration) -> anyhow::Result<Self> {
        let mut trace = Self::new(interval);

        for (index, line) in BufReader::new(reader).lines().enumerate() {
            let line = line?;
            let content = line.split('#').next().unwrap_or("").trim();
            if content.is_empty() {
                continue;
            }

            let level: f32 = content
                .parse()
                .map_err(|e| anyhow!("Line {}: invalid power level '{content}': {e}", index + 1))?;
            if !level.is_finite() {
                return Err(anyhow!(
                    "Line {}: power level must be finite, got '{content}'",
                    index + 1
                ));
            }
            trace.push(level);
        }

        Ok(trace)
    }

    /// Writes the trace to `path`.
    ///
    /// # Errors
    /// - If the file cannot be created or written
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let mut file = fs::File::create(path)
            .with_context(|| format!("Failed to create trace file {}", path.display()))?;
        self.write(&mut file)?;
        tracing::info!("Saved {} levels to {}", self.len(), path.display());
        Ok(())
    }

    /// Writes the text trace format with a header comment.
    pub fn write<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writeln!(
            writer,
            "# powertrace: {} levels, interval {} ms",
            self.levels.len(),
            self.interval.as_millis()
        )?;
        for level in &self.levels {
            writeln!(writer, "{level}")?;
        }
        writer.flush()
    }
}

/// Formats a duration as the recorder's `HH : MM : SS` time label.
pub fn format_hhmmss(duration: Duration) -> String {
    let total = duration.as_secs();
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;
    format!("{hours:02} : {minutes:02} : {seconds:02}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_take() {
        let mut trace = PowerTrace::new(DEFAULT_POLL_INTERVAL);
        trace.push(-30.0);
        trace.push(-12.5);
        assert_eq!(trace.len(), 2);
        assert_eq!(trace.elapsed(), Duration::from_millis(500));

        let levels = trace.take();
        assert_eq!(levels, vec![-30.0, -12.5]);
        assert!(trace.is_empty());
        assert_eq!(trace.elapsed(), Duration::ZERO);
    }

    #[test]
    fn test_parse_skips_comments_and_blank_lines() {
        let input = "# header\n-10.5\n\n  -3  # inline\n0\n";
        let trace = PowerTrace::parse(input.as_bytes(), DEFAULT_POLL_INTERVAL).unwrap();
        assert_eq!(trace.levels(), &[-10.5_f32, -3.0, 0.0]);
    }

    #[test]
    fn test_parse_reports_line_number() {
        let input = "-1\n-2\nloud\n";
        let err = PowerTrace::parse(input.as_bytes(), DEFAULT_POLL_INTERVAL).unwrap_err();
        assert!(err.to_string().contains("Line 3"), "unexpected error: {err}");
    }

    #[test]
    fn test_parse_rejects_non_finite_levels() {
        for input in ["-1\nnan\n", "inf\n", "-2\n-inf\n"] {
            let err = PowerTrace::parse(input.as_bytes(), DEFAULT_POLL_INTERVAL).unwrap_err();
            assert!(err.to_string().contains("must be finite"), "unexpected error: {err}");
        }
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("take.trace");

        let trace = PowerTrace::from_levels(vec![-160.0, -42.25, -0.5], DEFAULT_POLL_INTERVAL);
        trace.save(&path).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("# powertrace: 3 levels, interval 250 ms"));

        let loaded = PowerTrace::load(&path, DEFAULT_POLL_INTERVAL).unwrap();
        assert_eq!(loaded, trace);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(PowerTrace::load(&dir.path().join("missing"), DEFAULT_POLL_INTERVAL).is_err());
    }

    #[test]
    fn test_format_hhmmss() {
        assert_eq!(format_hhmmss(Duration::ZERO), "00 : 00 : 00");
        assert_eq!(format_hhmmss(Duration::from_millis(61_750)), "00 : 01 : 01");
        assert_eq!(format_hhmmss(Duration::from_secs(3 * 3600 + 25 * 60 + 9)), "03 : 25 : 09");
    }
}
