//! Caller-side waveform state.
//!
//! [`WaveformView`] owns the bucket set for one drawing surface and rebuilds
//! it whenever the levels or the surface width change.

use super::bucket::BucketSet;
use super::bucketize::bucketize;
use super::error::BucketizeError;

/// Bucketed waveform for a surface of a given width.
#[derive(Debug, Clone)]
pub struct WaveformView {
    width: i64,
    levels: Vec<f32>,
    buckets: BucketSet,
}

impl WaveformView {
    /// Creates an empty view for a surface `width` columns wide.
    ///
    /// # Errors
    /// - If `width` is zero or negative
    pub fn new(width: i64) -> Result<Self, BucketizeError> {
        let buckets = bucketize(&[], width)?;
        Ok(Self {
            width,
            levels: Vec::new(),
            buckets,
        })
    }

    /// Replaces the levels and rebuilds the buckets.
    ///
    /// An empty trace keeps the maximum power of the previous trace.
    pub fn set_levels(&mut self, levels: &[f32]) {
        self.levels = levels.to_vec();
        self.rebuild();
    }

    /// Changes the surface width and rebuilds the buckets.
    ///
    /// # Errors
    /// - If `width` is zero or negative; the view is left unchanged
    pub fn resize(&mut self, width: i64) -> Result<(), BucketizeError> {
        let buckets = bucketize(&self.levels, width)?;
        self.width = width;
        self.buckets = self.keep_previous_maximum(buckets);
        Ok(())
    }

    fn rebuild(&mut self) {
        // The width was validated when it was stored
        if let Ok(buckets) = bucketize(&self.levels, self.width) {
            self.buckets = self.keep_previous_maximum(buckets);
        }
    }

    fn keep_previous_maximum(&self, buckets: BucketSet) -> BucketSet {
        if self.levels.is_empty() {
            BucketSet::empty(self.buckets.maximum_power())
        } else {
            buckets
        }
    }

    pub fn width(&self) -> i64 {
        self.width
    }

    pub fn levels(&self) -> &[f32] {
        &self.levels
    }

    pub fn buckets(&self) -> &BucketSet {
        &self.buckets
    }

    /// Height of a bar for `average` on a canvas `canvas_height` units tall.
    ///
    /// Returns 0 when the power range is empty, so a flat trace draws nothing.
    pub fn bar_height(&self, average: f32, canvas_height: f32) -> f32 {
        let power_range = self.buckets.maximum_power() - self.buckets.minimum_power();
        if !(power_range.is_finite() && power_range > 0.0 && canvas_height > 0.0) {
            return 0.0;
        }

        let height = (average + self.buckets.offset()) * (canvas_height / power_range);
        if height.is_nan() {
            return 0.0;
        }
        height.clamp(0.0, canvas_height)
    }

    /// First column to draw so the bars sit centred on the canvas.
    pub fn start_column(&self, canvas_width: u16) -> u16 {
        let bars = u16::try_from(self.buckets.width()).unwrap_or(u16::MAX);
        (canvas_width / 2).saturating_sub(bars / 2)
    }
}
