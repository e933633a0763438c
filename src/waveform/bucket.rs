//! Bucketed power levels ready for drawing.

use serde::Serialize;

/// Maximum power reported before any level has been seen.
pub const DEFAULT_MAXIMUM_POWER: f32 = 160.0;

/// A contiguous run of power levels collapsed to one averaged value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bucket {
    levels: Vec<f32>,
    average: f32,
}

impl Bucket {
    /// Creates a bucket from a non-empty run of levels.
    pub(crate) fn new(levels: &[f32]) -> Self {
        debug_assert!(!levels.is_empty(), "bucket needs at least one level");
        let total: f32 = levels.iter().sum();
        Self {
            levels: levels.to_vec(),
            average: total / levels.len() as f32,
        }
    }

    /// Raw levels in source order.
    pub fn levels(&self) -> &[f32] {
        &self.levels
    }

    /// Arithmetic mean of the raw (unshifted) levels.
    pub fn average(&self) -> f32 {
        self.average
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

/// Buckets fitted to a display width, with the bounds used to scale them.
///
/// Renderers shift every level by [`offset`](Self::offset) so that negative
/// scales such as dBFS draw as non-negative magnitudes, then divide by
/// `maximum_power - minimum_power`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BucketSet {
    buckets: Vec<Bucket>,
    minimum_power: f32,
    maximum_power: f32,
    offset: f32,
}

impl BucketSet {
    pub(crate) fn new(
        buckets: Vec<Bucket>,
        minimum_power: f32,
        maximum_power: f32,
        offset: f32,
    ) -> Self {
        Self {
            buckets,
            minimum_power,
            maximum_power,
            offset,
        }
    }

    /// A set with no buckets and default bounds.
    pub fn empty(maximum_power: f32) -> Self {
        Self::new(Vec::new(), 0.0, maximum_power, 0.0)
    }

    pub fn buckets(&self) -> &[Bucket] {
        &self.buckets
    }

    /// Number of buckets, i.e. the number of columns the set occupies.
    pub fn width(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn minimum_power(&self) -> f32 {
        self.minimum_power
    }

    pub fn maximum_power(&self) -> f32 {
        self.maximum_power
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Total number of levels covered by the buckets.
    pub fn covered_levels(&self) -> usize {
        self.buckets.iter().map(Bucket::len).sum()
    }
}

impl Default for BucketSet {
    fn default() -> Self {
        Self::empty(DEFAULT_MAXIMUM_POWER)
    }
}
