//! Fits a power trace to a display width.
//!
//! The trace is split into equally sized runs of consecutive levels, one run
//! per column, and each run is averaged. The column count is chosen so that
//! every run holds exactly the same number of levels: starting from the
//! target width, the width is lowered while it evenly divides the level
//! count. Levels left over after the last full run are not drawn.

use super::bucket::{Bucket, BucketSet, DEFAULT_MAXIMUM_POWER};
use super::error::BucketizeError;

/// Buckets `levels` for a display `target_width` columns wide.
///
/// An empty trace yields an empty set with default bounds. Bounds only
/// consider finite levels; a trace without any falls back to the same
/// defaults.
///
/// # Errors
/// - [`BucketizeError::InvalidArgument`] if `target_width` is zero or negative
pub fn bucketize(levels: &[f32], target_width: i64) -> Result<BucketSet, BucketizeError> {
    if target_width < 1 {
        return Err(BucketizeError::InvalidArgument {
            width: target_width,
        });
    }

    if levels.is_empty() {
        tracing::trace!("No levels to bucket");
        return Ok(BucketSet::empty(DEFAULT_MAXIMUM_POWER));
    }

    let target_width = usize::try_from(target_width).unwrap_or(usize::MAX);
    let (minimum_power, maximum_power, offset) = match power_range(levels) {
        // Shift negative scales (dBFS) so the quietest level draws at zero
        Some((minimum, maximum)) if minimum < 0.0 => (0.0, maximum - minimum, -minimum),
        Some((minimum, maximum)) => (minimum, maximum, 0.0),
        None => {
            tracing::debug!("No finite levels among {}, using default bounds", levels.len());
            (0.0, DEFAULT_MAXIMUM_POWER, 0.0)
        }
    };

    let width = resolve_width(levels.len(), target_width);
    let levels_per_bucket = levels.len() / width;

    let buckets: Vec<Bucket> = levels
        .chunks_exact(levels_per_bucket)
        .take(width)
        .map(Bucket::new)
        .collect();

    tracing::trace!(
        "Bucketed {} levels into {} buckets of {} (target width {})",
        levels.len(),
        buckets.len(),
        levels_per_bucket,
        target_width
    );

    Ok(BucketSet::new(buckets, minimum_power, maximum_power, offset))
}

/// Chooses the number of buckets for `count` levels and `target_width` columns.
///
/// Fewer levels than columns gives one bucket per level. Otherwise this is the
/// largest width not above the target that does not evenly divide `count`,
/// or 1 when no such width exists.
pub fn resolve_width(count: usize, target_width: usize) -> usize {
    if count < target_width {
        return count;
    }

    let mut width = target_width;
    while width > 0 && count % width == 0 {
        width -= 1;
    }
    width.max(1)
}

/// Smallest and largest finite level, if any.
fn power_range(levels: &[f32]) -> Option<(f32, f32)> {
    levels
        .iter()
        .copied()
        .filter(|level| level.is_finite())
        .fold(None, |range, level| match range {
            None => Some((level, level)),
            Some((minimum, maximum)) => Some((minimum.min(level), maximum.max(level))),
        })
}
