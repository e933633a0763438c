//! Errors raised while bucketing a power trace.

use thiserror::Error;

/// Failure of [`bucketize`](super::bucketize).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BucketizeError {
    /// The target width was zero or negative.
    #[error("invalid argument: target width must be at least 1, got {width}")]
    InvalidArgument { width: i64 },
}
