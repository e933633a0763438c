//! Waveform bucketing and drawing.
//!
//! A power trace is fitted to the width of a drawing surface by
//! [`bucketize`], held per surface by [`WaveformView`], and drawn by
//! [`WaveformChart`].

pub mod bucket;
pub mod bucketize;
pub mod chart;
pub mod error;
pub mod view;

pub use bucket::{Bucket, BucketSet, DEFAULT_MAXIMUM_POWER};
pub use bucketize::{bucketize, resolve_width};
pub use chart::{render_lines, WaveformChart};
pub use error::BucketizeError;
pub use view::WaveformView;
