//! Power trace bucketing and waveform rendering.
//!
//! A power trace (peak levels polled while recording) is fitted to the width
//! of a drawing surface by [`waveform::bucketize`] and drawn as vertical bars.

pub mod app;
pub mod commands;
pub mod config;
pub mod logging;
pub mod recording;
pub mod waveform;
