//! Power trace capture for powertrace.
//!
//! Provides the peak power meter, the trace container built poll by poll,
//! and offline capture from recorded WAV files.

pub mod meter;
pub mod trace;
pub mod wav;

pub use meter::{peak_power_db, SILENCE_FLOOR_DB};
pub use trace::{format_hhmmss, PowerTrace, DEFAULT_POLL_INTERVAL};
pub use wav::trace_from_wav;
